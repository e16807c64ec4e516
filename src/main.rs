mod audio_manager;
mod core;
mod render;

use raylib::prelude::*;
use std::thread;
use std::time::Duration;

use crate::audio_manager::AudioManager;
use crate::core::input::{HeldKeys, InputSource};
use crate::core::maze::{Cell, GRID_SIZE, Maze};
use crate::core::player::Player;
use crate::core::session::LevelSession;
use crate::render::casters::{MAX_RANGE, cast_ray};
use crate::render::framebuffer::Framebuffer;
use crate::render::render3d::{FOV, SCENE_BG, render_3d};
use crate::render::sprites::draw_goal_pillar;
use crate::render::textures::TextureManager;

/// Minimap cell size in pixels.
const MAP_CELL: u32 = 60;

/// WASD plus arrows, polled once per frame like any other input source.
impl InputSource for RaylibHandle {
    fn poll(&mut self) -> HeldKeys {
        HeldKeys {
            forward: self.is_key_down(KeyboardKey::KEY_W) || self.is_key_down(KeyboardKey::KEY_UP),
            back: self.is_key_down(KeyboardKey::KEY_S) || self.is_key_down(KeyboardKey::KEY_DOWN),
            turn_left: self.is_key_down(KeyboardKey::KEY_A)
                || self.is_key_down(KeyboardKey::KEY_LEFT),
            turn_right: self.is_key_down(KeyboardKey::KEY_D)
                || self.is_key_down(KeyboardKey::KEY_RIGHT),
        }
    }
}

fn draw_map_cell(framebuffer: &mut Framebuffer, xo: u32, yo: u32, color: Color) {
    framebuffer.set_current_color(color);
    for x in xo..xo + MAP_CELL {
        for y in yo..yo + MAP_CELL {
            framebuffer.set_pixel(x, y);
        }
    }
}

/// Top-down debug view: cell fill, goal cell, player dot and a fan of
/// FOV rays.
fn render_minimap(
    framebuffer: &mut Framebuffer,
    maze: &Maze,
    player: &Player,
    goal: (f32, f32),
    offset_x: u32,
) {
    for row in 0..maze.size() {
        for col in 0..maze.size() {
            if maze.at(col, row) == Cell::Wall {
                let xo = offset_x + col as u32 * MAP_CELL;
                let yo = row as u32 * MAP_CELL;
                draw_map_cell(framebuffer, xo, yo, Color::new(40, 40, 160, 255));
            }
        }
    }

    // goal marker, half a cell wide and centered
    framebuffer.set_current_color(Color::GREEN);
    let gx = offset_x + (goal.0 * MAP_CELL as f32) as u32;
    let gy = (goal.1 * MAP_CELL as f32) as u32;
    for x in gx.saturating_sub(MAP_CELL / 4)..gx + MAP_CELL / 4 {
        for y in gy.saturating_sub(MAP_CELL / 4)..gy + MAP_CELL / 4 {
            framebuffer.set_pixel(x, y);
        }
    }

    // FOV fan, marched the same way the 3D columns are
    framebuffer.set_current_color(Color::new(255, 255, 255, 255));
    let num_rays = 25;
    for i in 0..num_rays {
        let t = i as f32 / num_rays as f32;
        let ray_a = player.dir + FOV * 0.5 - FOV * t;
        let reach = cast_ray(maze, player.x, player.z, ray_a)
            .map(|hit| hit.distance)
            .unwrap_or(MAX_RANGE);
        let dir_x = (ray_a + std::f32::consts::PI).sin();
        let dir_z = (ray_a + std::f32::consts::PI).cos();
        let mut d = 0.0;
        while d < reach {
            let px = offset_x as f32 + (player.x + dir_x * d) * MAP_CELL as f32;
            let py = (player.z + dir_z * d) * MAP_CELL as f32;
            framebuffer.set_pixel(px as u32, py as u32);
            d += 0.05;
        }
    }

    // player dot on top of the rays
    framebuffer.set_current_color(Color::YELLOW);
    let px = offset_x as f32 + player.x * MAP_CELL as f32;
    let py = player.z * MAP_CELL as f32;
    for dx in 0..5u32 {
        for dy in 0..5u32 {
            framebuffer.set_pixel(px as u32 + dx - 2, py as u32 + dy - 2);
        }
    }
}

fn main() {
    env_logger::init();

    let window_width = 1300;
    let window_height = 900;

    let (mut window, raylib_thread) = raylib::init()
        .size(window_width, window_height)
        .title("Labyrinth")
        .build();

    let texman = TextureManager::new();
    let mut framebuffer = Framebuffer::new(window_width as u32, window_height as u32, SCENE_BG);

    // persistent blit target, updated from the CPU buffer every frame
    let blank = Image::gen_image_color(window_width, window_height, Color::BLACK);
    let mut screen_tex = window
        .load_texture_from_image(&raylib_thread, &blank)
        .expect("No pude crear la textura de pantalla");

    let mut audio = AudioManager::new();
    let mut zbuffer = vec![f32::INFINITY; window_width as usize];

    let mut session = LevelSession::begin(GRID_SIZE, &mut rand::thread_rng())
        .expect("maze generation is total for the configured grid size");

    let mut mode_3d = true;
    let mut was_moving = false;
    let map_offset_x = (window_width as u32 - GRID_SIZE as u32 * MAP_CELL) / 2;

    while !window.window_should_close() {
        if window.is_key_pressed(KeyboardKey::KEY_M) {
            mode_3d = !mode_3d;
        }
        if session.goal_found() && window.is_key_pressed(KeyboardKey::KEY_R) {
            session.exit();
            session = LevelSession::begin(GRID_SIZE, &mut rand::thread_rng())
                .expect("maze generation is total for the configured grid size");
        }

        let keys = window.poll();
        let outcome = session.step(keys);

        let moving = (keys.forward || keys.back) && !session.goal_found();
        if let Some(a) = audio.as_mut() {
            if outcome.reached_goal {
                a.play_win_chime();
            }
            if moving {
                a.play_footstep(keys.back);
            } else if was_moving {
                a.stop_footsteps();
            }
        }
        was_moving = moving;

        framebuffer.clear();
        if mode_3d {
            render_3d(
                &mut framebuffer,
                session.maze(),
                session.player(),
                &texman,
                &mut zbuffer,
            );
            let (gx, gz) = session.goal();
            draw_goal_pillar(
                &mut framebuffer,
                session.player(),
                &texman,
                &zbuffer,
                gx,
                gz,
                session.goal_found(),
            );
        } else {
            render_minimap(
                &mut framebuffer,
                session.maze(),
                session.player(),
                session.goal(),
                map_offset_x,
            );
        }
        framebuffer.upload_to_texture(&mut screen_tex);

        let fps_now = window.get_fps();
        let won = session.goal_found();
        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(Color::BLACK);
            d.draw_texture(&screen_tex, 0, 0, Color::WHITE);

            d.draw_text(&format!("FPS: {}", fps_now), 10, 10, 20, Color::WHITE);
            if won {
                d.draw_text("LEVEL COMPLETED!", 10, 40, 20, Color::GREEN);
                d.draw_text("R for a new maze", 10, 70, 20, Color::WHITE);
            } else {
                d.draw_text("Find the Green Pillar", 10, 40, 20, Color::WHITE);
            }
            d.draw_text(
                "WASD / ARROWS to move - M toggles map",
                10,
                window_height - 30,
                20,
                Color::new(255, 255, 255, 130),
            );
        }

        // ~60 FPS; the navigation loop runs on this fixed step
        thread::sleep(Duration::from_millis(16));
    }

    // external teardown: the session drop releases the level wholesale
    session.exit();
}
