use raylib::prelude::*;

use crate::core::player::Player;
use crate::render::framebuffer::Framebuffer;
use crate::render::render3d::{FOV, lerp_color};
use crate::render::textures::TextureManager;

// On-screen pillar height for a goal one unit away, as a fraction of the
// screen height.
const SIZE_FACTOR: f32 = 1.4;

#[inline]
fn normalize_angle(mut a: f32) -> f32 {
    while a > std::f32::consts::PI {
        a -= std::f32::consts::TAU;
    }
    while a < -std::f32::consts::PI {
        a += std::f32::consts::TAU;
    }
    a
}

/// Billboard for the goal pillar, z-tested per column against the wall
/// distances. Turns white once the win has latched.
pub fn draw_goal_pillar(
    fb: &mut Framebuffer,
    player: &Player,
    texman: &TextureManager,
    zbuffer: &[f32],
    goal_x: f32,
    goal_z: f32,
    reached: bool,
) {
    let sw = fb.width as f32;
    let sh = fb.height as f32;

    let dx = goal_x - player.x;
    let dz = goal_z - player.z;
    let dist = (dx * dx + dz * dz).sqrt();
    if dist < 0.2 {
        return; // standing inside the pillar
    }

    // heading whose forward vector (sin(a+PI), cos(a+PI)) points at the
    // goal, compared against where the player is looking
    let sprite_a = dx.atan2(dz) - std::f32::consts::PI;
    let angle_diff = normalize_angle(sprite_a - player.dir);
    if angle_diff.abs() > FOV * 0.55 {
        return;
    }

    // same screen mapping as the column renderer: larger angles sit
    // further left
    let screen_x = (0.5 - angle_diff / FOV) * sw;

    let mut size = (sh / dist) * SIZE_FACTOR;
    if size > sh * 0.9 {
        size = sh * 0.9;
    }
    if size <= 1.0 {
        return;
    }
    let center_y = sh * 0.5;

    let start_x = (screen_x - size * 0.5).max(0.0) as i32;
    let end_x = (screen_x + size * 0.5).min(sw - 1.0) as i32;
    let start_y = (center_y - size * 0.5).max(0.0) as i32;
    let end_y = (center_y + size * 0.5).min(sh - 1.0) as i32;
    if end_x <= start_x || end_y <= start_y {
        return;
    }

    let (tw, th) = texman.image_size('g').unwrap_or((64, 64));

    for sx in start_x..=end_x {
        // walls in front of the pillar occlude it
        if (sx as usize) < zbuffer.len() && dist >= zbuffer[sx as usize] {
            continue;
        }
        let tx = (((sx - start_x) as f32) / (end_x - start_x + 1) as f32 * tw as f32) as u32;
        for sy in start_y..=end_y {
            let ty = (((sy - start_y) as f32) / (end_y - start_y + 1) as f32 * th as f32) as u32;
            let mut color = texman.get_pixel_color('g', tx, ty);
            if color.a < 8 {
                continue;
            }
            if reached {
                color = lerp_color(color, Color::WHITE, 0.7);
            }
            fb.set_pixel_color(sx as u32, sy as u32, color);
        }
    }
}
