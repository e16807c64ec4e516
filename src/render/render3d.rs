use raylib::prelude::*;

use crate::core::maze::Maze;
use crate::core::player::Player;
use crate::render::casters::cast_ray;
use crate::render::framebuffer::Framebuffer;
use crate::render::textures::TextureManager;

/// Horizontal field of view (90 degrees).
pub const FOV: f32 = std::f32::consts::FRAC_PI_2;

/// Scene background the fog fades into.
pub const SCENE_BG: Color = Color::new(16, 16, 21, 255);

// Fog plane distances in grid units.
const FOG_NEAR: f32 = 2.0;
const FOG_FAR: f32 = 15.0;

// Column height scale: a wall one unit away fills the screen.
const PROJ_K: f32 = 2.4;

#[inline]
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let f = |x: u8, y: u8| -> u8 { ((x as f32) * (1.0 - t) + (y as f32) * t) as u8 };
    Color::new(f(a.r, b.r), f(a.g, b.g), f(a.b, b.b), 255)
}

#[inline]
pub fn scale_color(c: Color, k: f32) -> Color {
    let s = k.max(0.0);
    let mul = |v: u8| -> u8 { ((v as f32 * s).min(255.0)) as u8 };
    Color::new(mul(c.r), mul(c.g), mul(c.b), 255)
}

/// Torch-style falloff around the player plus fog toward the scene
/// background. Applied to every wall texel.
#[inline]
fn shade(c: Color, distance: f32) -> Color {
    let torch = (1.4 / (1.0 + distance * 0.35)).min(1.0);
    let fog = ((distance - FOG_NEAR) / (FOG_FAR - FOG_NEAR)).clamp(0.0, 1.0);
    lerp_color(scale_color(c, torch), SCENE_BG, fog)
}

/// Sky above the horizon, ground below, both sampled from pixmaps.
fn paint_ceiling_and_floor(fb: &mut Framebuffer, texman: &TextureManager) {
    let w = fb.width;
    let h = fb.height;
    let hh = h / 2;
    if let Some((tw, th)) = texman.image_size('K') {
        for y in 0..hh {
            let ty = (y * th) / hh;
            for x in 0..w {
                let tx = (x * tw) / w;
                fb.set_pixel_color(x, y, texman.get_pixel_color('K', tx, ty.min(th - 1)));
            }
        }
    }
    if let Some((tw, th)) = texman.image_size('G') {
        for y in hh..h {
            let ty = ((y - hh) * th) / (h - hh);
            for x in 0..w {
                let tx = (x * tw) / w;
                fb.set_pixel_color(x, y, texman.get_pixel_color('G', tx.min(tw - 1), ty.min(th - 1)));
            }
        }
    }
}

/// Column renderer: one ray per framebuffer x, fisheye-corrected, wall
/// texels shaded by torch falloff and fog. Fills `zbuffer` with marched
/// distances for the sprite pass.
pub fn render_3d(
    fb: &mut Framebuffer,
    maze: &Maze,
    player: &Player,
    texman: &TextureManager,
    zbuffer: &mut [f32],
) {
    let w = fb.width as usize;
    let h = fb.height as f32;
    let hh = h * 0.5;

    paint_ceiling_and_floor(fb, texman);

    let (tw, th) = texman.image_size('#').unwrap_or((64, 64));

    for (i, z) in zbuffer.iter_mut().enumerate().take(w) {
        let t = i as f32 / w as f32;
        // leftmost column looks furthest counterclockwise
        let ray_a = player.dir + FOV * 0.5 - FOV * t;

        let Some(hit) = cast_ray(maze, player.x, player.z, ray_a) else {
            *z = f32::INFINITY;
            continue;
        };
        *z = hit.distance;

        let rel = ray_a - player.dir;
        let corrected = (hit.distance * rel.cos()).max(1e-4);

        let col_h = (hh * PROJ_K) / corrected;
        let y0 = (hh - col_h * 0.5).max(0.0) as u32;
        let y1 = (hh + col_h * 0.5).min(h - 1.0) as u32;
        let x = i as u32;

        let tx = (hit.tex_u * tw as f32).clamp(0.0, tw as f32 - 1.0) as u32;
        for y in y0..=y1 {
            let v = ((y - y0) as f32) / ((y1 - y0 + 1) as f32);
            let ty = (v * th as f32).clamp(0.0, th as f32 - 1.0) as u32;
            let texel = texman.get_pixel_color('#', tx, ty);
            fb.set_pixel_color(x, y, shade(texel, corrected));
        }
    }
}
