use raylib::prelude::*;
use std::collections::HashMap;

/// Immutable CPU pixmap, sampled per pixel without touching raylib images.
#[derive(Clone)]
struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        Self { w, h, px }
    }

    #[inline]
    fn sample(&self, x: u32, y: u32) -> Color {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[(yi * self.w as usize) + xi]
    }
}

/// Procedural pixmaps keyed by char:
/// `'#'` wall bricks, `'g'` goal beacon, `'K'` sky, `'G'` ground.
/// The crate ships no image assets, every map is generated here.
pub struct TextureManager {
    maps: HashMap<char, Pixmap>,
}

impl TextureManager {
    pub fn new() -> Self {
        let mut maps = HashMap::new();
        maps.insert('#', Self::wall_bricks());
        maps.insert('g', Self::goal_beacon());
        maps.insert('K', Self::sky_gradient());
        maps.insert('G', Self::ground_gradient());
        Self { maps }
    }

    #[inline]
    pub fn get_pixel_color(&self, key: char, x: u32, y: u32) -> Color {
        match self.maps.get(&key) {
            Some(pm) => pm.sample(x, y),
            None => Color::MAGENTA, // unknown key stands out instead of hiding
        }
    }

    #[inline]
    pub fn image_size(&self, key: char) -> Option<(u32, u32)> {
        self.maps.get(&key).map(|pm| (pm.w, pm.h))
    }

    fn mix(a: Color, b: Color, t: u8) -> Color {
        let tt = t as u32;
        let f = |x: u8, y: u8| -> u8 { ((x as u32 * (255 - tt) + y as u32 * tt) / 255) as u8 };
        Color::new(f(a.r, b.r), f(a.g, b.g), f(a.b, b.b), 255)
    }

    /// Blue bricks with darker mortar lines, the scene's wall material.
    fn wall_bricks() -> Pixmap {
        let (w, h) = (64u32, 64u32);
        let base = Color::new(68, 68, 255, 255);
        let dark = Color::new(34, 34, 140, 255);
        let mortar = Color::new(18, 18, 60, 255);
        let mut px = vec![base; (w * h) as usize];
        for y in 0..h {
            let row = y / 16;
            for x in 0..w {
                // offset every other brick row by half a brick
                let bx = x + if row % 2 == 0 { 0 } else { 16 };
                let on_mortar = y % 16 < 2 || bx % 32 < 2;
                let c = if on_mortar {
                    mortar
                } else {
                    // stable per-texel dither so bricks are not flat
                    let n = ((x.wrapping_mul(31)) ^ (y.wrapping_mul(17))) % 48;
                    Self::mix(base, dark, n as u8)
                };
                px[(y * w + x) as usize] = c;
            }
        }
        Pixmap::new(w, h, px)
    }

    /// Bright green pillar with a pulsing-looking vertical core stripe.
    fn goal_beacon() -> Pixmap {
        let (w, h) = (64u32, 64u32);
        let edge = Color::new(0, 120, 40, 255);
        let core = Color::new(40, 255, 90, 255);
        let mut px = vec![Color::new(0, 0, 0, 0); (w * h) as usize];
        for y in 0..h {
            for x in 0..w {
                // narrow pillar: transparent gutters left and right
                let d = (x as i32 - w as i32 / 2).abs() as u32;
                if d > 12 {
                    continue;
                }
                let t = (d * 255 / 12) as u8;
                px[(y * w + x) as usize] = Self::mix(core, edge, t);
            }
        }
        Pixmap::new(w, h, px)
    }

    fn sky_gradient() -> Pixmap {
        let (w, h) = (256u32, 128u32);
        let top = Color::new(10, 10, 14, 255);
        let horizon = Color::new(22, 22, 32, 255);
        let mut px = vec![Color::BLACK; (w * h) as usize];
        for y in 0..h {
            let t = (y * 255 / (h - 1)) as u8;
            let col = Self::mix(top, horizon, t);
            for x in 0..w {
                px[(y * w + x) as usize] = col;
            }
        }
        Pixmap::new(w, h, px)
    }

    fn ground_gradient() -> Pixmap {
        let (w, h) = (256u32, 128u32);
        let far = Color::new(20, 20, 22, 255);
        let near = Color::new(44, 44, 48, 255);
        let mut px = vec![Color::BLACK; (w * h) as usize];
        for y in 0..h {
            let t = (y * 255 / (h - 1)) as u8;
            let col = Self::mix(far, near, t);
            for x in 0..w {
                px[(y * w + x) as usize] = col;
            }
        }
        Pixmap::new(w, h, px)
    }
}
