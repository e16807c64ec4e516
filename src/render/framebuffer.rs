use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

/// CPU-side color buffer the raycaster draws into, blitted to the screen
/// once per frame through a persistent texture.
pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![background; size],
            width,
            height,
            background_color: background,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = self.current_color;
        }
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn set_current_color(&mut self, c: Color) {
        self.current_color = c;
    }

    /// Upload the pixels into a persistent RGBA8 texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        // &[Color] viewed as &[u8] without copying; Color is 4 bytes RGBA8.
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        let _ = tex.update_texture(bytes);
    }
}
