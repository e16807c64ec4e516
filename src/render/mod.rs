//! Rendering utilities and 3D renderer.
//!
//! Re-exports:
//! - `framebuffer`: CPU framebuffer and texture blit
//! - `textures`: Procedural pixmap manager
//! - `casters`: Ray marching against the grid
//! - `render3d`: Column renderer for walls and scene
//! - `sprites`: Goal pillar billboard

pub mod casters;
pub mod framebuffer;
pub mod render3d;
pub mod sprites;
pub mod textures;
