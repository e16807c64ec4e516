use crate::core::maze::Maze;

/// March step in grid units. Small enough that thin wall corners at the
/// 15-unit fog range cannot be skipped over.
pub const RAY_STEP: f32 = 0.01;
/// Rays stop at the fog far plane; nothing beyond it is visible anyway.
pub const MAX_RANGE: f32 = 15.0;

pub struct Intersect {
    pub distance: f32,
    /// Horizontal texture coordinate in [0, 1), taken from the hit
    /// fraction along the wall face.
    pub tex_u: f32,
}

/// Incremental ray march from `(ox, oz)` along heading `a`, using the
/// same `a + PI` forward convention as the navigation loop. Returns None
/// when the ray leaves the fog range without touching a solid cell.
pub fn cast_ray(maze: &Maze, ox: f32, oz: f32, a: f32) -> Option<Intersect> {
    let dir_x = (a + std::f32::consts::PI).sin();
    let dir_z = (a + std::f32::consts::PI).cos();

    let mut d = 0.0;
    while d < MAX_RANGE {
        let wx = ox + dir_x * d;
        let wz = oz + dir_z * d;
        if maze.is_solid_world(wx, wz) {
            let fx = wx.fract().abs();
            let fz = wz.fract().abs();
            // whichever axis we are closer to a cell edge on decides the
            // face, the other fraction runs along it
            let edge_x = fx.min(1.0 - fx);
            let edge_z = fz.min(1.0 - fz);
            let tex_u = if edge_x < edge_z { fz } else { fx };
            return Some(Intersect {
                distance: d,
                tex_u,
            });
        }
        d += RAY_STEP;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::{GRID_SIZE, generate};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ray_from_start_cell_hits_within_range() {
        let maze = generate(GRID_SIZE, &mut StdRng::seed_from_u64(3)).unwrap();
        // Heading 0 from the start cell looks at the border wall one cell
        // away; the hit distance is the gap to the z=1.0 face.
        let hit = cast_ray(&maze, 1.5, 1.5, 0.0).expect("border must stop the ray");
        assert!((hit.distance - 0.5).abs() < 2.0 * RAY_STEP, "d = {}", hit.distance);
        assert!(hit.tex_u >= 0.0 && hit.tex_u < 1.0);
    }

    #[test]
    fn rays_never_escape_the_grid() {
        let maze = generate(GRID_SIZE, &mut StdRng::seed_from_u64(9)).unwrap();
        for k in 0..64 {
            let a = k as f32 * std::f32::consts::TAU / 64.0;
            let hit = cast_ray(&maze, 1.5, 1.5, a).expect("closed border");
            assert!(hit.distance < GRID_SIZE as f32 * 1.5);
        }
    }
}
