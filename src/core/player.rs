//! Player pose and fixed per-frame movement tuning.

/// Heading change per frame while a turn key is held (radians).
pub const TURN_STEP: f32 = 0.05;
/// Forward displacement per frame while walking (grid units).
pub const WALK_SPEED: f32 = 0.1;
/// Backward displacement per frame, applied negatively.
pub const BACK_SPEED: f32 = 0.05;
/// Collision padding around the player center.
pub const PLAYER_RADIUS: f32 = 0.3;

/// Continuous pose in grid-cell units. Owned and mutated exclusively by
/// the session loop; the renderer borrows it read-only each frame.
#[derive(Copy, Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub z: f32,
    /// Yaw in radians. The camera forward vector is
    /// (sin(dir + PI), cos(dir + PI)).
    pub dir: f32,
}

impl Player {
    /// Spawn at the center of the carving start cell (1, 1).
    pub fn at_start() -> Self {
        Self {
            x: 1.5,
            z: 1.5,
            dir: 0.0,
        }
    }
}
