//! Brickfall - a deterministic brick-breaker simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, bricks, power-ups, session)
//! - `tuning`: Data-driven game balance
//! - `error`: Error taxonomy for the fallible boundary (config, levels, commands)
//!
//! Rendering, audio and input devices live in the host. The host calls
//! [`sim::GameSession::step`] once per frame and draws the returned snapshot.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Field dimensions (internal resolution)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_MAX_WIDTH: f32 = 200.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Top edge of the paddle, measured from the top of the field
    pub const PADDLE_Y: f32 = FIELD_HEIGHT - 40.0;
    /// Gap between a waiting ball and the paddle surface
    pub const BALL_REST_GAP: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Displacement per frame before the level speed multiplier
    pub const BASE_SPEED: f32 = 6.0;
    /// Half-width of the launch cone around straight up (45 degrees)
    pub const LAUNCH_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    /// Maximum deflection from vertical on a paddle bounce (60 degrees)
    pub const PADDLE_MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Brick grid layout
    pub const BRICK_ROW_COUNT: usize = 6;
    pub const BRICK_COLUMN_COUNT: usize = 10;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_WIDTH: f32 = (FIELD_WIDTH
        - BRICK_OFFSET_LEFT * 2.0
        - BRICK_PADDING * (BRICK_COLUMN_COUNT as f32 - 1.0))
        / BRICK_COLUMN_COUNT as f32;
    /// Hits needed to break a HARD brick
    pub const HARD_BRICK_HEALTH: u8 = 3;
    /// Bricks whose centers lie within this distance of a detonation are destroyed
    pub const EXPLOSION_RADIUS: f32 = 100.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_SPEED: f32 = 3.0;
    pub const POWERUP_CHANCE: f32 = 0.15;
    pub const EXTEND_INCREMENT: f32 = 40.0;
    /// Heading offset of each ball spawned by MULTIBALL (radians)
    pub const MULTIBALL_ANGLE: f32 = 0.5;

    /// Session bookkeeping
    pub const STARTING_LIVES: u32 = 3;
    pub const LEVEL_BONUS: u64 = 500;
    pub const VICTORY_BONUS: u64 = 1000;

    /// Cosmetic particles
    pub const MAX_PARTICLES: usize = 256;
}

/// Rotate a vector by `angle` radians (counter-clockwise in y-up terms,
/// clockwise on a y-down screen)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Unit vector pointing along `angle`, measured from +x toward +y (screen down)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_brick_width_fills_grid() {
        let row = consts::BRICK_OFFSET_LEFT * 2.0
            + consts::BRICK_WIDTH * consts::BRICK_COLUMN_COUNT as f32
            + consts::BRICK_PADDING * (consts::BRICK_COLUMN_COUNT as f32 - 1.0);
        assert!((row - consts::FIELD_WIDTH).abs() < 0.001);
        assert!((consts::BRICK_WIDTH - 64.0).abs() < 0.001);
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vec2::new(3.0, -4.0);
        let r = rotate(v, 0.5);
        assert!((r.length() - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_heading_up_is_negative_y() {
        let up = heading(-FRAC_PI_2);
        assert!(up.x.abs() < 0.0001);
        assert!((up.y + 1.0).abs() < 0.0001);
    }
}
