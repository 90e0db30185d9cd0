//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. Defaults
//! mirror [`crate::consts`]; a JSON document may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Gameplay tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_max_width: f32,
    pub paddle_height: f32,
    /// Top edge of the paddle
    pub paddle_y: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Per-frame speed before the level multiplier
    pub base_speed: f32,
    /// Gap between a waiting ball and the paddle surface
    pub ball_rest_gap: f32,

    // === Bricks ===
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,
    pub brick_height: f32,
    /// Columns the grid is laid out for (brick width is derived from this)
    pub brick_columns: usize,
    pub explosion_radius: f32,

    // === Power-ups ===
    pub powerup_size: f32,
    pub powerup_speed: f32,
    /// Probability (0-1) that a destroyed brick drops a power-up
    pub powerup_chance: f32,
    pub extend_increment: f32,
    pub multiball_angle: f32,

    // === Session ===
    pub starting_lives: u32,
    pub level_bonus: u64,
    pub victory_bonus: u64,

    // === Cosmetics ===
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_max_width: PADDLE_MAX_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y: PADDLE_Y,

            ball_radius: BALL_RADIUS,
            base_speed: BASE_SPEED,
            ball_rest_gap: BALL_REST_GAP,

            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,
            brick_height: BRICK_HEIGHT,
            brick_columns: BRICK_COLUMN_COUNT,
            explosion_radius: EXPLOSION_RADIUS,

            powerup_size: POWERUP_SIZE,
            powerup_speed: POWERUP_SPEED,
            powerup_chance: POWERUP_CHANCE,
            extend_increment: EXTEND_INCREMENT,
            multiball_angle: MULTIBALL_ANGLE,

            starting_lives: STARTING_LIVES,
            level_bonus: LEVEL_BONUS,
            victory_bonus: VICTORY_BONUS,

            max_particles: MAX_PARTICLES,
        }
    }
}

impl Tuning {
    /// Brick width so that `brick_columns` bricks plus padding span the field
    /// between the left and right offsets
    pub fn brick_width(&self) -> f32 {
        let columns = self.brick_columns.max(1) as f32;
        (self.field_width - self.brick_offset_left * 2.0 - self.brick_padding * (columns - 1.0))
            / columns
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("base_speed", self.base_speed),
            ("brick_height", self.brick_height),
            ("powerup_size", self.powerup_size),
            ("powerup_speed", self.powerup_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidTuning(format!("{name} must be positive, got {value}")));
            }
        }
        if self.paddle_max_width < self.paddle_width {
            return Err(Error::InvalidTuning(format!(
                "paddle_max_width {} is below paddle_width {}",
                self.paddle_max_width, self.paddle_width
            )));
        }
        if self.paddle_max_width > self.field_width {
            return Err(Error::InvalidTuning(format!(
                "paddle_max_width {} exceeds field_width {}",
                self.paddle_max_width, self.field_width
            )));
        }
        if !(0.0..=1.0).contains(&self.powerup_chance) {
            return Err(Error::InvalidTuning(format!(
                "powerup_chance must be within 0..=1, got {}",
                self.powerup_chance
            )));
        }
        if self.brick_columns == 0 || self.brick_width() <= 0.0 {
            return Err(Error::InvalidTuning("brick grid does not fit the field".to_string()));
        }
        if self.starting_lives == 0 {
            return Err(Error::InvalidTuning("starting_lives must be at least 1".to_string()));
        }
        Ok(())
    }
}
