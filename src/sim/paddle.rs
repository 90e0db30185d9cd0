//! The player's paddle
//!
//! Horizontal position comes from the host as an absolute target; width is
//! changed by power-ups and restored when a life is lost.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// The player's paddle (position is the top-left corner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed for the whole level)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    default_width: f32,
    max_width: f32,
    field_width: f32,
}

impl Paddle {
    /// A default-width paddle centered in the field
    pub fn new(tuning: &Tuning) -> Self {
        let mut paddle = Self {
            x: 0.0,
            y: tuning.paddle_y,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            default_width: tuning.paddle_width,
            max_width: tuning.paddle_max_width,
            field_width: tuning.field_width,
        };
        paddle.center_in_field();
        paddle
    }

    /// Get the paddle bounds for collision detection
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Horizontal center
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Move so the paddle center sits at `target_x`, keeping the whole paddle
    /// inside `[0, field_width]`. Non-finite targets are ignored.
    pub fn set_target_x(&mut self, target_x: f32) {
        if !target_x.is_finite() {
            return;
        }
        let half = self.width / 2.0;
        let center = target_x.clamp(half, (self.field_width - half).max(half));
        self.x = center - half;
    }

    /// Widen the paddle by `delta`, capped at the maximum width.
    /// The center is kept and then clamped back into the field.
    pub fn grow(&mut self, delta: f32) {
        let center = self.center_x();
        self.width = (self.width + delta.max(0.0)).min(self.max_width);
        self.set_target_x(center);
    }

    /// Restore the default width (on life loss)
    pub fn reset_width(&mut self) {
        let center = self.center_x();
        self.width = self.default_width;
        self.set_target_x(center);
    }

    /// Put the paddle back in the middle of the field
    pub fn center_in_field(&mut self) {
        self.x = (self.field_width - self.width) / 2.0;
    }

    pub fn default_width(&self) -> f32 {
        self.default_width
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_paddle_is_centered() {
        let paddle = Paddle::new(&Tuning::default());
        assert_eq!(paddle.x, 340.0);
        assert_eq!(paddle.center_x(), 400.0);
        assert_eq!(paddle.y, 560.0);
    }

    #[test]
    fn test_set_target_x_clamps_to_field() {
        let mut paddle = Paddle::new(&Tuning::default());

        paddle.set_target_x(-500.0);
        assert_eq!(paddle.x, 0.0);

        paddle.set_target_x(10_000.0);
        assert_eq!(paddle.x + paddle.width, 800.0);

        paddle.set_target_x(250.0);
        assert_eq!(paddle.center_x(), 250.0);

        paddle.set_target_x(f32::NAN);
        assert_eq!(paddle.center_x(), 250.0);
    }

    #[test]
    fn test_grow_caps_at_max_width() {
        let mut paddle = Paddle::new(&Tuning::default());
        paddle.grow(40.0);
        assert_eq!(paddle.width, 160.0);
        paddle.grow(40.0);
        assert_eq!(paddle.width, 200.0);
        paddle.grow(40.0);
        assert_eq!(paddle.width, 200.0);
    }

    #[test]
    fn test_grow_at_wall_stays_inside() {
        let mut paddle = Paddle::new(&Tuning::default());
        paddle.set_target_x(800.0);
        paddle.grow(40.0);
        assert!(paddle.x >= 0.0);
        assert!(paddle.x + paddle.width <= 800.0);
    }

    #[test]
    fn test_reset_width() {
        let mut paddle = Paddle::new(&Tuning::default());
        paddle.grow(80.0);
        paddle.reset_width();
        assert_eq!(paddle.width, paddle.default_width());
    }
}
