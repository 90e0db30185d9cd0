//! Collision detection and response for the rectangular field
//!
//! Ball vs walls, paddle and bricks. Responses are simple reflections and an
//! angle-steered paddle bounce; nothing here models momentum.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::PADDLE_MAX_BOUNCE_ANGLE;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at contact (pointing toward ball center)
    pub normal: Vec2,
    /// Penetration depth
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Displacement that moves the ball out of contact
    #[inline]
    pub fn push_out(&self) -> Vec2 {
        self.normal * self.penetration
    }
}

/// Velocity component flipped by a brick bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Side hit: negate `vel.x`
    Horizontal,
    /// Top/bottom hit: negate `vel.y`
    Vertical,
}

impl BounceAxis {
    #[inline]
    pub fn apply(self, vel: Vec2) -> Vec2 {
        match self {
            BounceAxis::Horizontal => Vec2::new(-vel.x, vel.y),
            BounceAxis::Vertical => Vec2::new(vel.x, -vel.y),
        }
    }
}

/// Check overlap between a ball (circle) and a rectangle
///
/// Touching counts as a hit. A center inside the rectangle reports the
/// normal of the nearest edge.
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    let offset = ball_pos - closest;
    let dist = offset.length();

    if dist > ball_radius {
        return CollisionResult::miss();
    }

    if dist > 0.0 {
        return CollisionResult {
            hit: true,
            normal: offset / dist,
            penetration: ball_radius - dist,
        };
    }

    // Center is inside the rectangle: push out through the nearest edge
    let edges = [
        (ball_pos.x - rect.left(), Vec2::NEG_X),
        (rect.right() - ball_pos.x, Vec2::X),
        (ball_pos.y - rect.top(), Vec2::NEG_Y),
        (rect.bottom() - ball_pos.y, Vec2::Y),
    ];
    let (depth, normal) = edges
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, Vec2::NEG_Y));
    CollisionResult {
        hit: true,
        normal,
        penetration: ball_radius + depth,
    }
}

/// Decide how a ball whose center lies inside `rect` bounces off it
///
/// Compares the distance from the center to the nearest vertical edge with
/// the distance to the nearest horizontal edge. The shallower penetration
/// wins; ties go to a vertical bounce. Returns `None` if the center is not
/// strictly inside the rectangle.
pub fn brick_bounce_axis(ball_pos: Vec2, rect: &Rect) -> Option<BounceAxis> {
    if !rect.contains_strict(ball_pos) {
        return None;
    }
    let overlap_x = (ball_pos.x - rect.left())
        .abs()
        .min((ball_pos.x - rect.right()).abs());
    let overlap_y = (ball_pos.y - rect.top())
        .abs()
        .min((ball_pos.y - rect.bottom()).abs());

    if overlap_x < overlap_y {
        Some(BounceAxis::Horizontal)
    } else {
        Some(BounceAxis::Vertical)
    }
}

/// Walls the ball currently crosses, as inward normals
///
/// Left, right and top walls only. The bottom of the field is open.
pub fn ball_wall_contacts(
    ball_pos: Vec2,
    ball_radius: f32,
    field_width: f32,
) -> impl Iterator<Item = Vec2> {
    [
        (ball_pos.x - ball_radius < 0.0, Vec2::X),
        (ball_pos.x + ball_radius > field_width, Vec2::NEG_X),
        (ball_pos.y - ball_radius < 0.0, Vec2::Y),
    ]
    .into_iter()
    .filter_map(|(touching, normal)| touching.then_some(normal))
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Outgoing velocity for a paddle bounce
///
/// The hit offset from the paddle center (-1 at the left end, 1 at the right)
/// maps linearly to a deflection of up to 60 degrees from straight up.
/// Magnitude is always `speed`.
pub fn paddle_bounce_velocity(ball_x: f32, paddle: &Rect, speed: f32) -> Vec2 {
    let half_width = paddle.width / 2.0;
    let offset = if half_width > 0.0 {
        ((ball_x - paddle.center().x) / half_width).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let angle = offset * PADDLE_MAX_BOUNCE_ANGLE;
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

/// Check if the ball has fallen out of the bottom of the field
#[inline]
pub fn ball_below_field(ball_pos: Vec2, ball_radius: f32, field_height: f32) -> bool {
    ball_pos.y - ball_radius > field_height
}
