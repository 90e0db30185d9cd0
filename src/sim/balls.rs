//! Ball population, integration and collision resolution
//!
//! The population is either a single waiting ball riding on the paddle or
//! one or more active balls. Active balls move by their velocity once per
//! tick, then resolve walls, paddle and bricks in that order.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bricks::{BrickField, HitOutcome};
use super::collision::{
    ball_below_field, ball_rect_collision, ball_wall_contacts, brick_bounce_axis,
    paddle_bounce_velocity, reflect_velocity,
};
use super::paddle::Paddle;
use crate::consts::LAUNCH_HALF_ANGLE;
use crate::tuning::Tuning;
use crate::{heading, rotate};

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed magnitude; kept equal to `vel.length()` across bounces
    pub speed: f32,
    /// `false` while waiting on the paddle for launch
    pub active: bool,
}

impl Ball {
    /// An inactive ball waiting for launch
    pub fn waiting(id: u32, radius: f32, speed: f32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            speed,
            active: false,
        }
    }

    /// Pin a waiting ball just above the paddle center
    pub fn rest_on(&mut self, paddle: &Paddle, gap: f32) {
        self.pos = Vec2::new(paddle.center_x(), paddle.y - self.radius - gap);
    }

    /// Heading in radians (screen space, +y down). Straight up for a ball at rest.
    pub fn heading(&self) -> f32 {
        if self.vel.length_squared() > 0.0 {
            self.vel.y.atan2(self.vel.x)
        } else {
            -std::f32::consts::FRAC_PI_2
        }
    }
}

/// What happened to the balls during one tick
#[derive(Debug, Default)]
pub struct BallStepReport {
    /// Brick hits that did something, in resolution order
    pub hits: Vec<HitOutcome>,
    pub wall_bounces: u32,
    pub paddle_bounces: u32,
    /// The tick started with active balls and ended with none
    pub balls_lost: bool,
}

/// Owns the live ball population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSimulator {
    balls: Vec<Ball>,
    radius: f32,
    /// Launch speed for this level (base speed times level multiplier)
    launch_speed: f32,
    rest_gap: f32,
    field_width: f32,
    field_height: f32,
    next_id: u32,
}

impl BallSimulator {
    /// One waiting ball resting on `paddle`
    pub fn new(tuning: &Tuning, speed_multiplier: f32, paddle: &Paddle) -> Self {
        let mut sim = Self {
            balls: Vec::new(),
            radius: tuning.ball_radius,
            launch_speed: tuning.base_speed * speed_multiplier,
            rest_gap: tuning.ball_rest_gap,
            field_width: tuning.field_width,
            field_height: tuning.field_height,
            next_id: 0,
        };
        sim.reset_to_waiting(paddle);
        sim
    }

    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Direct access for scripted scenarios and tools
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn launch_speed(&self) -> f32 {
        self.launch_speed
    }

    /// True while the single ball sits on the paddle awaiting launch
    pub fn is_waiting(&self) -> bool {
        matches!(self.balls.as_slice(), [ball] if !ball.active)
    }

    pub fn active_count(&self) -> usize {
        self.balls.iter().filter(|b| b.active).count()
    }

    /// Replace the population with one waiting ball on the paddle
    pub fn reset_to_waiting(&mut self, paddle: &Paddle) {
        let id = self.next_ball_id();
        let mut ball = Ball::waiting(id, self.radius, self.launch_speed);
        ball.rest_on(paddle, self.rest_gap);
        self.balls.clear();
        self.balls.push(ball);
    }

    /// Keep a waiting ball on top of the paddle
    pub fn follow_paddle(&mut self, paddle: &Paddle) {
        if self.is_waiting() {
            let gap = self.rest_gap;
            for ball in &mut self.balls {
                ball.rest_on(paddle, gap);
            }
        }
    }

    /// Launch the waiting ball somewhere inside the 90 degree cone around
    /// straight up. Returns `false` (and does nothing) if no ball is waiting.
    pub fn launch(&mut self, rng: &mut impl Rng) -> bool {
        if !self.is_waiting() {
            return false;
        }
        let offset = rng.random_range(-LAUNCH_HALF_ANGLE..=LAUNCH_HALF_ANGLE);
        let angle = -std::f32::consts::FRAC_PI_2 + offset;
        let ball = &mut self.balls[0];
        ball.vel = heading(angle) * ball.speed;
        ball.active = true;
        true
    }

    /// Spawn two balls from the primary ball (first active ball, or the
    /// waiting ball), heading `delta` radians either side of its heading.
    ///
    /// Splitting a waiting ball launches the pair straight off the paddle and
    /// drops the waiting ball, so the population is all-active afterwards.
    pub fn split_from_primary(&mut self, delta: f32) -> usize {
        let Some(source) = self
            .balls
            .iter()
            .find(|b| b.active)
            .or_else(|| self.balls.first())
            .cloned()
        else {
            return 0;
        };

        if !source.active {
            self.balls.retain(|b| b.active);
        }

        let base = heading(source.heading());
        for offset in [delta, -delta] {
            let id = self.next_ball_id();
            self.balls.push(Ball {
                id,
                pos: source.pos,
                vel: rotate(base, offset) * source.speed,
                radius: source.radius,
                speed: source.speed,
                active: true,
            });
        }
        2
    }

    /// Advance every active ball one tick and resolve its collisions
    pub fn step(&mut self, paddle: &Paddle, bricks: &mut BrickField) -> BallStepReport {
        let mut report = BallStepReport::default();
        if self.is_waiting() {
            self.follow_paddle(paddle);
            return report;
        }

        let started_with = self.active_count();
        let paddle_rect = paddle.rect();

        for ball in self.balls.iter_mut().filter(|b| b.active) {
            ball.pos += ball.vel;

            // 1. Walls: only flip when moving into the wall
            for normal in ball_wall_contacts(ball.pos, ball.radius, self.field_width) {
                if ball.vel.dot(normal) < 0.0 {
                    ball.vel = reflect_velocity(ball.vel, normal);
                    report.wall_bounces += 1;
                }
            }

            // 2. Paddle: push out of the paddle, steer by hit offset, keep speed
            let contact = ball_rect_collision(ball.pos, ball.radius, &paddle_rect);
            if ball.vel.y > 0.0 && contact.hit {
                ball.pos += contact.push_out();
                let speed = ball.vel.length();
                ball.vel = paddle_bounce_velocity(ball.pos.x, &paddle_rect, speed);
                ball.speed = speed;
                report.paddle_bounces += 1;
            }

            // 3. Bricks: every brick containing the center, one bounce each
            for id in bricks.active_containing(ball.pos) {
                let Some(brick) = bricks.get(id) else {
                    continue;
                };
                // An earlier hit this tick may have blown it up
                if !brick.is_active() {
                    continue;
                }
                if let Some(axis) = brick_bounce_axis(ball.pos, &brick.rect) {
                    ball.vel = axis.apply(ball.vel);
                }
                let outcome = bricks.apply_hit(id, false);
                if !outcome.is_miss() {
                    report.hits.push(outcome);
                }
            }
        }

        // 4. Loss: remove balls that fell out of the bottom
        let field_height = self.field_height;
        self.balls
            .retain(|b| b.active && !ball_below_field(b.pos, b.radius, field_height));

        report.balls_lost = started_with > 0 && self.balls.is_empty();
        report
    }
}
