//! Session phase, events and read-only snapshot types
//!
//! Everything the host sees after a tick is defined here. All of it is
//! serializable so a host (or a test) can dump a frame as JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::balls::Ball;
use super::bricks::{Brick, BrickKind};
use super::particles::Particle;
use super::powerups::{PowerUp, PowerUpKind};
use super::rect::Rect;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start()`
    Menu,
    /// Active gameplay (ball waiting on the paddle or in flight)
    Playing,
    /// Field cleared, waiting for `next_level()`
    LevelComplete,
    /// Out of lives
    GameOver,
    /// Final level cleared
    Victory,
}

impl GamePhase {
    /// Phases that only `restart()` can leave
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Game events for audio/visual feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball left the paddle
    BallLaunched,
    /// Ball bounced off a side wall or the ceiling
    WallBounce,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Brick took a hit but survived
    BrickDamaged { position: Vec2, health: u8 },
    /// Brick destroyed (by a ball or a blast)
    BrickDestroyed { position: Vec2, color: u32 },
    /// An explosive brick went off
    ExplosionTriggered { position: Vec2 },
    /// A pickup dropped from a destroyed brick
    PowerUpSpawned { kind: PowerUpKind, position: Vec2 },
    /// Paddle caught a pickup
    PowerUpCaptured { kind: PowerUpKind },
    /// Last ball fell out of the field
    LifeLost,
    /// No lives left
    GameOver,
    /// Field cleared with more levels to go
    LevelCleared { bonus: u64 },
    /// Final level cleared
    Victory { bonus: u64 },
}

/// Ball as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            pos: ball.pos,
            radius: ball.radius,
            active: ball.active,
        }
    }
}

/// Active brick as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub rect: Rect,
    pub color: u32,
    pub kind: BrickKind,
    /// 0.0 for an untouched brick, approaching 1.0 as it takes hits
    pub damage: f32,
}

impl From<&Brick> for BrickView {
    fn from(brick: &Brick) -> Self {
        Self {
            rect: brick.rect,
            color: brick.color,
            kind: brick.kind,
            damage: 1.0 - brick.health_fraction(),
        }
    }
}

/// Falling pickup as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub color: u32,
}

impl From<&PowerUp> for PowerUpView {
    fn from(pickup: &PowerUp) -> Self {
        Self {
            rect: pickup.rect(),
            kind: pickup.kind,
            color: pickup.kind.color(),
        }
    }
}

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level_index: usize,
    pub level_name: String,
    pub balls: Vec<BallView>,
    pub paddle: Rect,
    pub bricks: Vec<BrickView>,
    pub power_ups: Vec<PowerUpView>,
    pub particles: Vec<Particle>,
}
