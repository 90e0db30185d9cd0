//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame displacement only
//! - Seeded RNG only
//! - Stable iteration order (row-major bricks, balls and pickups by spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod balls;
pub mod bricks;
pub mod collision;
pub mod level;
pub mod paddle;
pub mod particles;
pub mod powerups;
pub mod rect;
pub mod session;
pub mod state;
pub mod tick;

pub use autopilot::idle_input;
pub use balls::{Ball, BallSimulator, BallStepReport};
pub use bricks::{Brick, BrickField, BrickId, BrickKind, BrickStatus, Destruction, HitOutcome};
pub use collision::{CollisionResult, ball_rect_collision};
pub use level::{LevelConfig, LevelProvider, LevelSet, builtin_levels};
pub use paddle::Paddle;
pub use particles::{Particle, Particles};
pub use powerups::{Effect, EffectTarget, PowerUp, PowerUpKind, PowerUpSystem};
pub use rect::Rect;
pub use session::GameSession;
pub use state::{BallView, BrickView, GameEvent, GamePhase, PowerUpView, Snapshot};
pub use tick::{TickInput, TickOutput};
