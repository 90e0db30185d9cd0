//! Falling power-ups and their effects
//!
//! Destroyed bricks may drop a pickup. Pickups fall straight down; touching
//! the paddle captures them, falling past the bottom discards them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::balls::BallSimulator;
use super::paddle::Paddle;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Wider paddle
    Extend,
    /// Two extra balls
    MultiBall,
    /// One extra life
    Life,
}

impl PowerUpKind {
    /// Weighted draw from a uniform roll in `[0, 1)`:
    /// 40% multiball, 10% life, 50% extend
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.4 {
            PowerUpKind::MultiBall
        } else if roll > 0.9 {
            PowerUpKind::Life
        } else {
            PowerUpKind::Extend
        }
    }

    /// The effect this pickup applies when captured
    pub fn effect(self, tuning: &Tuning) -> Effect {
        match self {
            PowerUpKind::Extend => Effect::GrowPaddle(tuning.extend_increment),
            PowerUpKind::MultiBall => Effect::SplitBall(tuning.multiball_angle),
            PowerUpKind::Life => Effect::ExtraLife,
        }
    }

    /// Display color, 0xRRGGBB
    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::Extend => 0x3b82f6,
            PowerUpKind::MultiBall => 0xeab308,
            PowerUpKind::Life => 0xec4899,
        }
    }
}

/// A captured power-up's effect on the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Widen the paddle by this many units (capped at max width)
    GrowPaddle(f32),
    /// Split the primary ball, new headings offset by this many radians
    SplitBall(f32),
    /// Add a life
    ExtraLife,
}

/// Mutable session state an effect may touch
pub struct EffectTarget<'a> {
    pub paddle: &'a mut Paddle,
    pub balls: &'a mut BallSimulator,
    pub lives: &'a mut u32,
}

impl Effect {
    /// Apply the effect. This is the only place pickups change session state.
    pub fn apply(self, target: EffectTarget<'_>) {
        match self {
            Effect::GrowPaddle(delta) => target.paddle.grow(delta),
            Effect::SplitBall(delta) => {
                target.balls.split_from_primary(delta);
            }
            Effect::ExtraLife => *target.lives = target.lives.saturating_add(1),
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Fall distance per tick
    pub fall_speed: f32,
    pub active: bool,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// Owns the live set of pickups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpSystem {
    pickups: Vec<PowerUp>,
    chance: f32,
    size: f32,
    fall_speed: f32,
    field_height: f32,
    next_id: u32,
}

impl PowerUpSystem {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pickups: Vec::new(),
            chance: tuning.powerup_chance,
            size: tuning.powerup_size,
            fall_speed: tuning.powerup_speed,
            field_height: tuning.field_height,
            next_id: 1,
        }
    }

    pub fn pickups(&self) -> &[PowerUp] {
        &self.pickups
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    /// Roll for a drop at a destroyed brick's center. Returns the kind spawned.
    pub fn maybe_spawn(&mut self, center: Vec2, rng: &mut impl Rng) -> Option<PowerUpKind> {
        let chance_roll: f32 = rng.random();
        if chance_roll >= self.chance {
            return None;
        }
        let kind = PowerUpKind::from_roll(rng.random());
        self.spawn(kind, center);
        Some(kind)
    }

    /// Spawn a pickup of `kind` centered on `center`
    pub fn spawn(&mut self, kind: PowerUpKind, center: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let rect = Rect::centered(center, self.size, self.size);
        self.pickups.push(PowerUp {
            id,
            kind,
            pos: Vec2::new(rect.x, rect.y),
            size: self.size,
            fall_speed: self.fall_speed,
            active: true,
        });
        id
    }

    /// Move pickups down one tick, capture those touching the paddle and
    /// discard those below the field. Returns captured kinds in spawn order.
    pub fn update(&mut self, paddle: &Rect) -> Vec<PowerUpKind> {
        let mut captured = Vec::new();
        for pickup in self.pickups.iter_mut().filter(|p| p.active) {
            pickup.pos.y += pickup.fall_speed;

            if pickup.rect().intersects(paddle) {
                pickup.active = false;
                captured.push(pickup.kind);
            } else if pickup.pos.y > self.field_height {
                pickup.active = false;
            }
        }
        self.pickups.retain(|p| p.active);
        captured
    }

    /// Drop every pending pickup (life lost)
    pub fn clear(&mut self) {
        self.pickups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_from_roll_weights() {
        assert_eq!(PowerUpKind::from_roll(0.0), PowerUpKind::MultiBall);
        assert_eq!(PowerUpKind::from_roll(0.399), PowerUpKind::MultiBall);
        assert_eq!(PowerUpKind::from_roll(0.4), PowerUpKind::Extend);
        assert_eq!(PowerUpKind::from_roll(0.9), PowerUpKind::Extend);
        assert_eq!(PowerUpKind::from_roll(0.95), PowerUpKind::Life);
    }

    #[test]
    fn test_spawn_is_centered_on_brick() {
        let mut system = PowerUpSystem::new(&Tuning::default());
        system.spawn(PowerUpKind::Life, Vec2::new(67.0, 72.5));
        let pickup = &system.pickups()[0];
        assert_eq!(pickup.rect().center(), Vec2::new(67.0, 72.5));
        assert_eq!(pickup.fall_speed, 3.0);
    }

    #[test]
    fn test_chance_zero_never_spawns() {
        let tuning = Tuning {
            powerup_chance: 0.0,
            ..Default::default()
        };
        let mut system = PowerUpSystem::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            assert!(system.maybe_spawn(Vec2::new(100.0, 100.0), &mut rng).is_none());
        }
    }

    #[test]
    fn test_chance_one_always_spawns() {
        let tuning = Tuning {
            powerup_chance: 1.0,
            ..Default::default()
        };
        let mut system = PowerUpSystem::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..20 {
            assert!(system.maybe_spawn(Vec2::new(100.0, 100.0), &mut rng).is_some());
        }
        assert_eq!(system.len(), 20);
    }

    #[test]
    fn test_falls_and_is_captured() {
        let tuning = Tuning::default();
        let paddle = Paddle::new(&tuning);
        let mut system = PowerUpSystem::new(&tuning);
        // Bottom edge 4 units above the paddle top
        system.spawn(PowerUpKind::Extend, Vec2::new(400.0, paddle.y - 14.0));

        let captured = system.update(&paddle.rect());
        assert!(captured.is_empty());
        assert_eq!(system.len(), 1);

        let captured = system.update(&paddle.rect());
        assert_eq!(captured, vec![PowerUpKind::Extend]);
        assert!(system.is_empty());
    }

    #[test]
    fn test_missed_pickup_expires() {
        let tuning = Tuning::default();
        let paddle = Paddle::new(&tuning);
        let mut system = PowerUpSystem::new(&tuning);
        system.spawn(PowerUpKind::Life, Vec2::new(50.0, 595.0));
        // Top edge at 585 -> 588 -> ... passes 600 after 6 ticks
        for _ in 0..5 {
            assert!(system.update(&paddle.rect()).is_empty());
        }
        assert_eq!(system.len(), 1);
        assert!(system.update(&paddle.rect()).is_empty());
        assert!(system.is_empty());
    }

    #[test]
    fn test_effects_apply() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        let mut balls = BallSimulator::new(&tuning, 1.0, &paddle);
        let mut lives = 2;

        PowerUpKind::Extend.effect(&tuning).apply(EffectTarget {
            paddle: &mut paddle,
            balls: &mut balls,
            lives: &mut lives,
        });
        assert_eq!(paddle.width, 160.0);

        PowerUpKind::Life.effect(&tuning).apply(EffectTarget {
            paddle: &mut paddle,
            balls: &mut balls,
            lives: &mut lives,
        });
        assert_eq!(lives, 3);

        PowerUpKind::MultiBall.effect(&tuning).apply(EffectTarget {
            paddle: &mut paddle,
            balls: &mut balls,
            lives: &mut lives,
        });
        assert_eq!(balls.active_count(), 2);
    }
}
