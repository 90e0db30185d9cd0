//! Fixed-step simulation tick
//!
//! Core game loop that advances the session by one frame. Movement is a
//! fixed per-frame displacement; there is no wall-clock time in here.

use serde::{Deserialize, Serialize};

use super::bricks::HitOutcome;
use super::level::LevelProvider;
use super::particles::{BRICK_BURST, EXPLOSION_BURST, EXPLOSION_COLOR};
use super::powerups::EffectTarget;
use super::session::GameSession;
use super::state::{GameEvent, GamePhase, Snapshot};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Requested paddle center in field coordinates (from mouse/touch/keys)
    pub paddle_target_x: Option<f32>,
    /// Launch the waiting ball (edge-triggered by the host)
    pub launch: bool,
}

/// Result of one tick
#[derive(Debug, Clone, Serialize)]
pub struct TickOutput {
    /// `false` when the session was not playing and nothing changed
    pub accepted: bool,
    pub score: u64,
    pub lives: u32,
    pub phase: GamePhase,
    pub level_index: usize,
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    pub snapshot: Snapshot,
}

impl<L: LevelProvider> GameSession<L> {
    /// Advance the session by one frame.
    ///
    /// Outside of `Playing` the input is ignored, no state changes and the
    /// output carries no events.
    pub fn step(&mut self, input: &TickInput) -> TickOutput {
        if self.phase != GamePhase::Playing {
            return self.output(false, Vec::new());
        }

        let mut events = Vec::new();
        self.time_ticks += 1;
        self.particles.update();

        // Paddle
        if let Some(target) = input.paddle_target_x {
            self.paddle.set_target_x(target);
        }
        // Launch from where the paddle is now, not where it was
        self.balls.follow_paddle(&self.paddle);

        // Launch
        if input.launch && self.balls.launch(&mut self.rng) {
            log::debug!("Ball launched at tick {}", self.time_ticks);
            events.push(GameEvent::BallLaunched);
        }

        // Balls, walls, paddle, bricks
        let report = self.balls.step(&self.paddle, &mut self.bricks);
        events.extend((0..report.wall_bounces).map(|_| GameEvent::WallBounce));
        events.extend((0..report.paddle_bounces).map(|_| GameEvent::PaddleBounce));

        for hit in report.hits {
            self.score += hit.score_delta();
            match hit {
                HitOutcome::Miss => {}
                HitOutcome::Damaged { id, health } => {
                    if let Some(brick) = self.bricks.get(id) {
                        events.push(GameEvent::BrickDamaged {
                            position: brick.center(),
                            health,
                        });
                    }
                }
                HitOutcome::Destroyed {
                    destroyed,
                    detonations,
                } => {
                    for position in detonations {
                        events.push(GameEvent::ExplosionTriggered { position });
                        self.particles
                            .burst(position, EXPLOSION_COLOR, EXPLOSION_BURST, self.time_ticks);
                    }
                    for brick in destroyed {
                        events.push(GameEvent::BrickDestroyed {
                            position: brick.center,
                            color: brick.color,
                        });
                        self.particles
                            .burst(brick.center, brick.color, BRICK_BURST, self.time_ticks);
                        if let Some(kind) = self.powerups.maybe_spawn(brick.center, &mut self.rng) {
                            events.push(GameEvent::PowerUpSpawned {
                                kind,
                                position: brick.center,
                            });
                        }
                    }
                }
            }
        }

        // Pickups
        for kind in self.powerups.update(&self.paddle.rect()) {
            log::debug!("Captured {:?}", kind);
            kind.effect(&self.tuning).apply(EffectTarget {
                paddle: &mut self.paddle,
                balls: &mut self.balls,
                lives: &mut self.lives,
            });
            events.push(GameEvent::PowerUpCaptured { kind });
        }
        // Extend may have moved the paddle center
        self.balls.follow_paddle(&self.paddle);

        // A cleared field wins over a simultaneous ball loss
        if self.bricks.is_cleared() {
            self.complete_level(&mut events);
        } else if report.balls_lost {
            self.lose_life(&mut events);
        }

        self.output(true, events)
    }

    fn complete_level(&mut self, events: &mut Vec<GameEvent>) {
        if self.levels.has_next(self.level_index) {
            let bonus = self.tuning.level_bonus;
            self.score += bonus;
            self.phase = GamePhase::LevelComplete;
            events.push(GameEvent::LevelCleared { bonus });
            log::info!(
                "Level {} cleared, score {}",
                self.level_index + 1,
                self.score
            );
        } else {
            let bonus = self.tuning.victory_bonus;
            self.score += bonus;
            self.phase = GamePhase::Victory;
            events.push(GameEvent::Victory { bonus });
            log::info!("Victory! Final score {}", self.score);
        }
    }

    fn lose_life(&mut self, events: &mut Vec<GameEvent>) {
        self.lives = self.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost);
        log::debug!("Life lost, {} remaining", self.lives);

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver);
            log::info!("Game over, final score {}", self.score);
            return;
        }

        self.paddle.reset_width();
        self.paddle.center_in_field();
        self.balls.reset_to_waiting(&self.paddle);
        self.powerups.clear();
    }

    fn output(&self, accepted: bool, events: Vec<GameEvent>) -> TickOutput {
        TickOutput {
            accepted,
            score: self.score,
            lives: self.lives,
            phase: self.phase,
            level_index: self.level_index,
            events,
            snapshot: self.snapshot(),
        }
    }
}
