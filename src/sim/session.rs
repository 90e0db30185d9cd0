//! The gameplay session: owns every component plus score, lives and phase
//!
//! Phase transitions driven by the host go through the command methods here.
//! Transitions caused by play (level cleared, lives exhausted) happen inside
//! [`GameSession::step`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::balls::{Ball, BallSimulator};
use super::bricks::BrickField;
use super::level::{LevelConfig, LevelProvider, LevelSet};
use super::paddle::Paddle;
use super::particles::Particles;
use super::powerups::PowerUpSystem;
use super::state::{BallView, BrickView, GamePhase, PowerUpView, Snapshot};
use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// One playthrough of a level set
#[derive(Debug)]
pub struct GameSession<L = LevelSet> {
    pub(super) tuning: Tuning,
    pub(super) levels: L,
    /// Run seed for reproducibility
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) phase: GamePhase,
    pub(super) score: u64,
    pub(super) lives: u32,
    pub(super) level_index: usize,
    /// Ticks accepted since the session was created
    pub(super) time_ticks: u64,
    pub(super) bricks: BrickField,
    pub(super) paddle: Paddle,
    pub(super) balls: BallSimulator,
    pub(super) powerups: PowerUpSystem,
    /// Visual particles (not gameplay-affecting)
    pub(super) particles: Particles,
}

impl GameSession<LevelSet> {
    /// Session over the built-in levels with default tuning
    pub fn with_builtin_levels(seed: u64) -> Result<Self> {
        Self::new(LevelSet::builtin(), Tuning::default(), seed)
    }
}

impl<L: LevelProvider> GameSession<L> {
    /// Create a session in the menu. The first level is laid out so the
    /// host has something to draw behind the menu.
    pub fn new(levels: L, tuning: Tuning, seed: u64) -> Result<Self> {
        tuning.validate()?;
        if levels.is_empty() {
            return Err(Error::EmptyLevelSet);
        }
        for index in 0..levels.len() {
            if let Some(level) = levels.level(index) {
                level.validate(&tuning)?;
            }
        }
        let first = levels
            .level(0)
            .ok_or(Error::LevelOutOfRange { index: 0, len: levels.len() })?;

        let paddle = Paddle::new(&tuning);
        let bricks = BrickField::from_level(first, &tuning);
        let balls = BallSimulator::new(&tuning, first.speed_multiplier, &paddle);

        Ok(Self {
            lives: tuning.starting_lives,
            powerups: PowerUpSystem::new(&tuning),
            particles: Particles::new(tuning.max_particles),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: GamePhase::Menu,
            score: 0,
            level_index: 0,
            time_ticks: 0,
            bricks,
            paddle,
            balls,
            tuning,
            levels,
        })
    }

    /// Menu -> Playing on the first level with a fresh score and lives
    pub fn start(&mut self) -> Result<()> {
        self.expect_phase(GamePhase::Menu, "start")?;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.load_level(0)?;
        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// LevelComplete -> Playing on the following level. Score and lives carry over.
    pub fn next_level(&mut self) -> Result<()> {
        self.expect_phase(GamePhase::LevelComplete, "advance to the next level")?;
        self.load_level(self.level_index + 1)?;
        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// GameOver/Victory -> Menu
    pub fn restart(&mut self) -> Result<()> {
        if !self.phase.is_terminal() {
            return Err(Error::InvalidTransition {
                phase: self.phase,
                command: "restart",
            });
        }
        self.load_level(0)?;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.phase = GamePhase::Menu;
        log::info!("Back to menu");
        Ok(())
    }

    fn expect_phase(&self, phase: GamePhase, command: &'static str) -> Result<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                phase: self.phase,
                command,
            })
        }
    }

    /// Rebuild every entity component for the level at `index`
    fn load_level(&mut self, index: usize) -> Result<()> {
        let level = self.levels.level(index).ok_or(Error::LevelOutOfRange {
            index,
            len: self.levels.len(),
        })?;

        self.bricks = BrickField::from_level(level, &self.tuning);
        self.paddle = Paddle::new(&self.tuning);
        self.balls = BallSimulator::new(&self.tuning, level.speed_multiplier, &self.paddle);
        self.powerups.clear();
        self.particles.clear();
        self.level_index = index;

        log::info!(
            "Level {} ({}) started: {} bricks, speed x{}",
            index + 1,
            level.name,
            self.bricks.active_count(),
            level.speed_multiplier
        );
        Ok(())
    }

    /// Current level description
    pub fn level(&self) -> Option<&LevelConfig> {
        self.levels.level(self.level_index)
    }

    pub fn levels(&self) -> &L {
        &self.levels
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn bricks(&self) -> &BrickField {
        &self.bricks
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn balls(&self) -> &BallSimulator {
        &self.balls
    }

    pub fn powerups(&self) -> &PowerUpSystem {
        &self.powerups
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    /// Direct ball access for scripted scenarios and tools
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        self.balls.balls_mut()
    }

    /// Direct pickup access for scripted scenarios and tools
    pub fn powerups_mut(&mut self) -> &mut PowerUpSystem {
        &mut self.powerups
    }

    /// Read-only view of the current frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            level_index: self.level_index,
            level_name: self.level().map(|l| l.name.clone()).unwrap_or_default(),
            balls: self.balls.balls().iter().map(BallView::from).collect(),
            paddle: self.paddle.rect(),
            bricks: self.bricks.active().map(BrickView::from).collect(),
            power_ups: self.powerups.pickups().iter().map(PowerUpView::from).collect(),
            particles: self.particles.as_slice().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_levels(count: u32) -> Vec<LevelConfig> {
        (1..=count)
            .map(|id| LevelConfig {
                id,
                name: format!("tiny {id}"),
                layout: vec![vec![1, 2]],
                speed_multiplier: 1.0,
            })
            .collect()
    }

    #[test]
    fn test_new_session_is_in_menu() {
        let session = GameSession::with_builtin_levels(1).unwrap();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.bricks().active_count(), 40);
        assert!(session.balls().is_waiting());
    }

    #[test]
    fn test_rejects_empty_and_invalid_levels() {
        let empty: Vec<LevelConfig> = Vec::new();
        assert!(matches!(
            GameSession::new(empty, Tuning::default(), 1),
            Err(Error::EmptyLevelSet)
        ));

        let mut bad = tiny_levels(1);
        bad[0].layout = vec![vec![10]];
        assert!(matches!(
            GameSession::new(bad, Tuning::default(), 1),
            Err(Error::UnknownBrickCode { code: 10, .. })
        ));
    }

    #[test]
    fn test_start_from_menu_only() {
        let mut session = GameSession::new(tiny_levels(2), Tuning::default(), 1).unwrap();
        assert!(matches!(
            session.next_level(),
            Err(Error::InvalidTransition { phase: GamePhase::Menu, .. })
        ));
        assert!(session.restart().is_err());
        session.start().unwrap();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(matches!(
            session.start(),
            Err(Error::InvalidTransition { phase: GamePhase::Playing, command: "start" })
        ));
        // Rejected commands leave the session alone
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.level_index(), 0);
    }

    #[test]
    fn test_next_level_carries_score_and_lives() {
        let mut session = GameSession::new(tiny_levels(2), Tuning::default(), 1).unwrap();
        session.start().unwrap();
        session.phase = GamePhase::LevelComplete;
        session.score = 830;
        session.lives = 2;

        session.next_level().unwrap();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.level_index(), 1);
        assert_eq!(session.score(), 830);
        assert_eq!(session.lives(), 2);
        assert_eq!(session.bricks().active_count(), 2);
        assert!(session.balls().is_waiting());
    }

    #[test]
    fn test_restart_resets_to_menu() {
        let mut session = GameSession::new(tiny_levels(2), Tuning::default(), 1).unwrap();
        session.start().unwrap();
        session.phase = GamePhase::Victory;
        session.score = 4000;
        session.level_index = 1;

        session.restart().unwrap();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.lives(), 3);
    }

    #[test]
    fn test_snapshot_lists_active_entities() {
        let session = GameSession::with_builtin_levels(1).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Menu);
        assert_eq!(snapshot.level_name, "Initiation");
        assert_eq!(snapshot.bricks.len(), 40);
        assert_eq!(snapshot.balls.len(), 1);
        assert!(!snapshot.balls[0].active);
        assert_eq!(snapshot.paddle.width, 120.0);
        assert!(snapshot.power_ups.is_empty());

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"Initiation\""));
    }
}
