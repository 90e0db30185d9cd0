//! Error types for the fallible edges of the core
//!
//! The per-frame simulation never fails: bad paddle commands are clamped and
//! repeated hits are no-ops. Errors only come from loading data and from
//! session commands issued in the wrong phase.

use thiserror::Error;

use crate::sim::GamePhase;

/// Errors raised while loading configuration/levels or driving the session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level set contains no levels")]
    EmptyLevelSet,

    #[error("level {level}: unknown brick code {code} at row {row}, column {col}")]
    UnknownBrickCode {
        level: u32,
        row: usize,
        col: usize,
        code: u8,
    },

    #[error("level {level}: {columns} columns do not fit the field (max {max})")]
    LayoutTooWide {
        level: u32,
        columns: usize,
        max: usize,
    },

    #[error("level {level}: speed multiplier {value} must be finite and positive")]
    InvalidSpeedMultiplier { level: u32, value: f32 },

    #[error("level index {index} out of range ({len} levels)")]
    LevelOutOfRange { index: usize, len: usize },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("cannot {command} while in phase {phase:?}")]
    InvalidTransition {
        phase: GamePhase,
        command: &'static str,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
