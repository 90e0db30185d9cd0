//! Level definitions and the level provider boundary
//!
//! A level is a grid of brick codes plus a ball-speed multiplier:
//! - `0`: empty cell
//! - `1`-`5`: normal bricks, one color tier each (`6`, `7` are spare tiers)
//! - `8`: hard brick, three hits
//! - `9`: explosive brick, destroys everything within the blast radius

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// Brick code for an empty cell
pub const EMPTY: u8 = 0;
/// Brick code for a hard (multi-hit) brick
pub const HARD: u8 = 8;
/// Brick code for an explosive brick
pub const EXPLOSIVE: u8 = 9;

/// An immutable level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    pub name: String,
    /// Rows of brick codes, top row first
    pub layout: Vec<Vec<u8>>,
    /// Multiplier applied to the base ball speed
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f32,
}

fn default_speed_multiplier() -> f32 {
    1.0
}

impl LevelConfig {
    /// Check brick codes, grid width and speed multiplier
    pub fn validate(&self, tuning: &Tuning) -> Result<()> {
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(Error::InvalidSpeedMultiplier {
                level: self.id,
                value: self.speed_multiplier,
            });
        }
        for (row, cells) in self.layout.iter().enumerate() {
            if cells.len() > tuning.brick_columns {
                return Err(Error::LayoutTooWide {
                    level: self.id,
                    columns: cells.len(),
                    max: tuning.brick_columns,
                });
            }
            for (col, &code) in cells.iter().enumerate() {
                if code > EXPLOSIVE {
                    return Err(Error::UnknownBrickCode {
                        level: self.id,
                        row,
                        col,
                        code,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of bricks this layout places
    pub fn brick_count(&self) -> usize {
        self.layout
            .iter()
            .flatten()
            .filter(|&&code| code != EMPTY)
            .count()
    }

    /// Widest row of the layout
    pub fn columns(&self) -> usize {
        self.layout.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Supplies levels to the session, in play order
pub trait LevelProvider {
    /// Number of levels
    fn len(&self) -> usize;

    /// Level at `index` (0-based)
    fn level(&self, index: usize) -> Option<&LevelConfig>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether another level follows `index`
    fn has_next(&self, index: usize) -> bool {
        index + 1 < self.len()
    }
}

/// An ordered, validated list of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSet {
    levels: Vec<LevelConfig>,
}

impl LevelSet {
    /// Build a level set, validating every level against `tuning`
    pub fn new(levels: Vec<LevelConfig>, tuning: &Tuning) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::EmptyLevelSet);
        }
        for level in &levels {
            level.validate(tuning)?;
            if level.brick_count() == 0 {
                log::warn!("Level {} ({}) has no bricks", level.id, level.name);
            }
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str, tuning: &Tuning) -> Result<Self> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Self::new(levels, tuning)
    }

    /// Load a JSON array of levels from a file
    pub fn load(path: impl AsRef<Path>, tuning: &Tuning) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let set = Self::from_json(&json, tuning)?;
        log::info!(
            "Loaded {} levels from {}",
            set.levels.len(),
            path.as_ref().display()
        );
        Ok(set)
    }

    /// The three stock levels
    pub fn builtin() -> Self {
        Self {
            levels: builtin_levels(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelProvider for LevelSet {
    fn len(&self) -> usize {
        self.levels.len()
    }

    fn level(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }
}

impl LevelProvider for Vec<LevelConfig> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn level(&self, index: usize) -> Option<&LevelConfig> {
        self.get(index)
    }
}

/// Stock level designs
pub fn builtin_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig {
            id: 1,
            name: "Initiation".to_string(),
            speed_multiplier: 1.0,
            layout: vec![
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![1, 1, 1, 9, 1, 1, 9, 1, 1, 1],
                vec![2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
                vec![3, 3, 3, 3, 3, 3, 3, 3, 3, 3],
                vec![8, 4, 4, 4, 8, 8, 4, 4, 4, 8],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            ],
        },
        LevelConfig {
            id: 2,
            name: "The Pyramid".to_string(),
            speed_multiplier: 1.2,
            layout: vec![
                vec![0, 0, 0, 0, 5, 5, 0, 0, 0, 0],
                vec![0, 0, 0, 4, 4, 4, 4, 0, 0, 0],
                vec![0, 0, 3, 3, 9, 9, 3, 3, 0, 0],
                vec![0, 2, 2, 2, 2, 2, 2, 2, 2, 0],
                vec![8, 1, 1, 1, 1, 1, 1, 1, 1, 8],
                vec![1, 0, 1, 0, 1, 1, 0, 1, 0, 1],
            ],
        },
        LevelConfig {
            id: 3,
            name: "Chaos Fortress".to_string(),
            speed_multiplier: 1.4,
            layout: vec![
                vec![9, 8, 8, 8, 9, 9, 8, 8, 8, 9],
                vec![5, 4, 5, 4, 5, 5, 4, 5, 4, 5],
                vec![3, 3, 3, 3, 3, 3, 3, 3, 3, 3],
                vec![2, 2, 0, 0, 2, 2, 0, 0, 2, 2],
                vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                vec![9, 5, 0, 0, 5, 5, 0, 0, 5, 9],
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid() {
        let tuning = Tuning::default();
        let set = LevelSet::new(builtin_levels(), &tuning).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.has_next(1));
        assert!(!set.has_next(2));
        assert_eq!(set.level(0).unwrap().brick_count(), 40);
        assert_eq!(set.level(2).unwrap().speed_multiplier, 1.4);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "id": 7, "name": "Tiny", "layout": [[1, 0, 9]] }
        ]"#;
        let set = LevelSet::from_json(json, &Tuning::default()).unwrap();
        let level = set.level(0).unwrap();
        assert_eq!(level.speed_multiplier, 1.0);
        assert_eq!(level.columns(), 3);
        assert_eq!(level.brick_count(), 2);
    }

    #[test]
    fn test_rejects_invalid_levels() {
        let tuning = Tuning::default();
        assert!(matches!(
            LevelSet::new(Vec::new(), &tuning),
            Err(Error::EmptyLevelSet)
        ));

        let bad_code = r#"[{ "id": 1, "name": "x", "layout": [[1, 12]] }]"#;
        assert!(matches!(
            LevelSet::from_json(bad_code, &tuning),
            Err(Error::UnknownBrickCode { code: 12, row: 0, col: 1, .. })
        ));

        let too_wide = r#"[{ "id": 1, "name": "x", "layout": [[1,1,1,1,1,1,1,1,1,1,1]] }]"#;
        assert!(matches!(
            LevelSet::from_json(too_wide, &tuning),
            Err(Error::LayoutTooWide { columns: 11, .. })
        ));

        let bad_speed = r#"[{ "id": 1, "name": "x", "layout": [[1]], "speed_multiplier": -1.0 }]"#;
        assert!(matches!(
            LevelSet::from_json(bad_speed, &tuning),
            Err(Error::InvalidSpeedMultiplier { .. })
        ));
    }
}
