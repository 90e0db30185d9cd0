//! The brick grid: damage, destruction and explosive chain reactions
//!
//! Bricks live in a row-major arena indexed by [`BrickId`]. Collision code
//! gets ids back from queries and calls [`BrickField::apply_hit`]; it never
//! holds references into the arena across a hit.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{self, LevelConfig};
use super::rect::Rect;
use crate::consts::HARD_BRICK_HEALTH;
use crate::tuning::Tuning;

/// Brick behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    /// Takes several hits
    Hard,
    /// Destroys every brick within the blast radius when it breaks
    Explosive,
}

/// Whether a brick is still in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// Grid coordinates of a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrickId {
    pub row: usize,
    pub col: usize,
}

impl BrickId {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Palette for brick codes, 0xRRGGBB
pub const BRICK_COLORS: [u32; 10] = [
    0x000000, // 0: empty
    0xf43f5e, // 1: rose
    0xf59e0b, // 2: amber
    0x84cc16, // 3: lime
    0x06b6d4, // 4: cyan
    0xa855f7, // 5: purple
    0x64748b, // 6: slate (spare tier)
    0x64748b, // 7: slate (spare tier)
    0x94a3b8, // 8: hard, silver
    0xef4444, // 9: explosive, red
];

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: BrickId,
    pub rect: Rect,
    pub kind: BrickKind,
    pub status: BrickStatus,
    /// Hits remaining
    pub health: u8,
    pub max_health: u8,
    pub score_value: u32,
    /// Base color, 0xRRGGBB
    pub color: u32,
}

impl Brick {
    /// Build a brick from a layout code. Returns `None` for empty cells.
    pub fn from_code(code: u8, id: BrickId, rect: Rect) -> Option<Self> {
        if code == level::EMPTY {
            return None;
        }
        let (kind, max_health) = match code {
            level::HARD => (BrickKind::Hard, HARD_BRICK_HEALTH),
            level::EXPLOSIVE => (BrickKind::Explosive, 1),
            _ => (BrickKind::Normal, 1),
        };
        let color = BRICK_COLORS
            .get(code as usize)
            .copied()
            .unwrap_or(BRICK_COLORS[1]);
        Some(Self {
            id,
            rect,
            kind,
            status: BrickStatus::Active,
            health: max_health,
            max_health,
            score_value: code as u32 * 10,
            color,
        })
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    /// Remaining health as a fraction (1.0 = untouched)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// A brick that broke during a hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destruction {
    pub id: BrickId,
    pub score_value: u32,
    pub center: Vec2,
    pub color: u32,
    pub was_explosive: bool,
}

/// What a single call to [`BrickField::apply_hit`] did
#[derive(Debug, Clone, PartialEq)]
pub enum HitOutcome {
    /// Brick was already destroyed (or the cell is empty): nothing happened
    Miss,
    /// Brick lost health but survived
    Damaged { id: BrickId, health: u8 },
    /// Brick broke. `destroyed[0]` is the struck brick; the rest were taken
    /// out by explosions, in cascade order. `detonations` holds the center
    /// of every explosive brick that went off.
    Destroyed {
        destroyed: Vec<Destruction>,
        detonations: Vec<Vec2>,
    },
}

impl HitOutcome {
    /// Score earned by this hit
    pub fn score_delta(&self) -> u64 {
        match self {
            HitOutcome::Destroyed { destroyed, .. } => {
                destroyed.iter().map(|d| d.score_value as u64).sum()
            }
            _ => 0,
        }
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, HitOutcome::Miss)
    }
}

/// Owns every brick of the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickField {
    rows: usize,
    cols: usize,
    /// Row-major cells; `None` is an empty slot
    cells: Vec<Option<Brick>>,
    explosion_radius: f32,
    active_count: usize,
}

impl BrickField {
    /// Lay out the bricks of `level` on the grid described by `tuning`
    pub fn from_level(level: &LevelConfig, tuning: &Tuning) -> Self {
        let rows = level.layout.len();
        let cols = level.columns();
        let brick_width = tuning.brick_width();
        let mut cells = Vec::with_capacity(rows * cols);

        for (r, row) in level.layout.iter().enumerate() {
            for c in 0..cols {
                let code = row.get(c).copied().unwrap_or(level::EMPTY);
                let id = BrickId::new(r, c);
                let rect = Rect::new(
                    tuning.brick_offset_left + c as f32 * (brick_width + tuning.brick_padding),
                    tuning.brick_offset_top + r as f32 * (tuning.brick_height + tuning.brick_padding),
                    brick_width,
                    tuning.brick_height,
                );
                cells.push(Brick::from_code(code, id, rect));
            }
        }

        let active_count = cells.iter().flatten().count();
        log::debug!(
            "Brick field for level {}: {}x{} grid, {} bricks",
            level.id,
            rows,
            cols,
            active_count
        );

        Self {
            rows,
            cols,
            cells,
            explosion_radius: tuning.explosion_radius,
            active_count,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, id: BrickId) -> Option<usize> {
        (id.row < self.rows && id.col < self.cols).then(|| id.row * self.cols + id.col)
    }

    /// Brick at `id`, if the cell holds one
    pub fn get(&self, id: BrickId) -> Option<&Brick> {
        self.index(id).and_then(|i| self.cells[i].as_ref())
    }

    /// Every brick (active or destroyed) in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter().flatten()
    }

    /// Active bricks in row-major order
    pub fn active(&self) -> impl Iterator<Item = &Brick> {
        self.iter().filter(|b| b.is_active())
    }

    /// Ids of active bricks whose rectangle strictly contains `point`
    pub fn active_containing(&self, point: Vec2) -> Vec<BrickId> {
        self.active()
            .filter(|b| b.rect.contains_strict(point))
            .map(|b| b.id)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// True once every brick is destroyed
    pub fn is_cleared(&self) -> bool {
        self.active_count == 0
    }

    /// Damage a brick by one, or destroy it outright with `instant_kill`.
    ///
    /// Destroying an explosive brick instant-kills every active brick whose
    /// center is within the explosion radius, and explosive victims detonate
    /// in turn. Each brick is marked destroyed before it is queued, so a
    /// cascade touches every brick at most once.
    pub fn apply_hit(&mut self, id: BrickId, instant_kill: bool) -> HitOutcome {
        let Some(index) = self.index(id) else {
            return HitOutcome::Miss;
        };
        let Some(brick) = self.cells[index].as_mut() else {
            return HitOutcome::Miss;
        };
        if !brick.is_active() {
            return HitOutcome::Miss;
        }

        if instant_kill {
            brick.health = 0;
        } else {
            brick.health = brick.health.saturating_sub(1);
        }
        if brick.health > 0 {
            return HitOutcome::Damaged {
                id,
                health: brick.health,
            };
        }

        let mut destroyed = Vec::new();
        let mut detonations = Vec::new();
        let mut pending = VecDeque::new();

        if let Some(first) = self.destroy(index) {
            if first.was_explosive {
                pending.push_back(first.center);
            }
            destroyed.push(first);
        }

        while let Some(center) = pending.pop_front() {
            detonations.push(center);
            // Whole-field scan: blast damage is by distance, not grid adjacency
            let victims: Vec<usize> = self
                .cells
                .iter()
                .enumerate()
                .filter_map(|(i, cell)| cell.as_ref().map(|b| (i, b)))
                .filter(|(_, b)| b.is_active() && b.center().distance(center) < self.explosion_radius)
                .map(|(i, _)| i)
                .collect();

            for victim in victims {
                if let Some(d) = self.destroy(victim) {
                    if d.was_explosive {
                        pending.push_back(d.center);
                    }
                    destroyed.push(d);
                }
            }
        }

        if !detonations.is_empty() {
            log::debug!(
                "Explosion cascade: {} detonations, {} bricks destroyed",
                detonations.len(),
                destroyed.len()
            );
        }

        HitOutcome::Destroyed {
            destroyed,
            detonations,
        }
    }

    /// Mark the brick at `index` destroyed. `None` if it already was.
    fn destroy(&mut self, index: usize) -> Option<Destruction> {
        let brick = self.cells[index].as_mut()?;
        if !brick.is_active() {
            return None;
        }
        brick.health = 0;
        brick.status = BrickStatus::Destroyed;
        self.active_count -= 1;
        Some(Destruction {
            id: brick.id,
            score_value: brick.score_value,
            center: brick.center(),
            color: brick.color,
            was_explosive: brick.kind == BrickKind::Explosive,
        })
    }
}
