//! Cosmetic particles (not gameplay-affecting)
//!
//! Spread is derived from a hash of the tick counter and emitter position so
//! bursts look random without drawing from the gameplay RNG.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Particles per destroyed brick
pub const BRICK_BURST: u32 = 8;
/// Particles per detonation
pub const EXPLOSION_BURST: u32 = 30;
/// Color of explosion particles, 0xRRGGBB
pub const EXPLOSION_COLOR: u32 = 0xef4444;
/// Life lost per tick (1.0 -> 0 in 50 ticks)
const LIFE_DECAY: f32 = 0.02;
/// Maximum spawn speed along each axis
const MAX_SPREAD: f32 = 3.0;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 1.0 when spawned, removed at 0
    pub life: f32,
}

/// Bounded pool of live particles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Particles {
    particles: Vec<Particle>,
    max: usize,
}

impl Particles {
    pub fn new(max: usize) -> Self {
        Self {
            particles: Vec::new(),
            max,
        }
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Emit `count` particles at `pos`. Oldest particles are dropped when full.
    pub fn burst(&mut self, pos: Vec2, color: u32, count: u32, tick: u64) {
        if self.max == 0 {
            return;
        }
        let seed = (tick as u32)
            .wrapping_mul(2654435761)
            .wrapping_add((pos.x as u32).wrapping_mul(7919))
            .wrapping_add((pos.y as u32).wrapping_mul(104729));

        for i in 0..count {
            if self.particles.len() >= self.max {
                self.particles.remove(0);
            }
            let hash = seed.wrapping_add(i.wrapping_mul(31337)).wrapping_mul(2654435761);
            let rand_x = (hash % 1000) as f32 / 1000.0 - 0.5;
            let rand_y = ((hash >> 10) % 1000) as f32 / 1000.0 - 0.5;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(rand_x, rand_y) * 2.0 * MAX_SPREAD,
                color,
                life: 1.0,
            });
        }
    }

    /// Move and fade every particle, dropping dead ones
    pub fn update(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.life -= LIFE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_and_fade() {
        let mut particles = Particles::new(256);
        particles.burst(Vec2::new(100.0, 100.0), 0xffffff, BRICK_BURST, 3);
        assert_eq!(particles.len(), 8);
        for p in particles.as_slice() {
            assert!(p.vel.x.abs() <= MAX_SPREAD && p.vel.y.abs() <= MAX_SPREAD);
        }

        for _ in 0..49 {
            particles.update();
        }
        assert_eq!(particles.len(), 8);
        for _ in 0..2 {
            particles.update();
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut particles = Particles::new(10);
        particles.burst(Vec2::ZERO, EXPLOSION_COLOR, EXPLOSION_BURST, 0);
        assert_eq!(particles.len(), 10);

        let mut none = Particles::new(0);
        none.burst(Vec2::ZERO, EXPLOSION_COLOR, EXPLOSION_BURST, 0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_burst_is_deterministic() {
        let mut a = Particles::new(64);
        let mut b = Particles::new(64);
        a.burst(Vec2::new(42.0, 17.0), 1, 8, 99);
        b.burst(Vec2::new(42.0, 17.0), 1, 8, 99);
        for (pa, pb) in a.as_slice().iter().zip(b.as_slice()) {
            assert_eq!(pa.vel, pb.vel);
        }
    }
}
