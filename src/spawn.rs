//! Spawn context for particle initialization.
//!
//! Provides helper methods to reduce boilerplate when spawning and
//! respawning particles into a viewport-sized 2D region.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Context handed to spawn code with helpers for common spawn patterns.
///
/// Wraps a small, fast RNG so spawning stays reproducible when seeded:
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(0, 150, Vec2::new(1280.0, 720.0), 7);
/// let p = Particle::spawn(&mut ctx);
/// ```
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: u32,
    /// Total number of particles being spawned.
    pub count: u32,
    /// Spawn region size in pixels (the canvas bounds).
    pub bounds: Vec2,
    /// Internal RNG - use helper methods instead of accessing directly.
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context seeded from the wall clock.
    ///
    /// Different every program execution; use [`seeded`](Self::seeded) when
    /// reproducibility matters.
    pub fn new(index: u32, count: u32, bounds: Vec2) -> Self {
        let seed = index as u64
            ^ (std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42));
        Self::seeded(index, count, bounds, seed)
    }

    /// Create a spawn context with an explicit seed.
    pub fn seeded(index: u32, count: u32, bounds: Vec2, seed: u64) -> Self {
        Self {
            index,
            count,
            bounds,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count.max(1) as f32
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given half-open range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    // ========== Position / velocity helpers ==========

    /// Random point inside the spawn bounds.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen::<f32>() * self.bounds.x,
            self.rng.gen::<f32>() * self.bounds.y,
        )
    }

    /// Random vector with each component in `(-spread/2, spread/2)`.
    ///
    /// The drift velocity assigned to freshly spawned particles.
    pub fn random_drift(&mut self, spread: f32) -> Vec2 {
        Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * spread,
            (self.rng.gen::<f32>() - 0.5) * spread,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_context_progress() {
        let ctx = SpawnContext::seeded(50, 100, Vec2::ONE, 1);
        assert!((ctx.progress() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_random_in_bounds() {
        let bounds = Vec2::new(640.0, 480.0);
        let mut ctx = SpawnContext::seeded(0, 1, bounds, 99);
        for _ in 0..100 {
            let pos = ctx.random_in_bounds();
            assert!(pos.x >= 0.0 && pos.x <= bounds.x);
            assert!(pos.y >= 0.0 && pos.y <= bounds.y);
        }
    }

    #[test]
    fn test_random_drift_spread() {
        let mut ctx = SpawnContext::seeded(0, 1, Vec2::ONE, 5);
        for _ in 0..100 {
            let v = ctx.random_drift(0.5);
            assert!(v.x.abs() <= 0.25);
            assert!(v.y.abs() <= 0.25);
        }
    }

    #[test]
    fn test_seeded_reproducibility() {
        let mut a = SpawnContext::seeded(0, 1, Vec2::new(100.0, 100.0), 42);
        let mut b = SpawnContext::seeded(0, 1, Vec2::new(100.0, 100.0), 42);
        assert_eq!(a.random_in_bounds(), b.random_in_bounds());
        assert_eq!(a.random(), b.random());
    }
}
