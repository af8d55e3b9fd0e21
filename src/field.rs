//! Interactive particle field.
//!
//! A fixed-size population of 2D particles drifts across the viewport,
//! pulled toward fixed attractors laid out as a logotype row, pushed away
//! from the pointer, and redrawn each frame with connection lines between
//! nearby pairs.
//!
//! Every particle cycles through the same states: **alive** (position and
//! velocity updating) until its lifetime crosses zero, then **respawned** at
//! a fresh random position with new lifetime and opacity. There is no
//! terminal state; the population size only changes on viewport resize.
//!
//! # Quick Start
//!
//! ```ignore
//! use marquee::prelude::*;
//!
//! let mut field = ParticleField::new(Vec2::new(1280.0, 720.0));
//!
//! // Per frame:
//! field.set_pointer(cursor);
//! field.update();
//! field.render(&mut renderer);
//! ```
//!
//! # Performance
//!
//! The connection pass compares every unique particle pair per frame. That
//! quadratic scan is acceptable because the population is capped at
//! [`FieldConfig::max_particles`] (150); a spatial index only pays off if
//! that cap grows materially.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::renderer::Renderer;
use crate::spawn::SpawnContext;

/// Initial velocity component spread for freshly spawned particles.
const DRIFT_SPREAD: f32 = 0.5;
/// Particle radius range in pixels.
const RADIUS_MIN: f32 = 0.5;
const RADIUS_MAX: f32 = 2.5;
/// Particle opacity range.
const OPACITY_MIN: f32 = 0.1;
const OPACITY_MAX: f32 = 0.5;
/// Lifetime range in ticks.
const LIFE_MIN: f32 = 50.0;
const LIFE_MAX: f32 = 150.0;

/// Logotype attractor row layout.
const GLYPH_SPACING: f32 = 40.0;
const GLYPH_ROW_LIFT: f32 = 50.0;
const GLYPH_STRENGTH: f32 = 0.3;
const GLYPH_RADIUS: f32 = 30.0;

/// A single simulated particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in pixels, top-left origin.
    pub position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    /// Draw radius in pixels. Fixed for the particle's whole existence.
    pub radius: f32,
    /// Draw opacity, re-rolled on respawn.
    pub opacity: f32,
    /// Remaining lifetime in ticks.
    pub life: f32,
}

impl Particle {
    /// Spawn a particle at a random position inside the context bounds.
    pub fn spawn(ctx: &mut SpawnContext) -> Self {
        Self {
            position: ctx.random_in_bounds(),
            velocity: ctx.random_drift(DRIFT_SPREAD),
            radius: ctx.random_range(RADIUS_MIN, RADIUS_MAX),
            opacity: ctx.random_range(OPACITY_MIN, OPACITY_MAX),
            life: ctx.random_range(LIFE_MIN, LIFE_MAX),
        }
    }
}

/// A fixed point exerting a proximity-scaled pull on nearby particles.
///
/// Created once at field initialization and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    /// Attractor position in pixels.
    pub position: Vec2,
    /// Pull strength multiplier.
    pub strength: f32,
    /// Influence radius in pixels; particles farther away feel nothing.
    pub radius: f32,
}

impl Attractor {
    /// Build a horizontal row of attractors, one per logotype glyph,
    /// centered in `bounds` and lifted above the vertical midline.
    pub fn glyph_row(bounds: Vec2, glyphs: usize) -> Vec<Attractor> {
        let center = bounds / 2.0;
        let start_x = center.x - (glyphs as f32 * GLYPH_SPACING) / 2.0;

        (0..glyphs)
            .map(|i| Attractor {
                position: Vec2::new(
                    start_x + i as f32 * GLYPH_SPACING,
                    center.y - GLYPH_ROW_LIFT,
                ),
                strength: GLYPH_STRENGTH,
                radius: GLYPH_RADIUS,
            })
            .collect()
    }
}

/// Tuning constants for the particle field.
///
/// The force and radius values were tuned by eye against the shipped visual;
/// they are carried here as named fields rather than re-derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Hard cap on the particle population.
    pub max_particles: usize,
    /// Viewport area (pixels squared) per particle; small canvases get
    /// proportionally fewer particles.
    pub density_divisor: f32,
    /// Multiplicative velocity decay applied every tick.
    pub friction: f32,
    /// Velocity retained (and reversed) on wall contact.
    pub restitution: f32,
    /// Pointer repulsion reach in pixels.
    pub pointer_radius: f32,
    /// Pointer repulsion scale.
    pub pointer_force: f32,
    /// Scale applied to attractor pull contributions.
    pub attractor_damping: f32,
    /// Pairs closer than this get a connection line; the boundary itself
    /// is excluded.
    pub connection_distance: f32,
    /// Peak connection line opacity (at zero distance).
    pub connection_opacity: f32,
    /// Connection line width in pixels.
    pub connection_width: f32,
    /// Lifetime drain per tick.
    pub life_decay: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: 150,
            density_divisor: 8000.0,
            friction: 0.99,
            restitution: 0.8,
            pointer_radius: 100.0,
            pointer_force: 0.001,
            attractor_damping: 0.01,
            connection_distance: 80.0,
            connection_opacity: 0.1,
            connection_width: 0.5,
            life_decay: 0.1,
        }
    }
}

/// The particle field effect.
///
/// Owns its particles, attractors, and RNG; nothing is shared. Drive it with
/// one [`update`](Self::update) per animation-clock tick and one
/// [`render`](Self::render) after.
pub struct ParticleField {
    particles: Vec<Particle>,
    attractors: Vec<Attractor>,
    pointer: Option<Vec2>,
    bounds: Vec2,
    config: FieldConfig,
    rng: SmallRng,
    seed: Option<u64>,
    ticks: u64,
}

impl ParticleField {
    /// Create a field sized to `bounds` with the default configuration and
    /// an eight-glyph logotype attractor row.
    pub fn new(bounds: Vec2) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            attractors: Attractor::glyph_row(bounds, 8),
            pointer: None,
            bounds,
            config: FieldConfig::default(),
            rng: SmallRng::from_entropy(),
            seed: None,
            ticks: 0,
        };
        field.repopulate();
        field
    }

    /// Replace the configuration. Re-spawns the population, since the
    /// sizing rules may have changed.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self.repopulate();
        self
    }

    /// Replace the attractor set.
    pub fn with_attractors(mut self, attractors: Vec<Attractor>) -> Self {
        self.attractors = attractors;
        self
    }

    /// Seed the RNG for reproducible spawns and respawns.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = SmallRng::seed_from_u64(seed);
        self.repopulate();
        self
    }

    /// Current particle population.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The attractor set.
    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    /// Field bounds in pixels.
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Set the pointer position used for repulsion.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// Remove the pointer (e.g. cursor left the surface).
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Resize the field to new bounds.
    ///
    /// The target population is recomputed: new particles spawn to grow it,
    /// the tail is truncated to shrink it. Surviving particles keep their
    /// positions; the boundary clamp catches any now out of bounds on the
    /// next tick.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;

        let target = self.target_population();
        if target < self.particles.len() {
            self.particles.truncate(target);
        } else {
            for i in self.particles.len()..target {
                let particle = self.spawn_indexed(i as u32, target as u32);
                self.particles.push(particle);
            }
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Order per particle: attractor pulls, pointer repulsion, position
    /// integration, friction, boundary reflection, lifetime drain and
    /// respawn. A zero distance to a force source skips that contribution so
    /// no non-finite values reach the velocity.
    pub fn update(&mut self) {
        let Self {
            particles,
            attractors,
            pointer,
            bounds,
            config,
            rng,
            ..
        } = self;

        for p in particles.iter_mut() {
            // Attractor pulls, scaled linearly by penetration depth.
            for attractor in attractors.iter() {
                let to_attractor = attractor.position - p.position;
                let distance = to_attractor.length();
                if distance < attractor.radius && distance > 0.0 {
                    let force =
                        (attractor.radius - distance) / attractor.radius * attractor.strength;
                    p.velocity += to_attractor / distance * force * config.attractor_damping;
                }
            }

            // Pointer repulsion, scaled linearly by proximity.
            if let Some(pointer) = pointer {
                let from_pointer = p.position - *pointer;
                let distance = from_pointer.length();
                if distance < config.pointer_radius && distance > 0.0 {
                    let force = (config.pointer_radius - distance) / config.pointer_radius;
                    p.velocity += from_pointer * force * config.pointer_force;
                }
            }

            p.position += p.velocity;
            p.velocity *= config.friction;

            // Boundary reflection with restitution, position clamped inside.
            if p.position.x < 0.0 || p.position.x > bounds.x {
                p.velocity.x *= -config.restitution;
                p.position.x = p.position.x.clamp(0.0, bounds.x);
            }
            if p.position.y < 0.0 || p.position.y > bounds.y {
                p.velocity.y *= -config.restitution;
                p.position.y = p.position.y.clamp(0.0, bounds.y);
            }

            p.life -= config.life_decay;
            if p.life <= 0.0 {
                p.position = Vec2::new(
                    rng.gen::<f32>() * bounds.x,
                    rng.gen::<f32>() * bounds.y,
                );
                p.life = rng.gen_range(LIFE_MIN..LIFE_MAX);
                p.opacity = rng.gen_range(OPACITY_MIN..OPACITY_MAX);
            }
        }

        self.ticks += 1;
    }

    /// Draw the current state: clear, connection lines between every unique
    /// pair strictly closer than the connection distance (opacity inversely
    /// proportional to distance), then one filled circle per particle.
    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        renderer.clear();

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position.distance(b.position);
                if distance < self.config.connection_distance {
                    let opacity = (self.config.connection_distance - distance)
                        / self.config.connection_distance
                        * self.config.connection_opacity;
                    renderer.draw_line(
                        a.position,
                        b.position,
                        self.config.connection_width,
                        opacity,
                    );
                }
            }
        }

        for p in &self.particles {
            renderer.draw_circle(p.position, p.radius, p.opacity);
        }
    }

    /// Population target for the current bounds: one particle per
    /// `density_divisor` square pixels, capped, never below one.
    fn target_population(&self) -> usize {
        let area = self.bounds.x * self.bounds.y;
        ((area / self.config.density_divisor) as usize)
            .min(self.config.max_particles)
            .max(1)
    }

    fn spawn_indexed(&mut self, index: u32, count: u32) -> Particle {
        let mut ctx = match self.seed {
            Some(seed) => SpawnContext::seeded(
                index,
                count,
                self.bounds,
                seed.wrapping_add(index as u64),
            ),
            None => SpawnContext::new(index, count, self.bounds),
        };
        Particle::spawn(&mut ctx)
    }

    fn repopulate(&mut self) {
        let target = self.target_population();
        self.particles.clear();
        for i in 0..target {
            let particle = self.spawn_indexed(i as u32, target as u32);
            self.particles.push(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingRenderer;

    const BOUNDS: Vec2 = Vec2::new(1280.0, 720.0);

    fn seeded_field() -> ParticleField {
        ParticleField::new(BOUNDS).with_seed(7)
    }

    #[test]
    fn test_population_scales_with_area() {
        let field = seeded_field();
        // 1280 * 720 / 8000 = 115, under the cap.
        assert_eq!(field.particles().len(), 115);

        let big = ParticleField::new(Vec2::new(1920.0, 1080.0)).with_seed(7);
        assert_eq!(big.particles().len(), 150);

        let tiny = ParticleField::new(Vec2::new(50.0, 50.0)).with_seed(7);
        assert_eq!(tiny.particles().len(), 1);
    }

    #[test]
    fn test_velocities_stay_finite() {
        let mut field = seeded_field();
        // Park the pointer exactly on a particle: the zero-distance guard
        // must skip the contribution instead of dividing.
        let on_top = field.particles()[0].position;
        field.set_pointer(on_top);

        for _ in 0..500 {
            field.update();
        }
        for p in field.particles() {
            assert!(p.velocity.x.is_finite());
            assert!(p.velocity.y.is_finite());
            assert!(p.position.x.is_finite());
            assert!(p.position.y.is_finite());
        }
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut field = seeded_field();
        for _ in 0..300 {
            field.update();
            for p in field.particles() {
                assert!(p.position.x >= 0.0 && p.position.x <= BOUNDS.x);
                assert!(p.position.y >= 0.0 && p.position.y <= BOUNDS.y);
            }
        }
    }

    #[test]
    fn test_lifetime_drains_and_respawns() {
        let mut field = seeded_field();
        let life_before: Vec<f32> = field.particles().iter().map(|p| p.life).collect();

        field.update();
        for (p, &before) in field.particles().iter().zip(&life_before) {
            if p.life > before {
                // Respawned: fresh lifetime within the spawn range.
                assert!(p.life >= LIFE_MIN && p.life < LIFE_MAX);
            } else {
                assert!((before - p.life - field.config.life_decay).abs() < 0.0001);
            }
        }

        // Run long enough for every particle to cycle at least once
        // (max lifetime 150 ticks at 0.1 decay = 1500 ticks).
        for _ in 0..1600 {
            field.update();
        }
        for p in field.particles() {
            assert!(p.life < LIFE_MAX);
            assert!(p.position.x >= 0.0 && p.position.x <= BOUNDS.x);
            assert!(p.position.y >= 0.0 && p.position.y <= BOUNDS.y);
        }
    }

    #[test]
    fn test_attractor_pulls_particle() {
        let mut field = ParticleField::new(BOUNDS)
            .with_seed(7)
            .with_attractors(vec![Attractor {
                position: Vec2::new(200.0, 200.0),
                strength: 0.3,
                radius: 30.0,
            }]);
        field.particles[0] = Particle {
            position: Vec2::new(210.0, 200.0),
            velocity: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.3,
            life: 100.0,
        };

        field.update();
        // Pull points from the particle toward the attractor (negative x).
        assert!(field.particles[0].velocity.x < 0.0);
    }

    #[test]
    fn test_attractor_out_of_range_is_inert() {
        let mut field = ParticleField::new(BOUNDS)
            .with_seed(7)
            .with_attractors(vec![Attractor {
                position: Vec2::new(200.0, 200.0),
                strength: 0.3,
                radius: 30.0,
            }]);
        field.particles[0] = Particle {
            position: Vec2::new(300.0, 200.0),
            velocity: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.3,
            life: 100.0,
        };

        field.update();
        assert_eq!(field.particles[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_repels_particle() {
        let mut field = seeded_field().with_attractors(Vec::new());
        field.particles[0] = Particle {
            position: Vec2::new(500.0, 300.0),
            velocity: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.3,
            life: 100.0,
        };
        field.set_pointer(Vec2::new(490.0, 300.0));

        field.update();
        // Pushed away from the pointer: positive x.
        assert!(field.particles[0].velocity.x > 0.0);
    }

    #[test]
    fn test_wall_reflection_restitution() {
        let mut field = seeded_field().with_attractors(Vec::new());
        field.particles.truncate(1);
        field.particles[0] = Particle {
            position: Vec2::new(1.0, 300.0),
            velocity: Vec2::new(-5.0, 0.0),
            radius: 1.0,
            opacity: 0.3,
            life: 100.0,
        };

        field.update();
        let p = field.particles[0];
        assert_eq!(p.position.x, 0.0);
        // Velocity reversed and damped: -5 * 0.99 friction, then * -0.8.
        assert!((p.velocity.x - 5.0 * 0.99 * 0.8).abs() < 0.0001);
    }

    #[test]
    fn test_connections_strictly_under_threshold() {
        let mut field = seeded_field().with_attractors(Vec::new());
        field.particles = vec![
            Particle {
                position: Vec2::new(100.0, 100.0),
                velocity: Vec2::ZERO,
                radius: 1.0,
                opacity: 0.3,
                life: 100.0,
            },
            // 79.9 away: connected.
            Particle {
                position: Vec2::new(179.9, 100.0),
                velocity: Vec2::ZERO,
                radius: 1.0,
                opacity: 0.3,
                life: 100.0,
            },
            // Exactly 80.0 from the second: boundary excluded.
            Particle {
                position: Vec2::new(259.9, 100.0),
                velocity: Vec2::ZERO,
                radius: 1.0,
                opacity: 0.3,
                life: 100.0,
            },
        ];

        let mut recorder = RecordingRenderer::new();
        field.render(&mut recorder);

        let lines = recorder.lines();
        assert_eq!(lines.len(), 1);
        let (from, to, opacity) = lines[0];
        assert_eq!(from, Vec2::new(100.0, 100.0));
        assert_eq!(to, Vec2::new(179.9, 100.0));
        // Opacity inversely proportional to distance.
        let expected = (80.0 - 79.9) / 80.0 * 0.1;
        assert!((opacity - expected).abs() < 0.0005);

        // One clear, one circle per particle.
        assert_eq!(recorder.clear_count(), 1);
        assert_eq!(recorder.circles().len(), 3);
    }

    #[test]
    fn test_resize_keeps_survivors() {
        let mut field = seeded_field();
        let keep = field.particles()[0];

        field.resize(Vec2::new(1920.0, 1080.0));
        assert_eq!(field.particles().len(), 150);
        assert_eq!(field.particles()[0], keep);

        field.resize(Vec2::new(400.0, 400.0));
        // 400 * 400 / 8000 = 20.
        assert_eq!(field.particles().len(), 20);
        assert_eq!(field.particles()[0], keep);
    }

    #[test]
    fn test_glyph_row_layout() {
        let attractors = Attractor::glyph_row(BOUNDS, 8);
        assert_eq!(attractors.len(), 8);

        let start_x = 1280.0 / 2.0 - (8.0 * 40.0) / 2.0;
        for (i, a) in attractors.iter().enumerate() {
            assert!((a.position.x - (start_x + i as f32 * 40.0)).abs() < 0.001);
            assert!((a.position.y - (360.0 - 50.0)).abs() < 0.001);
            assert_eq!(a.strength, 0.3);
            assert_eq!(a.radius, 30.0);
        }
    }

    #[test]
    fn test_seeded_fields_match() {
        let mut a = ParticleField::new(BOUNDS).with_seed(42);
        let mut b = ParticleField::new(BOUNDS).with_seed(42);
        for _ in 0..50 {
            a.update();
            b.update();
        }
        assert_eq!(a.particles(), b.particles());
    }
}
