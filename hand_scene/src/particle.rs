//! Glyph particles emitted from fingertips.
//!
//! Each particle is a mathematical symbol that drifts, spins, shrinks, and
//! dies.  The set is owned and mutated only by [`ParticleSystem`]; ordering
//! inside it carries no meaning.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::config::SceneConfig;
use crate::surface::{Glow, Paint, Point, Surface};

/// The symbol palette particles are drawn from.
pub const GLYPHS: [&str; 15] = [
    "∑", "∫", "π", "√", "∞", "≈", "≠", "±", "∂", "∇", "x²", "e^x", "sin", "cos", "log",
];

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Pixel position.
    pub pos:      Point,
    /// Pixels per frame.
    pub vel:      Point,
    pub size:     f32,
    /// ARGB, fixed at spawn.
    pub color:    u32,
    /// Frames left.
    pub life:     i32,
    pub glyph:    &'static str,
    pub rotation: f32,
    /// Radians per frame.
    pub spin:     f32,
}

impl Particle {
    /// Integrate one frame.
    pub fn step(&mut self, size_decay: f32) {
        self.pos.x    += self.vel.x;
        self.pos.y    += self.vel.y;
        self.rotation += self.spin;
        self.life     -= 1;
        self.size     *= size_decay;
    }

    pub fn is_spent(&self, min_size: f32) -> bool {
        self.life <= 0 || self.size <= min_size
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ParticleSystem
// ════════════════════════════════════════════════════════════════════════════

pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng:       StdRng,

    emission_probability:   f64,
    particles_per_emission: usize,
    life:                   i32,
    size_decay:             f32,
    min_size:               f32,
    size_range:             [f32; 2],
    max_speed:              f32,
    max_spin:               f32,
    glow:                   f32,
}

impl ParticleSystem {
    /// `cfg` must already be validated.
    pub fn new(cfg: &SceneConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_os_rng(),
        };
        ParticleSystem {
            particles:              Vec::new(),
            rng,
            emission_probability:   cfg.emission_probability,
            particles_per_emission: cfg.particles_per_emission,
            life:                   cfg.particle_life,
            size_decay:             cfg.size_decay,
            min_size:               cfg.min_particle_size,
            size_range:             cfg.size_range,
            max_speed:              cfg.max_speed,
            max_spin:               cfg.max_spin,
            glow:                   cfg.particle_glow,
        }
    }

    pub fn len(&self)      -> usize       { self.particles.len() }
    pub fn is_empty(&self) -> bool        { self.particles.is_empty() }
    pub fn particles(&self) -> &[Particle] { &self.particles }

    /// Add a burst of particles at `at` (pixel space), all tinted `color`.
    pub fn spawn(&mut self, at: Point, color: u32) {
        let [lo, hi] = self.size_range;
        for _ in 0..self.particles_per_emission {
            let particle = Particle {
                pos:      at,
                vel:      Point::new(
                    self.rng.random_range(-self.max_speed..=self.max_speed),
                    self.rng.random_range(-self.max_speed..=self.max_speed),
                ),
                size:     self.rng.random_range(lo..hi),
                color,
                life:     self.life,
                glyph:    GLYPHS[self.rng.random_range(0..GLYPHS.len())],
                rotation: self.rng.random_range(0.0..TAU),
                spin:     self.rng.random_range(-self.max_spin..=self.max_spin),
            };
            self.particles.push(particle);
        }
    }

    /// Flip the emission coin for one fingertip and spawn on heads.
    /// Returns whether a burst was spawned.
    pub fn emit(&mut self, at: Point, color: u32) -> bool {
        let fire = self.rng.random_bool(self.emission_probability);
        if fire {
            self.spawn(at, color);
        }
        fire
    }

    /// Age every particle by one frame, draw it, and drop the spent ones.
    ///
    /// A particle is drawn on the frame it dies, then removed.
    pub fn advance_and_render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (decay, min_size, blur) = (self.size_decay, self.min_size, self.glow);

        self.particles.retain_mut(|p| {
            p.step(decay);

            let paint = Paint {
                color: p.color,
                width: 0.0,
                glow:  Glow { color: p.color, blur },
            };
            surface.glyph(p.glyph, p.pos, p.size, p.rotation, &paint);

            !p.is_spent(min_size)
        });
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
