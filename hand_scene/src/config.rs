//! Tunables for the scene.  Defaults give the stock neon look.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};
use crate::landmark::{INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};

/// Everything the renderer can be tuned with.
///
/// Lightness values are percentages (`hsl(hue, 100%, L%)`), sizes and blur
/// radii are pixels, speeds are pixels per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    // ── particles ─────────────────────────────────────────────────────────
    /// Per-fingertip, per-frame chance of an emission.
    pub emission_probability:   f64,
    pub particles_per_emission: usize,
    /// Frames a particle lives before removal.
    pub particle_life:          i32,
    /// Multiplicative size decay per frame.
    pub size_decay:             f32,
    /// A particle at or below this size is removed.
    pub min_particle_size:      f32,
    /// Initial glyph size, `[min, max)`.
    pub size_range:             [f32; 2],
    /// Velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed:              f32,
    /// Rotation speed is drawn from `[-max_spin, max_spin]` rad/frame.
    pub max_spin:               f32,
    pub particle_glow:          f32,
    pub particle_lightness:     f32,
    /// Landmark indices that emit particles.
    pub emitting_tips:          Vec<usize>,

    // ── skeleton ──────────────────────────────────────────────────────────
    pub bone_width:             f32,
    pub joint_radius:           f32,
    pub skeleton_glow:          f32,
    pub skeleton_lightness:     f32,

    // ── thumb string ──────────────────────────────────────────────────────
    pub string_glow:            f32,
    pub string_lightness:       f32,

    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed:                   Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            emission_probability:   0.5,
            particles_per_emission: 2,
            particle_life:          100,
            size_decay:             0.98,
            min_particle_size:      1.0,
            size_range:             [10.0, 20.0],
            max_speed:              2.0,
            max_spin:               0.05,
            particle_glow:          10.0,
            particle_lightness:     70.0,
            emitting_tips:          vec![THUMB_TIP, INDEX_TIP],
            bone_width:             4.0,
            joint_radius:           6.0,
            skeleton_glow:          20.0,
            skeleton_lightness:     50.0,
            string_glow:            15.0,
            string_lightness:       80.0,
            seed:                   None,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(SceneError::InvalidConfig(msg));

        // JSON numbers past f32::MAX parse as infinity
        let floats = [
            ("size_decay",         self.size_decay),
            ("min_particle_size",  self.min_particle_size),
            ("size_range[0]",      self.size_range[0]),
            ("size_range[1]",      self.size_range[1]),
            ("max_speed",          self.max_speed),
            ("max_spin",           self.max_spin),
            ("particle_glow",      self.particle_glow),
            ("particle_lightness", self.particle_lightness),
            ("bone_width",         self.bone_width),
            ("joint_radius",       self.joint_radius),
            ("skeleton_glow",      self.skeleton_glow),
            ("skeleton_lightness", self.skeleton_lightness),
            ("string_glow",        self.string_glow),
            ("string_lightness",   self.string_lightness),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return bad(format!("{} must be finite, got {}", name, value));
        }

        if !(0.0..=1.0).contains(&self.emission_probability) {
            return bad(format!("emission_probability {} not in [0, 1]", self.emission_probability));
        }
        if !(self.size_decay > 0.0 && self.size_decay <= 1.0) {
            return bad(format!("size_decay {} not in (0, 1]", self.size_decay));
        }
        let [lo, hi] = self.size_range;
        if !(lo > 0.0 && lo < hi) {
            return bad(format!("size_range [{}, {}) is empty or non-positive", lo, hi));
        }
        if self.particle_life <= 0 {
            return bad(format!("particle_life {} must be positive", self.particle_life));
        }
        if self.max_speed < 0.0 || self.max_spin < 0.0 {
            return bad("max_speed and max_spin must be non-negative".to_string());
        }
        if let Some(&tip) = self.emitting_tips.iter().find(|&&t| t >= LANDMARK_COUNT) {
            return bad(format!("emitting tip {} outside the {}-point hand", tip, LANDMARK_COUNT));
        }
        Ok(())
    }
}
