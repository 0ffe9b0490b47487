//! The per-frame orchestrator.
//!
//! [`SceneRenderer::update`] is called once per animation frame by whatever
//! paces frames.  Each call:
//!
//! 1. clears the surface,
//! 2. mirrors the incoming hands into the selfie view,
//! 3. ages and draws every live particle (even with no hands in view),
//! 4. draws each hand's skeleton and flips an emission coin per emitting tip,
//! 5. strings the thumbs together when exactly two hands are present,
//! 6. advances the hue.

use crate::color::HueCycler;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::landmark::{self, Hand, THUMB_TIP};
use crate::particle::ParticleSystem;
use crate::skeleton;
use crate::surface::Surface;
use crate::thumb_string::{self, ThumbString};

/// What one `update` did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub hands_drawn:       usize,
    pub hands_skipped:     usize,
    pub particles_spawned: usize,
    pub live_particles:    usize,
    pub thumb_string:      Option<ThumbString>,
}

pub struct SceneRenderer {
    config:    SceneConfig,
    hue:       HueCycler,
    particles: ParticleSystem,
}

impl SceneRenderer {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let particles = ParticleSystem::new(&config);
        Ok(SceneRenderer {
            config,
            hue: HueCycler::new(),
            particles,
        })
    }

    pub fn config(&self)    -> &SceneConfig    { &self.config }
    pub fn hue(&self)       -> &HueCycler      { &self.hue }
    pub fn particles(&self) -> &ParticleSystem { &self.particles }

    /// Render one frame.  `hands` are in detector (un-mirrored) space; an
    /// empty slice is a normal frame with nobody in view.
    pub fn update<S: Surface + ?Sized>(&mut self, hands: &[Hand], surface: &mut S) -> FrameStats {
        let mut stats = FrameStats::default();

        surface.clear();
        let hands = landmark::mirror(hands);

        self.particles.advance_and_render(surface);

        let skeleton_color = self.hue.color(self.config.skeleton_lightness);
        let particle_color = self.hue.color(self.config.particle_lightness);

        for (i, hand) in hands.iter().enumerate() {
            if let Err(e) = skeleton::draw_hand(surface, hand, skeleton_color, &self.config) {
                log::debug!("hand {} skipped: {}", i, e);
                stats.hands_skipped += 1;
                continue;
            }
            stats.hands_drawn += 1;

            for &tip in &self.config.emitting_tips {
                let Some(lm) = hand.landmark(tip) else { continue };
                let at = lm.to_pixels(surface.width(), surface.height());
                if self.particles.emit(at, particle_color) {
                    stats.particles_spawned += self.config.particles_per_emission;
                }
            }
        }

        // Three or more hands never get a string.
        if let [a, b] = hands.as_slice() {
            if let (Some(ta), Some(tb)) = (a.landmark(THUMB_TIP), b.landmark(THUMB_TIP)) {
                let (w, h) = (surface.width(), surface.height());
                stats.thumb_string = Some(thumb_string::draw_thumb_string(
                    surface,
                    ta.to_pixels(w, h),
                    tb.to_pixels(w, h),
                    self.hue.color(self.config.string_lightness),
                    self.config.string_glow,
                ));
            }
        }

        self.hue.advance();
        stats.live_particles = self.particles.len();
        stats
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;
    use crate::landmark::{Landmark, LANDMARK_COUNT};
    use crate::surface::recording::{Draw, RecordingSurface};
    use crate::surface::Point;

    fn renderer(emission_probability: f64) -> SceneRenderer {
        SceneRenderer::new(SceneConfig {
            emission_probability,
            seed: Some(7),
            ..SceneConfig::default()
        })
        .unwrap()
    }

    /// Every landmark at `(x, y)`, thumb tip moved to `thumb`.
    fn hand_at(x: f32, y: f32, thumb: (f32, f32)) -> Hand {
        (0..LANDMARK_COUNT)
            .map(|i| {
                if i == THUMB_TIP { Landmark::new(thumb.0, thumb.1) } else { Landmark::new(x, y) }
            })
            .collect()
    }

    fn hands(n: usize) -> Vec<Hand> {
        (0..n).map(|i| hand_at(0.2 + i as f32 * 0.2, 0.5, (0.3, 0.3))).collect()
    }

    fn string_lines(s: &RecordingSurface) -> usize {
        s.lines()
            .filter(|d| matches!(d, Draw::Line { paint, .. } if paint.glow.color == WHITE))
            .count()
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = SceneConfig { size_decay: 0.0, ..SceneConfig::default() };
        assert!(SceneRenderer::new(cfg).is_err());

        let cfg: SceneConfig =
            serde_json::from_str(r#"{ "max_speed": 1e39, "emission_probability": 1.0 }"#).unwrap();
        assert!(SceneRenderer::new(cfg).is_err());
    }

    #[test]
    fn clears_first_every_frame() {
        let mut scene = renderer(1.0);
        let mut s = RecordingSurface::new(640.0, 480.0);
        scene.update(&hands(1), &mut s);
        assert_eq!(s.draws[0], Draw::Clear);
        assert_eq!(s.clears(), 1);
    }

    #[test]
    fn string_only_for_exactly_two_hands() {
        for n in [0, 1, 3] {
            let mut scene = renderer(0.0);
            let mut s = RecordingSurface::new(640.0, 480.0);
            let stats = scene.update(&hands(n), &mut s);
            assert!(stats.thumb_string.is_none(), "{} hands", n);
            assert_eq!(string_lines(&s), 0, "{} hands", n);
            assert_eq!(stats.hands_drawn, n);
        }

        let mut scene = renderer(0.0);
        let mut s = RecordingSurface::new(640.0, 480.0);
        let stats = scene.update(&hands(2), &mut s);
        assert!(stats.thumb_string.is_some());
        assert_eq!(string_lines(&s), 1);
    }

    #[test]
    fn string_joins_mirrored_thumb_tips() {
        let mut scene = renderer(0.0);
        let mut s = RecordingSurface::new(1000.0, 1000.0);
        let pair = vec![
            hand_at(0.5, 0.5, (0.5, 0.5)),
            hand_at(0.5, 0.5, (0.55, 0.5)),
        ];
        let stats = scene.update(&pair, &mut s);
        let string = stats.thumb_string.expect("two hands make a string");

        assert!((string.from.x - 500.0).abs() < 1e-3);
        assert!((string.to.x - 450.0).abs() < 1e-3);
        assert!((string.width - 4.75).abs() < 1e-4);
    }

    #[test]
    fn only_thumb_and_index_emit() {
        let mut scene = renderer(1.0);
        let mut s = RecordingSurface::new(640.0, 480.0);
        let stats = scene.update(&hands(1), &mut s);
        // two tips, two particles each
        assert_eq!(stats.particles_spawned, 4);
        assert_eq!(stats.live_particles, 4);

        let spawn_points: Vec<Point> = scene.particles().particles().iter().map(|p| p.pos).collect();
        let thumb = Landmark::new(0.3, 0.3).mirrored().to_pixels(640.0, 480.0);
        let index = Landmark::new(0.2, 0.5).mirrored().to_pixels(640.0, 480.0);
        assert_eq!(spawn_points.iter().filter(|&&p| p == thumb).count(), 2);
        assert_eq!(spawn_points.iter().filter(|&&p| p == index).count(), 2);
    }

    #[test]
    fn new_particles_use_this_frames_hue() {
        let mut scene = renderer(1.0);
        let mut s = RecordingSurface::new(640.0, 480.0);
        for _ in 0..10 { scene.update(&[], &mut s); }
        let expected = scene.hue().color(70.0);
        scene.update(&hands(1), &mut s);
        assert!(scene.particles().particles().iter().all(|p| p.color == expected));
    }

    #[test]
    fn hue_advances_once_per_update() {
        let mut scene = renderer(0.5);
        let mut s = RecordingSurface::new(640.0, 480.0);
        for n in 1..=5 {
            scene.update(&hands(n % 3), &mut s);
            assert_eq!(scene.hue().hue(), n as u64);
        }
    }

    #[test]
    fn malformed_hand_is_skipped_not_fatal() {
        let mut scene = renderer(1.0);
        let mut s = RecordingSurface::new(640.0, 480.0);
        let short: Hand = (0..6).map(|_| Landmark::new(0.5, 0.5)).collect();
        let stats = scene.update(&[short, hand_at(0.4, 0.4, (0.3, 0.3))], &mut s);

        assert_eq!(stats.hands_skipped, 1);
        assert_eq!(stats.hands_drawn, 1);
        assert_eq!(stats.particles_spawned, 4);
        // the short hand still has a thumb tip, so the pair is strung
        assert!(stats.thumb_string.is_some());
    }

    #[test]
    fn particles_outlive_the_hands_that_made_them() {
        let mut scene = renderer(1.0);
        let mut s = RecordingSurface::new(640.0, 480.0);
        scene.update(&hands(1), &mut s);
        assert_eq!(scene.particles().len(), 4);

        for frame in 1..=150 {
            s.draws.clear();
            let stats = scene.update(&[], &mut s);
            assert_eq!(s.clears(), 1);
            if frame < 100 {
                assert_eq!(stats.live_particles, 4, "frame {}", frame);
                assert_eq!(s.glyphs(), 4);
            } else {
                assert_eq!(stats.live_particles, 0, "frame {}", frame);
            }
        }
    }

    #[test]
    fn reads_surface_size_every_frame() {
        let mut scene = renderer(0.0);
        let mut s = RecordingSurface::new(100.0, 100.0);
        let pair = vec![hand_at(0.5, 0.5, (0.0, 0.0)), hand_at(0.5, 0.5, (1.0, 0.0))];

        let narrow = scene.update(&pair, &mut s).thumb_string.unwrap();
        s.width = 1000.0;
        let wide = scene.update(&pair, &mut s).thumb_string.unwrap();

        assert_eq!(narrow.length(), 100.0);
        assert_eq!(wide.length(), 1000.0);
    }
}
