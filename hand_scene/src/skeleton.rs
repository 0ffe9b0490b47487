//! Neon skeleton overlay for a single hand.

use crate::config::SceneConfig;
use crate::error::Result;
use crate::landmark::{Hand, BONES};
use crate::surface::{Glow, Paint, Surface};

/// Draw the 24 bones and a joint dot on every landmark.
///
/// `hand` must already be in mirrored space.  A hand shorter than the
/// 21-point layout draws nothing and returns the check error.
pub fn draw_hand<S: Surface + ?Sized>(
    surface: &mut S,
    hand:    &Hand,
    color:   u32,
    cfg:     &SceneConfig,
) -> Result<()> {
    hand.check()?;

    let glow = Glow { color, blur: cfg.skeleton_glow };
    let bone = Paint { color, width: cfg.bone_width, glow };
    let joint = Paint { color, width: 0.0, glow };
    let lm = hand.landmarks();

    for &(a, b) in &BONES {
        let from = lm[a].to_pixels(surface.width(), surface.height());
        let to   = lm[b].to_pixels(surface.width(), surface.height());
        surface.line(from, to, &bone);
    }

    for point in lm {
        let center = point.to_pixels(surface.width(), surface.height());
        surface.fill_circle(center, cfg.joint_radius, &joint);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use crate::landmark::{Landmark, LANDMARK_COUNT};
    use crate::surface::recording::{Draw, RecordingSurface};
    use crate::surface::Point;

    fn hand(n: usize) -> Hand {
        (0..n).map(|i| Landmark::new(i as f32 / 20.0, 0.5)).collect()
    }

    #[test]
    fn draws_bones_and_joints() {
        let mut s = RecordingSurface::new(400.0, 200.0);
        draw_hand(&mut s, &hand(LANDMARK_COUNT), 0xFFFF0000, &SceneConfig::default()).unwrap();

        assert_eq!(s.lines().count(), 24);
        assert_eq!(s.circles(), 21);

        for d in &s.draws {
            if let Draw::Circle { radius, paint, .. } = d {
                assert_eq!(*radius, 6.0);
                assert_eq!(paint.glow, Glow { color: 0xFFFF0000, blur: 20.0 });
            }
        }
    }

    #[test]
    fn scales_to_current_surface_size() {
        let mut s = RecordingSurface::new(400.0, 200.0);
        draw_hand(&mut s, &hand(LANDMARK_COUNT), 0xFFFF0000, &SceneConfig::default()).unwrap();
        match &s.draws[0] {
            // bone (0, 1): x = 0 and 0.05, y = 0.5
            Draw::Line { from, to, paint } => {
                assert_eq!(*from, Point::new(0.0, 100.0));
                assert_eq!(*to, Point::new(20.0, 100.0));
                assert_eq!(paint.width, 4.0);
            }
            other => panic!("expected a line, got {:?}", other),
        }

        s.width = 800.0;
        s.draws.clear();
        draw_hand(&mut s, &hand(LANDMARK_COUNT), 0xFFFF0000, &SceneConfig::default()).unwrap();
        assert!(matches!(&s.draws[0], Draw::Line { to, .. } if *to == Point::new(40.0, 100.0)));
    }

    #[test]
    fn short_hand_draws_nothing() {
        let mut s = RecordingSurface::new(400.0, 200.0);
        let err = draw_hand(&mut s, &hand(5), 0xFFFF0000, &SceneConfig::default()).unwrap_err();
        assert_eq!(err, SceneError::MalformedHand { expected: 21, got: 5 });
        assert!(s.draws.is_empty());
    }
}
