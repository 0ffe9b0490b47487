//! Hand landmarks, the 21-point topology, and the selfie-view mirror.
//!
//! Landmarks arrive in *detector space*: `x` and `y` normalised to `[0, 1]`
//! relative to the un-mirrored camera frame.  The displayed video is
//! mirrored, so every drawing step works on a mirrored copy
//! (`x' = 1 - x`, `y` unchanged).

use crate::error::{Result, SceneError};
use crate::surface::Point;

// ════════════════════════════════════════════════════════════════════════════
// Topology
// ════════════════════════════════════════════════════════════════════════════

/// Number of landmarks in a complete hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP:   usize = 16;
pub const PINKY_TIP:  usize = 20;

/// All five fingertips, thumb to pinky.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Bone connections drawn by the skeleton overlay.
pub const BONES: [(usize, usize); 24] = [
    (0, 1),   (1, 2),   (2, 3),   (3, 4),    // thumb
    (0, 5),   (5, 6),   (6, 7),   (7, 8),    // index
    (0, 9),   (9, 10),  (10, 11), (11, 12),  // middle
    (0, 13),  (13, 14), (14, 15), (15, 16),  // ring
    (0, 17),  (17, 18), (18, 19), (19, 20),  // pinky
    (5, 9),   (9, 13),  (13, 17), (0, 17),   // palm
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// A single tracked point.  `z` is carried through but never drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }

    pub fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    /// Horizontal flip into the selfie view.
    pub fn mirrored(self) -> Self {
        Landmark { x: 1.0 - self.x, ..self }
    }

    /// Scale into pixel space for a surface of the given size.
    pub fn to_pixels(self, width: f32, height: f32) -> Point {
        Point::new(self.x * width, self.y * height)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hand
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand for one frame.
///
/// Hands carry no identity between frames; the detector hands us a fresh
/// list every time.  The layout is fixed (see [`BONES`]), but the
/// collaborator is not trusted to always deliver all 21 points, so the
/// landmark list is kept as-is and checked with [`Hand::check`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hand {
    landmarks: Vec<Landmark>,
}

impl Hand {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Hand { landmarks }
    }

    pub fn landmarks(&self) -> &[Landmark] { &self.landmarks }
    pub fn len(&self)       -> usize       { self.landmarks.len() }
    pub fn is_empty(&self)  -> bool        { self.landmarks.is_empty() }

    /// Landmark at `index`, or `None` if the detector didn't supply it.
    pub fn landmark(&self, index: usize) -> Option<Landmark> {
        self.landmarks.get(index).copied()
    }

    /// Fails when the hand is too short for the bone topology.
    pub fn check(&self) -> Result<()> {
        if self.landmarks.len() < LANDMARK_COUNT {
            return Err(SceneError::MalformedHand {
                expected: LANDMARK_COUNT,
                got:      self.landmarks.len(),
            });
        }
        Ok(())
    }

    pub fn mirrored(&self) -> Hand {
        self.landmarks.iter().map(|lm| lm.mirrored()).collect()
    }
}

impl From<Vec<Landmark>> for Hand {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Hand::new(landmarks)
    }
}

impl FromIterator<Landmark> for Hand {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        Hand::new(iter.into_iter().collect())
    }
}

/// Mirror every hand into the displayed (selfie) view.
pub fn mirror(hands: &[Hand]) -> Vec<Hand> {
    hands.iter().map(Hand::mirrored).collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
