//! Synthetic hand poses for the simulator.
//!
//! Produces a palm-forward open hand in the 21-landmark layout, in
//! *display* space, anchored at the centre of the palm.  Fingers curl a
//! little over time so the skeleton and the emitting tips keep moving.

use hand_scene::{Hand, Landmark};

/// Offsets from the palm centre for an open right hand seen palm-on, in
/// frame-height units.  Ordered by landmark index.
const OPEN_HAND: [(f32, f32); 21] = [
    ( 0.000,  0.170),                                                      // wrist
    (-0.075,  0.135), (-0.125,  0.085), (-0.160,  0.035), (-0.190, -0.010), // thumb
    (-0.055,  0.005), (-0.065, -0.075), (-0.070, -0.125), (-0.075, -0.170), // index
    (-0.005,  0.000), (-0.005, -0.090), (-0.005, -0.145), (-0.005, -0.195), // middle
    ( 0.045,  0.010), ( 0.050, -0.070), ( 0.055, -0.120), ( 0.060, -0.160), // ring
    ( 0.085,  0.035), ( 0.100, -0.025), ( 0.110, -0.060), ( 0.120, -0.095), // pinky
];

/// Which way the thumb points on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Thumb on the left of the screen.
    Right,
    /// Thumb on the right of the screen.
    Left,
}

/// An open hand centred on `(cx, cy)` (normalised display space).
///
/// `aspect` is width / height of the frame, used to keep the hand's
/// proportions; `phase` drives the finger curl.
pub fn open_hand(cx: f32, cy: f32, side: Side, aspect: f32, phase: f32) -> Hand {
    let flip = match side {
        Side::Right =>  1.0,
        Side::Left  => -1.0,
    };
    let aspect = aspect.max(0.1);

    OPEN_HAND
        .iter()
        .enumerate()
        .map(|(i, &(dx, dy))| {
            let (dx, dy) = curl(i, dx, dy, phase);
            Landmark::new(cx + flip * dx / aspect, cy + dy)
        })
        .collect()
}

/// Pull joints beyond the knuckle back toward it.  Each finger runs on its
/// own phase offset.
fn curl(index: usize, dx: f32, dy: f32, phase: f32) -> (f32, f32) {
    if index == 0 {
        return (dx, dy);
    }
    let finger = (index - 1) / 4;
    let joint  = (index - 1) % 4;
    if joint == 0 {
        return (dx, dy);
    }
    let knuckle = OPEN_HAND[1 + finger * 4];
    let amount = 0.12 * (0.5 + 0.5 * (phase + finger as f32 * 0.9).sin());
    (
        dx - (dx - knuckle.0) * amount,
        dy - (dy - knuckle.1) * amount,
    )
}
