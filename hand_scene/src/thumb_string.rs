//! The "string" stretched between two thumbs.
//!
//! Thins linearly as the thumbs separate: `max(1, 5 - d/200)`.  Distance
//! only ever enters as a subtracted term, so coincident thumbs give the
//! full 5px and nothing divides by the distance.

use crate::color::WHITE;
use crate::surface::{Glow, Paint, Point, Surface};

pub const MAX_WIDTH: f32 = 5.0;
pub const MIN_WIDTH: f32 = 1.0;
/// Pixels of separation per pixel of lost width.
pub const FALLOFF:   f32 = 200.0;

pub fn string_width(distance: f32) -> f32 {
    (MAX_WIDTH - distance / FALLOFF).max(MIN_WIDTH)
}

/// A string as drawn in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbString {
    pub from:  Point,
    pub to:    Point,
    pub width: f32,
}

impl ThumbString {
    pub fn between(from: Point, to: Point) -> Self {
        ThumbString { from, to, width: string_width(from.distance(to)) }
    }

    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

/// Draw the string between two pixel-space thumb tips.  The glow is always
/// white, whatever the stroke color.
pub fn draw_thumb_string<S: Surface + ?Sized>(
    surface: &mut S,
    from:    Point,
    to:      Point,
    color:   u32,
    blur:    f32,
) -> ThumbString {
    let string = ThumbString::between(from, to);
    let paint = Paint {
        color,
        width: string.width,
        glow:  Glow { color: WHITE, blur },
    };
    surface.line(from, to, &paint);
    string
}
