//! The drawing surface the scene renders into.
//!
//! The engine only issues primitives (clear, line, filled circle, glyph);
//! rasterisation belongs to the implementor.  Width and height are asked
//! for on every scale computation, so a surface may be resized between any
//! two calls.

/// A point in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Soft halo drawn around a primitive.  `blur` is the halo radius in pixels;
/// zero disables it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: u32,
    pub blur:  f32,
}

impl Glow {
    pub const NONE: Glow = Glow { color: 0, blur: 0.0 };
}

/// Color, stroke width, and glow for one primitive.  `width` only applies
/// to lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: u32,
    pub width: f32,
    pub glow:  Glow,
}

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Wipe the whole surface.  No trails survive a clear.
    fn clear(&mut self);

    /// Straight segment with round caps.
    fn line(&mut self, from: Point, to: Point, paint: &Paint);

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint);

    /// Draw `text` of pixel height `size`, rotated by `rotation` radians
    /// about `at`.  The text box is anchored with its top-left corner at
    /// `(-size/2, -size/2)` in the rotated frame.
    fn glyph(&mut self, text: &str, at: Point, size: f32, rotation: f32, paint: &Paint);
}

// ════════════════════════════════════════════════════════════════════════════
// Recording surface (tests)
// ════════════════════════════════════════════════════════════════════════════
