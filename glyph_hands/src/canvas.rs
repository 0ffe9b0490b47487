//! Software framebuffer implementing [`hand_scene::Surface`].
//!
//! Lines and discs are shaded from a distance field (distance to the
//! segment or to the centre), which gives round caps and a one-pixel
//! anti-aliased edge for free.  Glow is a soft halo that falls off
//! quadratically over `blur` pixels outside the shape.  Glyphs are the
//! 5×7 bitmap font, scaled to the particle size and rotated about the
//! particle position.

use hand_scene::{Paint, Point, Surface};

use crate::font::{text_cell, text_columns, GLYPH_H};

/// Peak opacity of a glow halo, right at the shape's edge.
const GLOW_STRENGTH: f32 = 0.45;

pub struct Canvas {
    buf:        Vec<u32>,
    width:      usize,
    height:     usize,
    background: u32,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: u32) -> Self {
        Canvas {
            buf: vec![background; width * height],
            width,
            height,
            background,
        }
    }

    /// Reallocate for a new viewport size.  Returns false when the size is
    /// unchanged.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if (width, height) == (self.width, self.height) {
            return false;
        }
        self.width  = width;
        self.height = height;
        self.buf    = vec![self.background; width * height];
        true
    }

    pub fn size(&self)   -> (usize, usize) { (self.width, self.height) }
    pub fn buffer(&self) -> &[u32]         { &self.buf }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.buf[y * self.width + x])
        } else {
            None
        }
    }

    // ── Primitive helpers ─────────────────────────────────────────────────

    fn blend_pixel(&mut self, x: usize, y: usize, color: u32, alpha: f32) {
        let i = y * self.width + x;
        self.buf[i] = blend(self.buf[i], color, alpha);
    }

    /// Pixel rectangle covering `[min, max]`, clipped to the canvas.
    fn clip(&self, min: Point, max: Point) -> Option<(usize, usize, usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min((self.width - 1) as f32);
        let y1 = max.y.ceil().min((self.height - 1) as f32);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    /// Shade every pixel in `rect` from its distance to a shape whose solid
    /// part is everything within `half` pixels.
    fn shade(
        &mut self,
        rect:  (usize, usize, usize, usize),
        half:  f32,
        paint: &Paint,
        dist:  impl Fn(Point) -> f32,
    ) {
        let (x0, y0, x1, y1) = rect;
        let blur = paint.glow.blur;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = dist(Point::new(x as f32 + 0.5, y as f32 + 0.5));

                if blur > 0.0 && d > half - 0.5 {
                    let g = 1.0 - (d - half) / blur;
                    if g > 0.0 {
                        self.blend_pixel(x, y, paint.glow.color, GLOW_STRENGTH * (g * g).min(1.0));
                    }
                }

                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, paint.color, coverage);
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Surface
// ════════════════════════════════════════════════════════════════════════════

impl Surface for Canvas {
    fn width(&self)  -> f32 { self.width as f32 }
    fn height(&self) -> f32 { self.height as f32 }

    fn clear(&mut self) {
        self.buf.fill(self.background);
    }

    fn line(&mut self, from: Point, to: Point, paint: &Paint) {
        let half = paint.width / 2.0;
        let reach = half + paint.glow.blur + 1.0;
        let min = Point::new(from.x.min(to.x) - reach, from.y.min(to.y) - reach);
        let max = Point::new(from.x.max(to.x) + reach, from.y.max(to.y) + reach);
        if let Some(rect) = self.clip(min, max) {
            self.shade(rect, half, paint, |p| segment_distance(p, from, to));
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        let reach = radius + paint.glow.blur + 1.0;
        let min = Point::new(center.x - reach, center.y - reach);
        let max = Point::new(center.x + reach, center.y + reach);
        if let Some(rect) = self.clip(min, max) {
            self.shade(rect, radius, paint, |p| p.distance(center));
        }
    }

    fn glyph(&mut self, text: &str, at: Point, size: f32, rotation: f32, paint: &Paint) {
        if size <= 0.0 || text.is_empty() {
            return;
        }
        let chars: Vec<char> = text.chars().collect();
        let cell = size / GLYPH_H as f32;
        let half = size / 2.0;
        let text_w = text_columns(chars.len()) as f32 * cell;

        // farthest corner of the rotated text box, plus one cell of halo
        let reach = half.max(text_w - half).hypot(half) + cell + 1.0;
        let min = Point::new(at.x - reach, at.y - reach);
        let max = Point::new(at.x + reach, at.y + reach);
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else { return };

        let (sin, cos) = rotation.sin_cos();
        let glow_alpha = if paint.glow.blur > 0.0 {
            GLOW_STRENGTH * (paint.glow.blur / 10.0).min(1.0)
        } else {
            0.0
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - at.x;
                let dy = y as f32 + 0.5 - at.y;
                // undo the rotation, then shift to the text box origin
                let u = (dx * cos + dy * sin + half) / cell;
                let v = (-dx * sin + dy * cos + half) / cell;
                let (col, row) = (u.floor() as i32, v.floor() as i32);

                if text_cell(&chars, col, row) {
                    self.blend_pixel(x, y, paint.color, 1.0);
                } else if glow_alpha > 0.0 && lit_neighbour(&chars, col, row) {
                    self.blend_pixel(x, y, paint.glow.color, glow_alpha);
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Geometry and color helpers
// ════════════════════════════════════════════════════════════════════════════

fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0)
    };
    p.distance(Point::new(a.x + t * abx, a.y + t * aby))
}

fn lit_neighbour(text: &[char], col: i32, row: i32) -> bool {
    (-1..=1).any(|dr| (-1..=1).any(|dc| text_cell(text, col + dc, row + dr)))
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t).round() as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_scene::Glow;

    const BG:  u32 = 0xFF000000;
    const RED: u32 = 0xFFFF0000;

    fn paint(width: f32, blur: f32) -> Paint {
        Paint { color: RED, width, glow: Glow { color: RED, blur } }
    }

    fn lit(c: &Canvas) -> usize {
        c.buffer().iter().filter(|&&p| p != BG).count()
    }

    #[test]
    fn clear_restores_background() {
        let mut c = Canvas::new(64, 48, BG);
        c.fill_circle(Point::new(32.0, 24.0), 10.0, &paint(0.0, 0.0));
        assert!(lit(&c) > 0);
        c.clear();
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn line_is_solid_on_axis_and_dark_far_away() {
        let mut c = Canvas::new(100, 100, BG);
        c.line(Point::new(10.0, 50.0), Point::new(90.0, 50.0), &paint(4.0, 0.0));
        assert_eq!(c.pixel(50, 50), Some(RED));
        assert_eq!(c.pixel(50, 60), Some(BG));
        // round cap reaches past the endpoint by half the width
        assert_ne!(c.pixel(91, 50), Some(BG));
        assert_eq!(c.pixel(93, 50), Some(BG));
    }

    #[test]
    fn glow_tints_the_surroundings() {
        let mut c = Canvas::new(100, 100, BG);
        c.line(Point::new(10.0, 50.0), Point::new(90.0, 50.0), &paint(4.0, 20.0));
        let halo = c.pixel(50, 60).unwrap();
        assert_ne!(halo, BG);
        assert_ne!(halo, RED);
        assert_eq!(c.pixel(50, 90), Some(BG));
    }

    #[test]
    fn circle_fills_its_centre() {
        let mut c = Canvas::new(40, 40, BG);
        c.fill_circle(Point::new(20.0, 20.0), 6.0, &paint(0.0, 0.0));
        assert_eq!(c.pixel(20, 20), Some(RED));
        assert_eq!(c.pixel(20, 30), Some(BG));
    }

    #[test]
    fn off_canvas_primitives_are_clipped() {
        let mut c = Canvas::new(32, 32, BG);
        c.line(Point::new(-500.0, -20.0), Point::new(900.0, 40.0), &paint(5.0, 15.0));
        c.fill_circle(Point::new(-100.0, -100.0), 6.0, &paint(0.0, 20.0));
        c.glyph("log", Point::new(1e4, 1e4), 18.0, 1.0, &paint(0.0, 10.0));
        // the long line crosses the canvas
        assert!(lit(&c) > 0);
    }

    #[test]
    fn glyph_draws_near_its_anchor() {
        let mut c = Canvas::new(100, 100, BG);
        c.glyph("∑", Point::new(50.0, 50.0), 14.0, 0.0, &paint(0.0, 0.0));
        // top bar of sigma spans the box's top row: y in [43, 45)
        assert_eq!(c.pixel(45, 43), Some(RED));
        assert_eq!(c.pixel(10, 10), Some(BG));
        assert!(lit(&c) > 10);
    }

    #[test]
    fn rotated_glyph_still_draws() {
        let mut c = Canvas::new(100, 100, BG);
        c.glyph("cos", Point::new(50.0, 50.0), 20.0, 2.3, &paint(0.0, 10.0));
        assert!(lit(&c) > 20);
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut c = Canvas::new(10, 10, BG);
        c.fill_circle(Point::new(5.0, 5.0), 3.0, &paint(0.0, 0.0));
        assert!(!c.resize(10, 10));
        assert!(c.resize(30, 20));
        assert_eq!(c.size(), (30, 20));
        assert_eq!(c.buffer().len(), 600);
        assert_eq!(lit(&c), 0);
        assert_eq!(c.width(), 30.0);
    }

    #[test]
    fn zero_sized_canvas_ignores_drawing() {
        let mut c = Canvas::new(0, 0, BG);
        c.clear();
        c.line(Point::new(0.0, 0.0), Point::new(5.0, 5.0), &paint(4.0, 20.0));
        c.glyph("π", Point::new(0.0, 0.0), 12.0, 0.0, &paint(0.0, 10.0));
        assert!(c.buffer().is_empty());
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(BG, RED, 0.0), BG);
        assert_eq!(blend(BG, RED, 1.0), RED);
        assert_eq!(blend(BG, 0xFFFFFFFF, 0.5), 0xFF808080);
    }
}
