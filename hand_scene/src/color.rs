//! The hue cycler and HSL → ARGB conversion.
//!
//! All tinting in the scene is `hsl(hue, 100%, L%)` for a per-use lightness
//! `L`.  The hue advances by one every frame and is reduced modulo 360 only
//! when a color is produced.

/// Opaque white, used for the thumb-string glow.
pub const WHITE: u32 = 0xFFFFFFFF;

// ════════════════════════════════════════════════════════════════════════════
// HueCycler
// ════════════════════════════════════════════════════════════════════════════

/// Monotonic hue counter owned by the scene renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HueCycler {
    hue: u64,
}

impl HueCycler {
    pub fn new() -> Self {
        HueCycler { hue: 0 }
    }

    /// Raw counter: number of frames advanced since construction.
    pub fn hue(&self) -> u64 { self.hue }

    /// The counter folded onto the color wheel.
    pub fn degrees(&self) -> u32 { (self.hue % 360) as u32 }

    pub fn advance(&mut self) {
        self.hue += 1;
    }

    /// `hsl(hue, 100%, lightness%)` as packed ARGB.
    pub fn color(&self, lightness_pct: f32) -> u32 {
        hsl_to_argb(self.degrees() as f32, 1.0, lightness_pct / 100.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Conversion
// ════════════════════════════════════════════════════════════════════════════

/// Convert HSL → packed ARGB (0xAARRGGBB, A=0xFF).
///
/// `h` is in degrees (any value, folded into `[0, 360)`), `s` and `l` in
/// `[0, 1]`.
pub fn hsl_to_argb(h: f32, s: f32, l: f32) -> u32 {
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = h.rem_euclid(360.0) / 360.0;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    let ri = (r * 255.0).round() as u32;
    let gi = (g * 255.0).round() as u32;
    let bi = (b * 255.0).round() as u32;
    0xFF000000 | (ri << 16) | (gi << 8) | bi
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 { t += 1.0; }
    if t > 1.0 { t -= 1.0; }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hsl_to_argb(0.0,   1.0, 0.5), 0xFFFF0000);
        assert_eq!(hsl_to_argb(120.0, 1.0, 0.5), 0xFF00FF00);
        assert_eq!(hsl_to_argb(240.0, 1.0, 0.5), 0xFF0000FF);
    }

    #[test]
    fn lightness_extremes() {
        assert_eq!(hsl_to_argb(77.0, 1.0, 1.0), WHITE);
        assert_eq!(hsl_to_argb(77.0, 1.0, 0.0), 0xFF000000);
    }

    #[test]
    fn hue_is_periodic() {
        assert_eq!(hsl_to_argb(30.0, 1.0, 0.7), hsl_to_argb(390.0, 1.0, 0.7));
        assert_eq!(hsl_to_argb(-90.0, 1.0, 0.7), hsl_to_argb(270.0, 1.0, 0.7));
    }

    #[test]
    fn cycler_starts_at_zero_and_wraps_colors() {
        let mut c = HueCycler::new();
        assert_eq!(c.hue(), 0);
        let red = c.color(50.0);
        for _ in 0..360 { c.advance(); }
        assert_eq!(c.hue(), 360);
        assert_eq!(c.degrees(), 0);
        assert_eq!(c.color(50.0), red);
    }

    #[test]
    fn higher_lightness_is_brighter() {
        let c = HueCycler::new();
        let sum = |argb: u32| ((argb >> 16) & 0xFF) + ((argb >> 8) & 0xFF) + (argb & 0xFF);
        assert!(sum(c.color(80.0)) > sum(c.color(50.0)));
    }
}
