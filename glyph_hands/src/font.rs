//! Minimal 5×7 bitmap font covering the particle symbol palette.
//!
//! Each character is 7 rows × 5 bits, most significant bit on the left.

pub const GLYPH_W: usize = 5;
pub const GLYPH_H: usize = 7;
/// Horizontal advance per character, one column of gap.
pub const ADVANCE: usize = GLYPH_W + 1;

/// Bitmap for `c`.  Unknown characters render as a hollow box.
pub fn char_glyph(c: char) -> [u8; GLYPH_H] {
    match c {
        '∑' => [0b11111, 0b10000, 0b01000, 0b00100, 0b01000, 0b10000, 0b11111],
        '∫' => [0b00011, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11000],
        'π' => [0b00000, 0b11111, 0b01010, 0b01010, 0b01010, 0b01010, 0b10011],
        '√' => [0b00011, 0b00010, 0b00010, 0b00010, 0b10100, 0b01100, 0b00100],
        '∞' => [0b00000, 0b00000, 0b01010, 0b10101, 0b01010, 0b00000, 0b00000],
        '≈' => [0b00000, 0b01000, 0b10101, 0b00010, 0b01000, 0b10101, 0b00010],
        '≠' => [0b00000, 0b00010, 0b11111, 0b00100, 0b11111, 0b01000, 0b00000],
        '±' => [0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000, 0b11111],
        '∂' => [0b01110, 0b00001, 0b00001, 0b01111, 0b10001, 0b10001, 0b01110],
        '∇' => [0b11111, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100, 0b00100],
        '²' => [0b01100, 0b10010, 0b00100, 0b01000, 0b11110, 0b00000, 0b00000],
        '^' => [0b00100, 0b01010, 0b10001, 0b00000, 0b00000, 0b00000, 0b00000],
        'x' => [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        's' => [0b00000, 0b00000, 0b01111, 0b10000, 0b01110, 0b00001, 0b11110],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'n' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'c' => [0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'o' => [0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'l' => [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'g' => [0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        ' ' => [0; GLYPH_H],
        _   => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

/// Whether cell `(col, row)` of `text` laid out left to right is lit.
/// Columns count across the whole string, gaps included.
pub fn text_cell(text: &[char], col: i32, row: i32) -> bool {
    if col < 0 || row < 0 || row >= GLYPH_H as i32 {
        return false;
    }
    let (col, row) = (col as usize, row as usize);
    let Some(&c) = text.get(col / ADVANCE) else { return false };
    let x = col % ADVANCE;
    if x >= GLYPH_W {
        return false;
    }
    char_glyph(c)[row] & (1 << (GLYPH_W - 1 - x)) != 0
}

/// Width of `chars` characters in cells, without the trailing gap.
pub fn text_columns(chars: usize) -> usize {
    (chars * ADVANCE).saturating_sub(1)
}
