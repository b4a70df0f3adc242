//! Proportional bitmap fonts
//!
//! Glyphs are looked up through a UTF-8 character map. Per-glyph widths and
//! bit offsets index into one packed bitmap stream; offsets are big-endian
//! and one to three bytes wide.

use super::{Font, Glyph};

#[derive(Debug, Clone, Copy)]
pub struct ProportionalFont<'a> {
    /// Bits per pixel (1 for plain bitmaps, more for anti-aliased data)
    pub bpp: u8,
    pub height: u16,
    /// Bytes per entry in `offsets`
    pub offset_width: u8,
    pub widths: &'a [u8],
    pub offsets: &'a [u8],
    pub bitmaps: &'a [u8],
    /// Characters in glyph order
    pub map: &'a str,
}

impl ProportionalFont<'_> {
    fn bit_offset(&self, index: usize) -> Option<usize> {
        let width = usize::from(self.offset_width);
        if !(1..=3).contains(&width) {
            return None;
        }
        let bytes = self.offsets.get(index * width..(index + 1) * width)?;
        Some(bytes.iter().fold(0usize, |acc, &b| (acc << 8) | usize::from(b)))
    }
}

impl Font for ProportionalFont<'_> {
    fn height(&self) -> u16 {
        self.height
    }

    fn glyph(&self, c: char) -> Option<Glyph<'_>> {
        if self.bpp == 0 || self.bpp > 8 {
            return None;
        }
        let index = self.map.chars().position(|m| m == c)?;
        let width = u16::from(*self.widths.get(index)?);
        let start = self.bit_offset(index)?;
        let stride = usize::from(width) * usize::from(self.bpp);
        Some(Glyph::new(self.bitmaps, start, stride, width, self.bpp))
    }
}
