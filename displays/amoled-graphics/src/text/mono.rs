//! Fixed-width bitmap fonts

use super::{Font, Glyph};

/// Fixed-width 1 bpp font covering a contiguous character range
///
/// Each glyph is `height` rows of `ceil(width / 8)` bytes, most significant
/// bit leftmost; glyphs are stored back to back starting at `first`.
#[derive(Debug, Clone, Copy)]
pub struct MonoFont<'a> {
    pub width: u16,
    pub height: u16,
    pub first: u8,
    pub last: u8,
    pub data: &'a [u8],
}

impl<'a> MonoFont<'a> {
    pub const fn new(width: u16, height: u16, first: u8, last: u8, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            first,
            last,
            data,
        }
    }

    const fn row_bytes(&self) -> usize {
        (self.width as usize + 7) / 8
    }
}

impl Font for MonoFont<'_> {
    fn height(&self) -> u16 {
        self.height
    }

    fn glyph(&self, c: char) -> Option<Glyph<'_>> {
        let code = u8::try_from(u32::from(c)).ok()?;
        if code < self.first || code > self.last {
            return None;
        }
        let glyph_bytes = self.row_bytes() * usize::from(self.height);
        let start = usize::from(code - self.first) * glyph_bytes;
        if start + glyph_bytes > self.data.len() {
            return None;
        }
        Some(Glyph::new(
            self.data,
            start * 8,
            self.row_bytes() * 8,
            self.width,
            1,
        ))
    }
}
