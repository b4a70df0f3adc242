//! Hershey vector fonts
//!
//! `index` holds one little-endian u16 offset into `data` per printable
//! ASCII character (32..=127). A glyph record is a stroke count, the left
//! and right bearings, then `count` coordinate pairs. Coordinates are
//! biased by [`COORD_BIAS`]; a pair starting with `b' '` lifts the pen.

use micromath::F32;

use amoled_core::{Point, Result, Rgb565};

use crate::sink::PixelSink;

/// Offset subtracted from every stored coordinate
pub const COORD_BIAS: i32 = 0x52;

const PEN_UP: i8 = b' ' as i8;

#[derive(Debug, Clone, Copy)]
pub struct HersheyFont<'a> {
    pub index: &'a [u8],
    pub data: &'a [i8],
}

/// Decoded glyph record header
struct Record<'a> {
    left: i8,
    right: i8,
    strokes: &'a [i8],
}

fn scaled(v: i8, scale: f32) -> i32 {
    F32(scale * (i32::from(v) - COORD_BIAS) as f32).round().0 as i32
}

impl<'a> HersheyFont<'a> {
    pub const fn new(index: &'a [u8], data: &'a [i8]) -> Self {
        Self { index, data }
    }

    fn record(&self, c: char) -> Option<Record<'a>> {
        let code = u32::from(c);
        if !(32..=127).contains(&code) {
            return None;
        }
        let slot = (code as usize - 32) * 2;
        let lo = *self.index.get(slot)?;
        let hi = *self.index.get(slot + 1)?;
        let offset = usize::from(u16::from_le_bytes([lo, hi]));

        let header = self.data.get(offset..offset + 3)?;
        let count = usize::try_from(header[0]).ok()?;
        let strokes = self.data.get(offset + 3..offset + 3 + count * 2)?;
        Some(Record {
            left: header[1],
            right: header[2],
            strokes,
        })
    }

    /// Unscaled advance (right minus left bearing)
    pub fn advance(&self, c: char) -> Option<i32> {
        self.record(c).map(|r| i32::from(r.right) - i32::from(r.left))
    }
}

/// Width of `text` drawn at `scale`: the rounded sum of unscaled advances
/// times the scale
pub fn measure_vector(font: &HersheyFont<'_>, text: &str, scale: f32) -> u32 {
    let total: i32 = text.chars().filter_map(|c| font.advance(c)).sum();
    let width = F32(total as f32 * scale).round().0;
    if width <= 0.0 {
        0
    } else {
        width as u32
    }
}

/// Stroke `text` with its baseline origin at (x, y); returns the final x
pub(crate) fn render<S: PixelSink + ?Sized>(
    sink: &mut S,
    font: &HersheyFont<'_>,
    text: &str,
    x: i32,
    y: i32,
    color: Rgb565,
    scale: f32,
) -> Result<i32> {
    let mut pos_x = x;

    for record in text.chars().filter_map(|c| font.record(c)) {
        let left = scaled(record.left, scale);
        let right = scaled(record.right, scale);

        let mut pen: Option<Point> = None;
        for pair in record.strokes.chunks_exact(2) {
            if pair[0] == PEN_UP {
                pen = None;
                continue;
            }
            let to = Point::new(pos_x + scaled(pair[0], scale) - left, y + scaled(pair[1], scale));
            if let Some(from) = pen {
                crate::primitives::line::draw(sink, from, to, color)?;
            }
            pen = Some(to);
        }
        pos_x += right - left;
    }
    Ok(pos_x)
}
