//! Scan conversion
//!
//! Every primitive reduces to clipped spans handed to a [`PixelSink`].
//! Nothing here commits; the [`Draw`](crate::Draw) methods do that once
//! the whole shape is out.

pub mod circle;
pub mod line;
pub mod polygon;
pub mod rect;
pub mod triangle;

pub use line::LinePoints;
pub use polygon::{polygon_center, MAX_POLY_VERTICES};

use amoled_core::{Point, Rect, Result, Rgb565};

use crate::sink::PixelSink;

/// Fill `area` after clipping it to the sink; fully clipped areas emit nothing
pub(crate) fn fill<S: PixelSink + ?Sized>(sink: &mut S, area: Rect, color: Rgb565) -> Result<()> {
    match sink.bounds().intersect(&area) {
        Some(clipped) => sink.fill_area(clipped, color),
        None => Ok(()),
    }
}

/// Fill the inclusive box `(x0, y0)..=(x1, y1)`, corners in either order
///
/// Coordinates are 64-bit and clipped before a [`Rect`] is built, so
/// shapes anchored near the ends of the `i32` range clip instead of
/// overflowing.
pub(crate) fn fill_box<S: PixelSink + ?Sized>(
    sink: &mut S,
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    color: Rgb565,
) -> Result<()> {
    let bounds = sink.bounds();
    let left = x0.min(x1).max(i64::from(bounds.x));
    let right = x0.max(x1).min(bounds.right() - 1);
    let top = y0.min(y1).max(i64::from(bounds.y));
    let bottom = y0.max(y1).min(bounds.bottom() - 1);
    if left > right || top > bottom {
        return Ok(());
    }
    let area = Rect::new(
        left as i32,
        top as i32,
        (right - left + 1) as u32,
        (bottom - top + 1) as u32,
    );
    sink.fill_area(area, color)
}

pub(crate) fn pixel<S: PixelSink + ?Sized>(sink: &mut S, p: Point, color: Rgb565) -> Result<()> {
    let at = (i64::from(p.x), i64::from(p.y));
    fill_box(sink, at, at, color)
}

pub(crate) fn hline<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i32,
    y: i32,
    len: u32,
    color: Rgb565,
) -> Result<()> {
    if len == 0 {
        return Ok(());
    }
    let (x, y) = (i64::from(x), i64::from(y));
    fill_box(sink, (x, y), (x + i64::from(len) - 1, y), color)
}

pub(crate) fn vline<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i32,
    y: i32,
    len: u32,
    color: Rgb565,
) -> Result<()> {
    if len == 0 {
        return Ok(());
    }
    let (x, y) = (i64::from(x), i64::from(y));
    fill_box(sink, (x, y), (x, y + i64::from(len) - 1), color)
}

/// Horizontal span between two inclusive x positions, in either order
pub(crate) fn span<S: PixelSink + ?Sized>(
    sink: &mut S,
    xa: i64,
    xb: i64,
    y: i64,
    color: Rgb565,
) -> Result<()> {
    fill_box(sink, (xa, y), (xb, y), color)
}
