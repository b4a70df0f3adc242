//! Rectangles and rounded ("bubble") rectangles

use amoled_core::{Rect, Result, Rgb565};

use super::circle::Arc;
use crate::sink::PixelSink;

pub(crate) fn outline<S: PixelSink + ?Sized>(sink: &mut S, area: Rect, color: Rgb565) -> Result<()> {
    if area.is_empty() {
        return Ok(());
    }
    let (left, top) = (i64::from(area.x), i64::from(area.y));
    let (right, bottom) = (area.right() - 1, area.bottom() - 1);

    super::span(sink, left, right, top, color)?;
    if area.height > 1 {
        super::span(sink, left, right, bottom, color)?;
    }
    if area.height > 2 {
        super::fill_box(sink, (left, top + 1), (left, bottom - 1), color)?;
        if area.width > 1 {
            super::fill_box(sink, (right, top + 1), (right, bottom - 1), color)?;
        }
    }
    Ok(())
}

/// Corner radius used by bubble rectangles: a quarter of the shorter side
pub fn bubble_radius(area: &Rect) -> u32 {
    area.width.min(area.height) / 4
}

/// Largest radius whose corner arcs cannot overlap
fn clamp_radius(area: &Rect, radius: u32) -> u32 {
    let limit = (area.width.saturating_sub(1) / 2).min(area.height.saturating_sub(1) / 2);
    radius.min(limit)
}

/// Corner arc centers: (left x, right x, top y, bottom y)
fn centers(area: &Rect, r: u32) -> (i64, i64, i64, i64) {
    let r = i64::from(r);
    let left = i64::from(area.x) + r;
    let right = area.right() - 1 - r;
    let top = i64::from(area.y) + r;
    let bottom = area.bottom() - 1 - r;
    (left, right, top, bottom)
}

/// Corner rows visible in the sink, as (row, offset from the arc center)
///
/// `ty` and `by` are the top and bottom arc centers; each band is `r` rows.
fn corner_rows<S: PixelSink + ?Sized>(
    sink: &S,
    ty: i64,
    by: i64,
    r: u64,
) -> impl Iterator<Item = (i64, u64)> {
    let bounds = sink.bounds();
    let (top, bottom) = (i64::from(bounds.y), bounds.bottom() - 1);
    let r = r as i64;
    let upper = (ty - r).max(top)..=ty.min(bottom);
    let lower = by.max(top)..=(by + r).min(bottom);
    upper
        .map(move |y| (y, ty.abs_diff(y)))
        .chain(lower.map(move |y| (y, y.abs_diff(by))))
}

pub(crate) fn rounded_outline<S: PixelSink + ?Sized>(
    sink: &mut S,
    area: Rect,
    radius: u32,
    color: Rgb565,
) -> Result<()> {
    if area.is_empty() {
        return Ok(());
    }
    let r = clamp_radius(&area, radius);
    if r == 0 {
        return outline(sink, area, color);
    }

    let (lx, rx, ty, by) = centers(&area, r);
    let (x0, y0) = (i64::from(area.x), i64::from(area.y));
    let (x1, y1) = (area.right() - 1, area.bottom() - 1);

    super::span(sink, lx, rx, y0, color)?;
    super::span(sink, lx, rx, y1, color)?;
    super::fill_box(sink, (x0, ty), (x0, by), color)?;
    super::fill_box(sink, (x1, ty), (x1, by), color)?;

    let arc = Arc::new(r);
    for (y, b) in corner_rows(sink, ty, by, arc.radius()) {
        let row = arc.ring(b);
        if let Some((lo, hi)) = row.run {
            let (lo, hi) = (lo as i64, hi as i64);
            super::span(sink, lx - hi, lx - lo, y, color)?;
            super::span(sink, rx + lo, rx + hi, y, color)?;
        }
        if let Some(a) = row.single {
            let a = a as i64;
            super::span(sink, lx - a, lx - a, y, color)?;
            super::span(sink, rx + a, rx + a, y, color)?;
        }
    }
    Ok(())
}

pub(crate) fn rounded_filled<S: PixelSink + ?Sized>(
    sink: &mut S,
    area: Rect,
    radius: u32,
    color: Rgb565,
) -> Result<()> {
    if area.is_empty() {
        return Ok(());
    }
    let r = clamp_radius(&area, radius);
    if r == 0 {
        return super::fill(sink, area, color);
    }

    let (lx, rx, ty, by) = centers(&area, r);
    super::fill_box(sink, (i64::from(area.x), ty), (area.right() - 1, by), color)?;

    let arc = Arc::new(r);
    for (y, b) in corner_rows(sink, ty, by, arc.radius()) {
        if let Some(half) = arc.reach(b) {
            let half = half as i64;
            super::span(sink, lx - half, rx + half, y, color)?;
        }
    }
    Ok(())
}
