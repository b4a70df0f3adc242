//! Triangles

use amoled_core::{Point, Result, Rgb565};

use crate::sink::PixelSink;

pub(crate) fn outline<S: PixelSink + ?Sized>(
    sink: &mut S,
    a: Point,
    b: Point,
    c: Point,
    color: Rgb565,
) -> Result<()> {
    super::line::draw(sink, a, b, color)?;
    super::line::draw(sink, b, c, color)?;
    super::line::draw(sink, c, a, color)
}

/// x on the edge `from`..`to` at row `y`; the edge must not be horizontal
fn edge_x(from: Point, to: Point, y: i64) -> i64 {
    let (x0, y0) = (i128::from(from.x), i128::from(from.y));
    let (x1, y1) = (i128::from(to.x), i128::from(to.y));
    (x0 + (x1 - x0) * (i128::from(y) - y0) / (y1 - y0)) as i64
}

/// Scanline fill: vertices sorted by y, one span per row between the
/// long edge and whichever short edge covers that row
///
/// Collinear vertices produce a thin line rather than nothing.
pub(crate) fn filled<S: PixelSink + ?Sized>(
    sink: &mut S,
    a: Point,
    b: Point,
    c: Point,
    color: Rgb565,
) -> Result<()> {
    let mut v = [a, b, c];
    v.sort_unstable_by_key(|p| p.y);
    let [p0, p1, p2] = v;

    if p0.y == p2.y {
        let min = p0.x.min(p1.x).min(p2.x);
        let max = p0.x.max(p1.x).max(p2.x);
        return super::span(sink, i64::from(min), i64::from(max), i64::from(p0.y), color);
    }

    let bounds = sink.bounds();
    let first = i64::from(p0.y).max(i64::from(bounds.y));
    let last = i64::from(p2.y).min(bounds.bottom() - 1);

    let mid = i64::from(p1.y);
    for y in first..=last {
        let long = edge_x(p0, p2, y);
        let short = if y < mid || (y == mid && p1.y > p0.y) {
            edge_x(p0, p1, y)
        } else {
            edge_x(p1, p2, y)
        };
        super::span(sink, long, short, y, color)?;
    }
    Ok(())
}
