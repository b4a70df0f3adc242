//! Rotated polygons
//!
//! Vertices are offsets from a drawing location. An optional rotation is
//! applied about a pivot (in the same offset space) before translation.
//! Filling uses the even-odd rule, sampling each row at its pixel centers.

use heapless::Vec;
use micromath::F32;

use amoled_core::{Error, Point, Result, Rgb565};

use crate::sink::PixelSink;

/// Maximum vertices in one polygon
pub const MAX_POLY_VERTICES: usize = 64;

type Vertices = Vec<(f32, f32), MAX_POLY_VERTICES>;

/// Rotate `points` about `pivot` by `angle` radians and translate to `location`
fn place(points: &[Point], location: Point, angle: f32, pivot: Point) -> Result<Vertices> {
    if points.is_empty() || points.len() > MAX_POLY_VERTICES {
        return Err(Error::InvalidArgument);
    }

    let (sin, cos) = if angle == 0.0 {
        (0.0, 1.0)
    } else {
        (F32(angle).sin().0, F32(angle).cos().0)
    };
    let (px, py) = (pivot.x as f32, pivot.y as f32);
    let (lx, ly) = (location.x as f32, location.y as f32);

    let mut out = Vertices::new();
    for p in points {
        let (dx, dy) = (p.x as f32 - px, p.y as f32 - py);
        let x = px + dx * cos - dy * sin;
        let y = py + dx * sin + dy * cos;
        out.push((x + lx, y + ly)).map_err(|_| Error::InvalidArgument)?;
    }
    Ok(out)
}

/// Nearest whole pixel; the float-to-int cast saturates at the `i32` range
fn round(v: f32) -> i32 {
    F32(v).round().0 as i32
}

pub(crate) fn outline<S: PixelSink + ?Sized>(
    sink: &mut S,
    points: &[Point],
    location: Point,
    angle: f32,
    pivot: Point,
    color: Rgb565,
) -> Result<()> {
    let verts = place(points, location, angle, pivot)?;
    let n = verts.len();
    for i in 0..n {
        let (ax, ay) = verts[i];
        let (bx, by) = verts[(i + 1) % n];
        super::line::draw(
            sink,
            Point::new(round(ax), round(ay)),
            Point::new(round(bx), round(by)),
            color,
        )?;
    }
    Ok(())
}

pub(crate) fn filled<S: PixelSink + ?Sized>(
    sink: &mut S,
    points: &[Point],
    location: Point,
    angle: f32,
    pivot: Point,
    color: Rgb565,
) -> Result<()> {
    let verts = place(points, location, angle, pivot)?;
    if verts.len() < 3 {
        return Ok(());
    }

    let (min_y, max_y) = verts
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    let (width, height) = sink.size();
    let (width, height) = (f32::from(width), f32::from(height));
    let first = F32(min_y.max(0.0)).floor().0 as i32;
    let last = F32(max_y.min(height)).ceil().0 as i32;

    let mut nodes: Vec<f32, MAX_POLY_VERTICES> = Vec::new();
    for row in first..last {
        let yc = row as f32 + 0.5;

        nodes.clear();
        let mut j = verts.len() - 1;
        for i in 0..verts.len() {
            let (xi, yi) = verts[i];
            let (xj, yj) = verts[j];
            if (yi <= yc && yc < yj) || (yj <= yc && yc < yi) {
                let x = xi + (yc - yi) / (yj - yi) * (xj - xi);
                nodes.push(x).map_err(|_| Error::InvalidArgument)?;
            }
            j = i;
        }
        nodes.sort_unstable_by(|a, b| a.total_cmp(b));

        for pair in nodes.chunks_exact(2) {
            // pixel centers in [start, end), limited to the sink's columns
            let start = F32((pair[0] - 0.5).max(0.0)).ceil().0 as i32;
            let end = F32((pair[1] - 0.5).min(width)).ceil().0 as i32;
            if end > start {
                super::hline(sink, start, row, (end - start) as u32, color)?;
            }
        }
    }
    Ok(())
}

/// Area-weighted centroid of a simple polygon, rounded to whole pixels
///
/// Zero-area and empty polygons have no centroid.
pub fn polygon_center(points: &[Point]) -> Result<Point> {
    if points.is_empty() {
        return Err(Error::InvalidArgument);
    }

    let mut area = 0.0f32;
    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let cross = a.x as f32 * b.y as f32 - b.x as f32 * a.y as f32;
        area += cross;
        cx += (a.x as f32 + b.x as f32) * cross;
        cy += (a.y as f32 + b.y as f32) * cross;
    }
    if area == 0.0 {
        return Err(Error::InvalidArgument);
    }

    let z = 1.0 / (3.0 * area);
    Ok(Point::new(round(cx * z), round(cy * z)))
}
