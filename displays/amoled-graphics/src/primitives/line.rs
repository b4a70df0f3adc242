//! Bresenham lines

use core::iter::FusedIterator;

use amoled_core::{Point, Rect, Result, Rgb565};

use crate::sink::PixelSink;

/// Pixels of a line from `start` to `end`, both inclusive
///
/// Integer Bresenham stepping, no anti-aliasing. The iterator is consumed
/// as it goes; build a new one to walk the line again. [`nth`](Iterator::nth)
/// and [`clip`](Self::clip) jump straight to a step instead of walking to it.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x0: i64,
    y0: i64,
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    len: u64,
    /// Index of the next pixel counted from `(x0, y0)`
    step: u64,
    remaining: u64,
}

impl LinePoints {
    pub fn new(start: Point, end: Point) -> Self {
        let (x0, y0) = (i64::from(start.x), i64::from(start.y));
        let (x1, y1) = (i64::from(end.x), i64::from(end.y));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let len = dx.max(-dy) as u64 + 1;
        Self {
            x0,
            y0,
            x: x0,
            y: y0,
            end_x: x1,
            end_y: y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            len,
            step: 0,
            remaining: len,
        }
    }

    /// Steps taken along x and along y after `k` steps of the walk
    ///
    /// The major axis moves every step; the minor axis has moved
    /// `floor((2k * minor + major) / (2 * major))` times.
    fn moves(&self, k: u64) -> (i128, i128) {
        let (adx, ady) = (i128::from(self.dx), -i128::from(self.dy));
        let k = i128::from(k);
        if adx >= ady {
            let ys = if adx == 0 { 0 } else { (2 * k * ady + adx) / (2 * adx) };
            (k, ys)
        } else {
            ((2 * k * adx + ady) / (2 * ady), k)
        }
    }

    fn position(&self, k: u64) -> (i64, i64) {
        let (xs, ys) = self.moves(k);
        (self.x0 + self.sx * xs as i64, self.y0 + self.sy * ys as i64)
    }

    /// Continue the walk from step `k`, counted from the start
    fn seek(&mut self, k: u64) {
        if k >= self.len {
            self.remaining = 0;
            return;
        }
        let (xs, ys) = self.moves(k);
        let (adx, ady) = (i128::from(self.dx), -i128::from(self.dy));
        (self.x, self.y) = LinePoints::position(self, k);
        self.err = (adx - ady - xs * ady + ys * adx) as i64;
        self.step = k;
        self.remaining = self.len - k;
    }

    /// Keep only the pixels that fall inside `area`
    ///
    /// A straight line crosses a rectangle once, so the visible pixels are
    /// one contiguous stretch of the walk; it is found by bisection and the
    /// parts outside are never stepped through.
    pub fn clip(mut self, area: &Rect) -> Self {
        if area.is_empty() {
            self.remaining = 0;
            return self;
        }
        let (left, right) = (i64::from(area.x), area.right() - 1);
        let (top, bottom) = (i64::from(area.y), area.bottom() - 1);
        let (sx, sy) = (self.sx, self.sy);

        // both coordinates are monotonic along the walk, so "has entered
        // the area" and "has left it" each flip at most once
        let entered = |(x, y): (i64, i64)| reached(x, sx, left, right) && reached(y, sy, top, bottom);
        let exited = |(x, y): (i64, i64)| passed(x, sx, left, right) || passed(y, sy, top, bottom);

        let (from, to) = (self.step, self.step + self.remaining);
        let first = LinePoints::partition(&self, from, to, entered);
        let end = LinePoints::partition(&self, from, to, exited);
        if first < end {
            self.seek(first);
            self.remaining = end - first;
        } else {
            self.remaining = 0;
        }
        self
    }

    /// First step in `from..to` whose position satisfies `pred`, or `to`
    fn partition(&self, from: u64, to: u64, pred: impl Fn((i64, i64)) -> bool) -> u64 {
        let (mut lo, mut hi) = (from, to);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(self.position(mid)) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        lo
    }
}

/// Whether a coordinate moving in direction `dir` has reached `lo..=hi`
fn reached(c: i64, dir: i64, lo: i64, hi: i64) -> bool {
    if dir > 0 {
        c >= lo
    } else {
        c <= hi
    }
}

/// Whether a coordinate moving in direction `dir` has gone past `lo..=hi`
fn passed(c: i64, dir: i64, lo: i64, hi: i64) -> bool {
    if dir > 0 {
        c > hi
    } else {
        c < lo
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.step += 1;

        let point = Point::new(self.x as i32, self.y as i32);
        if self.x != self.end_x || self.y != self.end_y {
            let e2 = 2 * self.err;
            if e2 >= self.dy {
                self.err += self.dy;
                self.x += self.sx;
            }
            if e2 <= self.dx {
                self.err += self.dx;
                self.y += self.sy;
            }
        }
        Some(point)
    }

    fn nth(&mut self, n: usize) -> Option<Point> {
        let n = u64::try_from(n).unwrap_or(u64::MAX);
        if n >= self.remaining {
            self.remaining = 0;
            return None;
        }
        let limit = self.remaining - n;
        self.seek(self.step + n);
        self.remaining = limit;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for LinePoints {}

impl FusedIterator for LinePoints {}

/// Draw a line as runs of horizontal or vertical spans
pub(crate) fn draw<S: PixelSink + ?Sized>(
    sink: &mut S,
    start: Point,
    end: Point,
    color: Rgb565,
) -> Result<()> {
    let steep = (i64::from(end.y) - i64::from(start.y)).abs()
        > (i64::from(end.x) - i64::from(start.x)).abs();

    let bounds = sink.bounds();
    let mut run: Option<(Point, Point)> = None;
    for p in LinePoints::new(start, end).clip(&bounds) {
        run = match run {
            Some((first, _)) if (steep && p.x == first.x) || (!steep && p.y == first.y) => {
                Some((first, p))
            }
            Some((first, last)) => {
                super::fill(sink, Rect::from_corners(first, last), color)?;
                Some((p, p))
            }
            None => Some((p, p)),
        };
    }

    match run {
        Some((first, last)) => super::fill(sink, Rect::from_corners(first, last), color),
        None => Ok(()),
    }
}
