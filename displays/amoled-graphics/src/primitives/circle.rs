//! Midpoint circles
//!
//! Shapes are produced row by row. [`Arc`] answers, for any row offset,
//! which columns the midpoint walk would have lit, so only rows inside the
//! sink are ever visited and a huge radius costs no more than a small one.

use amoled_core::{Point, Result, Rgb565};

use crate::sink::PixelSink;

/// Integer square root, rounded down
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = n / 2 + n % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Row-wise view of one midpoint circle of radius `r`
///
/// All offsets are distances from the center; every shape is symmetric
/// under both mirrors and under swapping x and y.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Arc {
    r: u64,
    /// Last column of the first octant, where the walk meets the diagonal
    diag: u64,
}

/// Outline columns on one row offset: a run from the flat part of the arc
/// and a single pixel from its steep part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RingRow {
    pub run: Option<(u64, u64)>,
    pub single: Option<u64>,
}

impl Arc {
    pub(crate) fn new(radius: u32) -> Self {
        let mut arc = Self {
            r: u64::from(radius),
            diag: 0,
        };
        // largest column still on or below the diagonal
        let (mut lo, mut hi) = (0, arc.r);
        while lo < hi {
            let mid = lo + (hi - lo + 1) / 2;
            match arc.height(mid) {
                Some(y) if mid <= y => lo = mid,
                _ => hi = mid - 1,
            }
        }
        arc.diag = lo;
        arc
    }

    pub(crate) fn radius(&self) -> u64 {
        self.r
    }

    /// Row the walk picks in column `m`: the largest `y` whose lower
    /// midpoint `(m, y - 1/2)` lies strictly inside the circle
    fn height(&self, m: u64) -> Option<u64> {
        if m > self.r {
            return None;
        }
        let (r, m) = (u128::from(self.r), u128::from(m));
        let d = 4 * (r * r - m * m);
        if d <= 1 {
            return None;
        }
        Some(((isqrt(d - 1) + 1) / 2) as u64)
    }

    /// Widest column `a` with `(a, b - 1/2)` strictly inside the circle
    fn width(&self, b: u64) -> Option<u64> {
        let r = u128::from(self.r);
        let edge = (2 * u128::from(b)).abs_diff(1);
        let e = (4 * r * r).checked_sub(edge * edge).filter(|&e| e > 0)?;
        Some(isqrt((e - 1) / 4) as u64)
    }

    /// Half-width of the filled disc on row offset `b`
    pub(crate) fn reach(&self, b: u64) -> Option<u64> {
        if b > self.r {
            return None;
        }
        if self.r == 0 {
            return Some(0);
        }
        match self.height(b) {
            Some(y) if y >= b => Some(y),
            _ => self.width(b),
        }
    }

    /// Outline pixels on row offset `b`, right half only
    pub(crate) fn ring(&self, b: u64) -> RingRow {
        let mut row = RingRow {
            run: None,
            single: None,
        };
        if b > self.r {
            return row;
        }
        if self.r == 0 {
            row.run = Some((0, 0));
            return row;
        }
        if let Some(wide) = self.width(b) {
            let hi = wide.min(self.diag);
            let lo = self.width(b + 1).map_or(0, |w| w + 1);
            if lo <= hi {
                row.run = Some((lo, hi));
            }
        }
        if b <= self.diag {
            row.single = self.height(b);
        }
        row
    }
}

/// Sink rows within `reach` of `center`, as (row, offset from center)
fn rows<S: PixelSink + ?Sized>(sink: &S, center: i64, reach: u64) -> impl Iterator<Item = (i64, u64)> {
    let bounds = sink.bounds();
    let reach = reach as i64;
    let first = (center - reach).max(i64::from(bounds.y));
    let last = (center + reach).min(bounds.bottom() - 1);
    (first..=last).map(move |y| (y, y.abs_diff(center)))
}

pub(crate) fn outline<S: PixelSink + ?Sized>(
    sink: &mut S,
    center: Point,
    radius: u32,
    color: Rgb565,
) -> Result<()> {
    let arc = Arc::new(radius);
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    for (y, b) in rows(sink, cy, arc.radius()) {
        let row = arc.ring(b);
        if let Some((lo, hi)) = row.run {
            let (lo, hi) = (lo as i64, hi as i64);
            if lo == 0 {
                super::span(sink, cx - hi, cx + hi, y, color)?;
            } else {
                super::span(sink, cx - hi, cx - lo, y, color)?;
                super::span(sink, cx + lo, cx + hi, y, color)?;
            }
        }
        if let Some(a) = row.single {
            let a = a as i64;
            super::span(sink, cx - a, cx - a, y, color)?;
            super::span(sink, cx + a, cx + a, y, color)?;
        }
    }
    Ok(())
}

/// Filled circle as one horizontal span per visible row
pub(crate) fn filled<S: PixelSink + ?Sized>(
    sink: &mut S,
    center: Point,
    radius: u32,
    color: Rgb565,
) -> Result<()> {
    let arc = Arc::new(radius);
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    for (y, b) in rows(sink, cy, arc.radius()) {
        if let Some(half) = arc.reach(b) {
            let half = half as i64;
            super::span(sink, cx - half, cx + half, y, color)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::Draw;
    use std::collections::BTreeSet;
    use std::vec;

    /// Classic incremental walk over one octant, yielding `(x, y)` with `x <= y`
    fn octant(radius: u32) -> impl Iterator<Item = (i64, i64)> {
        let r = i64::from(radius);
        let (mut x, mut y, mut p) = (0i64, r, 1 - r);
        core::iter::from_fn(move || {
            if x > y {
                return None;
            }
            let step = (x, y);
            if p < 0 {
                p += 2 * x + 3;
            } else {
                p += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
            Some(step)
        })
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        let big = u128::from(u64::MAX);
        assert_eq!(isqrt(big * big), big);
        assert_eq!(isqrt(big * big - 1), big - 1);
    }

    #[test]
    fn test_rows_match_octant_walk() {
        for r in 0..120u32 {
            let arc = Arc::new(r);
            let mut disc = BTreeSet::new();
            let mut ring = BTreeSet::new();
            for (x, y) in octant(r) {
                for (a, b) in [(x, y), (y, x)] {
                    ring.insert((a, b));
                    for dy in 0..=b {
                        disc.insert((a, dy));
                    }
                }
            }

            for b in 0..=u64::from(r) + 1 {
                let on_row = |set: &BTreeSet<(i64, i64)>| -> BTreeSet<u64> {
                    set.iter().filter(|p| p.1 as u64 == b).map(|p| p.0 as u64).collect()
                };
                let expect_disc = on_row(&disc);
                let got_disc: BTreeSet<u64> = arc.reach(b).map_or(BTreeSet::new(), |w| (0..=w).collect());
                assert_eq!(got_disc, expect_disc, "r={r} b={b} fill");

                let expect_ring = on_row(&ring);
                let row = arc.ring(b);
                let mut got_ring: BTreeSet<u64> = row.run.map_or(BTreeSet::new(), |(lo, hi)| (lo..=hi).collect());
                got_ring.extend(row.single);
                assert_eq!(got_ring, expect_ring, "r={r} b={b} outline");
            }
        }
    }

    #[test]
    fn test_huge_radius_row_lookup() {
        let arc = Arc::new(u32::MAX);
        assert_eq!(arc.reach(0), Some(u64::from(u32::MAX)));
        assert_eq!(arc.reach(u64::from(u32::MAX) + 1), None);
        assert!(arc.reach(u64::from(u32::MAX)).is_some());
    }

    #[test]
    fn test_center_near_i32_max_clips() {
        let mut buf = vec![Rgb565::BLACK; 8 * 8];
        let mut fb = Framebuffer::new(&mut buf, 8, 8).unwrap();
        fb.fill_circle(i32::MAX - 1, 0, 5, Rgb565::RED).unwrap();
        fb.circle(i32::MAX - 1, 0, 5, Rgb565::RED).unwrap();
        fb.fill_circle(i32::MIN + 1, i32::MIN + 1, 5, Rgb565::RED).unwrap();
        fb.circle(0, i32::MAX, u32::MAX, Rgb565::RED).unwrap();
        assert_eq!(fb.dirty(), None);
    }

    #[test]
    fn test_huge_disc_covers_frame() {
        let mut buf = vec![Rgb565::BLACK; 8 * 8];
        let mut fb = Framebuffer::new(&mut buf, 8, 8).unwrap();
        fb.fill_circle(4, 4, u32::MAX, Rgb565::RED).unwrap();
        assert!(fb.as_slice().iter().all(|&c| c == Rgb565::RED));
    }

    #[test]
    fn test_far_center_edge_reaches_frame() {
        let mut buf = vec![Rgb565::BLACK; 8 * 8];
        let mut fb = Framebuffer::new(&mut buf, 8, 8).unwrap();
        // leftmost column of a disc centered far to the right
        fb.fill_circle(1_000_003, 4, 1_000_000, Rgb565::RED).unwrap();
        for y in 0..8 {
            assert_eq!(fb.pixel(3, y), Some(Rgb565::RED));
            assert_eq!(fb.pixel(2, y), Some(Rgb565::BLACK));
        }
    }
}
