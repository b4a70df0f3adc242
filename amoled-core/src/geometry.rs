//! Geometry primitives
//!
//! [`Rect`] is the signed, half-open rectangle the rasterizer works in.
//! [`Window`] is the inclusive, unsigned address range a panel controller
//! understands (CASET/RASET).

use crate::error::Error;

/// A point in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with a top-left corner and a size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a possibly negative width/height
    ///
    /// A negative extent is read as the corner lying to the left/above the
    /// given point, so `(10, 10, -5, -3)` covers the same pixels as
    /// `(5, 7, 5, 3)`.
    pub fn from_signed(x: i32, y: i32, w: i32, h: i32) -> Self {
        let (x, w) = if w < 0 { (x.saturating_add(w), -(w as i64)) } else { (x, w as i64) };
        let (y, h) = if h < 0 { (y.saturating_add(h), -(h as i64)) } else { (y, h as i64) };
        Self::new(x, y, w as u32, h as u32)
    }

    /// Smallest rectangle containing both corners (inclusive)
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x0 = a.x.min(b.x);
        let y0 = a.y.min(b.y);
        let x1 = a.x.max(b.x);
        let y1 = a.y.max(b.y);
        Self::new(
            x0,
            y0,
            (x1 as i64 - x0 as i64 + 1) as u32,
            (y1 as i64 - y0 as i64 + 1) as u32,
        )
    }

    /// True when the rectangle covers no pixel
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, p: Point) -> bool {
        (p.x as i64) >= self.x as i64
            && (p.x as i64) < self.right()
            && (p.y as i64) >= self.y as i64
            && (p.y as i64) < self.bottom()
    }

    /// Overlap of two rectangles, `None` when they do not overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = (self.x as i64).max(other.x as i64);
        let y0 = (self.y as i64).max(other.y as i64);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(
            x0 as i32,
            y0 as i32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
    }

    /// Bounding box of two rectangles; empty rectangles are ignored
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x0 = (self.x as i64).min(other.x as i64);
        let y0 = (self.y as i64).min(other.y as i64);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32)
    }
}

/// Inclusive panel address window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Window {
    /// Create a window; corners must be ordered
    pub fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> crate::Result<Self> {
        if x0 > x1 || y0 > y1 {
            return Err(Error::InvalidArgument);
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Convert a non-empty rectangle with non-negative coordinates
    pub fn from_rect(rect: &Rect) -> crate::Result<Self> {
        if rect.is_empty() {
            return Err(Error::InvalidArgument);
        }
        if rect.x < 0 || rect.y < 0 || rect.right() - 1 > u16::MAX as i64 || rect.bottom() - 1 > u16::MAX as i64 {
            return Err(Error::OutOfBounds);
        }
        Ok(Self {
            x0: rect.x as u16,
            y0: rect.y as u16,
            x1: (rect.right() - 1) as u16,
            y1: (rect.bottom() - 1) as u16,
        })
    }

    pub const fn width(&self) -> u16 {
        self.x1 - self.x0 + 1
    }

    pub const fn height(&self) -> u16 {
        self.y1 - self.y0 + 1
    }

    /// Number of pixels addressed
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Back to a rectangle
    pub const fn to_rect(&self) -> Rect {
        Rect::new(
            self.x0 as i32,
            self.y0 as i32,
            self.width() as u32,
            self.height() as u32,
        )
    }

    /// Shift by a column/row offset
    pub fn offset(&self, dx: u16, dy: u16) -> crate::Result<Self> {
        let add = |v: u16, d: u16| v.checked_add(d).ok_or(Error::OutOfBounds);
        Ok(Self {
            x0: add(self.x0, dx)?,
            y0: add(self.y0, dy)?,
            x1: add(self.x1, dx)?,
            y1: add(self.y1, dy)?,
        })
    }

    /// Widen to an even start and an even span, staying inside
    /// `width` x `height`
    ///
    /// RM-series controllers ignore windows whose start column/row is
    /// odd or whose span is odd.
    pub fn align_even(&self, width: u16, height: u16) -> Self {
        let max_x = width.saturating_sub(1);
        let max_y = height.saturating_sub(1);
        Self {
            x0: self.x0 & !1,
            y0: self.y0 & !1,
            x1: (self.x1 | 1).min(max_x),
            y1: (self.y1 | 1).min(max_y),
        }
    }

    /// CASET parameters: start and end column, big-endian
    pub const fn column_bytes(&self) -> [u8; 4] {
        let s = self.x0.to_be_bytes();
        let e = self.x1.to_be_bytes();
        [s[0], s[1], e[0], e[1]]
    }

    /// RASET parameters: start and end row, big-endian
    pub const fn row_bytes(&self) -> [u8; 4] {
        let s = self.y0.to_be_bytes();
        let e = self.y1.to_be_bytes();
        [s[0], s[1], e[0], e[1]]
    }
}
