//! Drawing operations
//!
//! [`Draw`] is implemented for every [`PixelSink`]. Coordinates are logical
//! and signed; anything outside the sink is clipped silently, so shapes may
//! hang off any edge. Each method commits the sink exactly once, after the
//! whole shape has been emitted.

use amoled_core::{ByteOrder, Point, Rect, Result, Rgb565};

use crate::image;
use crate::primitives::{self, circle, line, polygon, rect, triangle};
use crate::sink::PixelSink;
use crate::text::{self, Font, HersheyFont, Tile};

/// Helper trait for drawing shapes, text and images
pub trait Draw: PixelSink {
    fn pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<()> {
        primitives::pixel(self, Point::new(x, y), color)?;
        self.commit()
    }

    /// Fill the whole drawable area
    fn fill(&mut self, color: Rgb565) -> Result<()> {
        let bounds = self.bounds();
        primitives::fill(self, bounds, color)?;
        self.commit()
    }

    fn hline(&mut self, x: i32, y: i32, len: u32, color: Rgb565) -> Result<()> {
        primitives::hline(self, x, y, len, color)?;
        self.commit()
    }

    fn vline(&mut self, x: i32, y: i32, len: u32, color: Rgb565) -> Result<()> {
        primitives::vline(self, x, y, len, color)?;
        self.commit()
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) -> Result<()> {
        line::draw(self, Point::new(x0, y0), Point::new(x1, y1), color)?;
        self.commit()
    }

    /// Rectangle outline; a negative width or height extends left or up
    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<()> {
        rect::outline(self, Rect::from_signed(x, y, w, h), color)?;
        self.commit()
    }

    /// Filled rectangle; a negative width or height extends left or up
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<()> {
        primitives::fill(self, Rect::from_signed(x, y, w, h), color)?;
        self.commit()
    }

    /// Rounded rectangle outline
    ///
    /// The radius is clamped so opposite corner arcs never overlap.
    fn rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: u32, color: Rgb565) -> Result<()> {
        rect::rounded_outline(self, Rect::from_signed(x, y, w, h), radius, color)?;
        self.commit()
    }

    fn fill_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        radius: u32,
        color: Rgb565,
    ) -> Result<()> {
        rect::rounded_filled(self, Rect::from_signed(x, y, w, h), radius, color)?;
        self.commit()
    }

    /// Rounded rectangle with the corner radius derived from its size
    fn bubble_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<()> {
        let area = Rect::from_signed(x, y, w, h);
        rect::rounded_outline(self, area, rect::bubble_radius(&area), color)?;
        self.commit()
    }

    fn fill_bubble_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<()> {
        let area = Rect::from_signed(x, y, w, h);
        rect::rounded_filled(self, area, rect::bubble_radius(&area), color)?;
        self.commit()
    }

    fn circle(&mut self, x: i32, y: i32, radius: u32, color: Rgb565) -> Result<()> {
        circle::outline(self, Point::new(x, y), radius, color)?;
        self.commit()
    }

    /// Filled circle; radius 0 is a single pixel
    fn fill_circle(&mut self, x: i32, y: i32, radius: u32, color: Rgb565) -> Result<()> {
        circle::filled(self, Point::new(x, y), radius, color)?;
        self.commit()
    }

    fn triangle(&mut self, a: Point, b: Point, c: Point, color: Rgb565) -> Result<()> {
        triangle::outline(self, a, b, c, color)?;
        self.commit()
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, color: Rgb565) -> Result<()> {
        triangle::filled(self, a, b, c, color)?;
        self.commit()
    }

    /// Closed polygon outline
    ///
    /// `points` are offsets from `location`, rotated by `angle` radians
    /// about `pivot` first.
    fn polygon(
        &mut self,
        points: &[Point],
        location: Point,
        angle: f32,
        pivot: Point,
        color: Rgb565,
    ) -> Result<()> {
        polygon::outline(self, points, location, angle, pivot, color)?;
        self.commit()
    }

    /// Filled polygon (even-odd rule); same placement as [`polygon`](Draw::polygon)
    fn fill_polygon(
        &mut self,
        points: &[Point],
        location: Point,
        angle: f32,
        pivot: Point,
        color: Rgb565,
    ) -> Result<()> {
        polygon::filled(self, points, location, angle, pivot, color)?;
        self.commit()
    }

    /// Copy a row-major image with its top-left corner at (x, y)
    fn blit(&mut self, x: i32, y: i32, width: u32, height: u32, pixels: &[Rgb565]) -> Result<()> {
        image::blit(self, x, y, width, height, pixels)?;
        self.commit()
    }

    /// Copy packed two-byte pixels
    fn blit_bytes(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        data: &[u8],
        order: ByteOrder,
    ) -> Result<()> {
        image::blit_bytes(self, x, y, width, height, data, order)?;
        self.commit()
    }

    /// Bitmap text with its top-left corner at (x, y)
    ///
    /// Returns the x position following the last glyph. The painted area
    /// is exactly [`measure`](crate::text::measure) when a background is
    /// given.
    fn text<F: Font + ?Sized>(
        &mut self,
        font: &F,
        text: &str,
        x: i32,
        y: i32,
        foreground: Rgb565,
        background: Option<Rgb565>,
    ) -> Result<i32> {
        let end = text::render(self, font, text, x, y, foreground, background.into())?;
        self.commit()?;
        Ok(end)
    }

    /// Bitmap text over a background tile
    ///
    /// Every glyph cell is painted opaquely: unset pixels take the tile
    /// pixel at the same cell position, or `background` where the cell
    /// extends past the tile. Returns the x position following the last
    /// glyph.
    #[allow(clippy::too_many_arguments)]
    fn text_on_tile<F: Font + ?Sized>(
        &mut self,
        font: &F,
        text: &str,
        x: i32,
        y: i32,
        foreground: Rgb565,
        tile: Tile<'_>,
        background: Rgb565,
    ) -> Result<i32> {
        let backing = text::Backing::Tiled(tile, background);
        let end = text::render(self, font, text, x, y, foreground, backing)?;
        self.commit()?;
        Ok(end)
    }

    /// Hershey vector text scaled by `scale`; returns the final x position
    fn vector_text(
        &mut self,
        font: &HersheyFont<'_>,
        text: &str,
        x: i32,
        y: i32,
        color: Rgb565,
        scale: f32,
    ) -> Result<i32> {
        let end = text::hershey::render(self, font, text, x, y, color, scale)?;
        self.commit()?;
        Ok(end)
    }

    /// Decode a JPEG and draw it with its top-left corner at (x, y)
    ///
    /// A stream that fails to decode writes nothing.
    #[cfg(feature = "jpeg")]
    fn jpeg(&mut self, data: &[u8], x: i32, y: i32) -> Result<()> {
        crate::jpeg::draw_jpeg(self, data, x, y)?;
        self.commit()
    }
}

// Blanket implementation for all pixel sinks
impl<T: PixelSink + ?Sized> Draw for T {}
