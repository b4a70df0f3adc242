//! Pixel sink trait
//!
//! The seam between the rasterizer and whatever stores or transmits pixels.
//! A panel driver streams each area straight to the bus; a framebuffer
//! copies it into memory.

use amoled_core::{Rect, Result, Rgb565};

/// Destination for rasterized pixels
///
/// Areas handed to a sink are always non-empty and lie entirely inside
/// [`bounds`](PixelSink::bounds); the drawing layer clips before calling.
pub trait PixelSink {
    /// Logical size as (width, height)
    fn size(&self) -> (u16, u16);

    /// Full drawable area
    fn bounds(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(0, 0, u32::from(w), u32::from(h))
    }

    /// Fill an area with a single color
    fn fill_area(&mut self, area: Rect, color: Rgb565) -> Result<()>;

    /// Write `area.width * area.height` pixels in row-major order
    fn write_area<I>(&mut self, area: Rect, pixels: I) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>;

    /// Called once after every complete drawing operation
    ///
    /// Buffered sinks use this to push the changed region.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: PixelSink + ?Sized> PixelSink for &mut T {
    fn size(&self) -> (u16, u16) {
        (**self).size()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn fill_area(&mut self, area: Rect, color: Rgb565) -> Result<()> {
        (**self).fill_area(area, color)
    }

    fn write_area<I>(&mut self, area: Rect, pixels: I) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        (**self).write_area(area, pixels)
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }
}
