//! In-memory framebuffer
//!
//! Borrows caller-owned storage so the application decides where the frame
//! lives (internal SRAM, PSRAM, a static). Tracks the bounding box of every
//! write since the last [`take_dirty`](Framebuffer::take_dirty).

use amoled_core::{Error, Rect, Result, Rgb565};

use crate::sink::PixelSink;

pub struct Framebuffer<'a> {
    buf: &'a mut [Rgb565],
    width: u16,
    height: u16,
    dirty: Option<Rect>,
}

impl<'a> Framebuffer<'a> {
    /// Wrap `buf` as a `width`x`height` frame
    pub fn new(buf: &'a mut [Rgb565], width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 || buf.len() < usize::from(width) * usize::from(height) {
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            buf,
            width,
            height,
            dirty: None,
        })
    }

    /// Reinterpret the storage with new dimensions (after a rotation)
    ///
    /// Contents are kept as-is and the whole frame is marked dirty.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        if width == 0 || height == 0 || self.buf.len() < usize::from(width) * usize::from(height) {
            return Err(Error::InvalidArgument);
        }
        self.width = width;
        self.height = height;
        self.mark_all_dirty();
        Ok(())
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    /// Read back one pixel; `None` outside the frame
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        let x = u16::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u16::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(self.buf[self.index(x, y)])
    }

    /// Frame contents, row-major
    pub fn as_slice(&self) -> &[Rgb565] {
        &self.buf[..usize::from(self.width) * usize::from(self.height)]
    }

    /// Pixels of `area` in row-major order; `area` must lie inside the frame
    pub fn area_pixels(&self, area: Rect) -> impl Iterator<Item = Rgb565> + '_ {
        let width = usize::from(self.width);
        let (x0, y0) = (area.x.max(0) as usize, area.y.max(0) as usize);
        let cols = area.width as usize;
        (y0..y0 + area.height as usize).flat_map(move |row| {
            let start = row * width + x0;
            self.buf[start..start + cols].iter().copied()
        })
    }

    /// Bounding box of writes since the last call to [`take_dirty`](Self::take_dirty)
    pub fn dirty(&self) -> Option<Rect> {
        self.dirty
    }

    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty = Some(self.bounds());
    }

    fn touch(&mut self, area: Rect) {
        self.dirty = Some(match self.dirty {
            Some(d) => d.union(&area),
            None => area,
        });
    }
}

impl PixelSink for Framebuffer<'_> {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn fill_area(&mut self, area: Rect, color: Rgb565) -> Result<()> {
        let width = usize::from(self.width);
        let cols = area.width as usize;
        for row in area.y as usize..area.y as usize + area.height as usize {
            let start = row * width + area.x as usize;
            self.buf[start..start + cols].fill(color);
        }
        self.touch(area);
        Ok(())
    }

    fn write_area<I>(&mut self, area: Rect, pixels: I) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        let width = usize::from(self.width);
        let cols = area.width as usize;
        let mut source = pixels.into_iter();
        for row in area.y as usize..area.y as usize + area.height as usize {
            let start = row * width + area.x as usize;
            for slot in &mut self.buf[start..start + cols] {
                *slot = source.next().ok_or(Error::InvalidArgument)?;
            }
        }
        self.touch(area);
        Ok(())
    }
}
