//! embedded-graphics interop
//!
//! Lets embedded-graphics primitives, fonts and images draw into a
//! [`Framebuffer`].

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565 as EgRgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;

use amoled_core::{Rect, Rgb565};

use crate::framebuffer::Framebuffer;
use crate::sink::PixelSink;

/// Convert from an embedded-graphics color
pub fn from_eg(color: EgRgb565) -> Rgb565 {
    Rgb565::from_raw(RawU16::from(color).into_inner())
}

/// Convert to an embedded-graphics color
pub fn to_eg(color: Rgb565) -> EgRgb565 {
    EgRgb565::from(RawU16::new(color.raw()))
}

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

impl DrawTarget for Framebuffer<'_> {
    type Color = EgRgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounds();
        for Pixel(p, color) in pixels {
            let area = Rect::new(p.x, p.y, 1, 1);
            if bounds.intersect(&area).is_some() {
                // in-bounds framebuffer writes cannot fail
                let _ = self.fill_area(area, from_eg(color));
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = Rect::new(area.top_left.x, area.top_left.y, area.size.width, area.size.height);
        if let Some(visible) = self.bounds().intersect(&area) {
            let _ = self.fill_area(visible, from_eg(color));
        }
        Ok(())
    }
}
