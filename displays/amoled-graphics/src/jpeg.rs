//! JPEG decoding
//!
//! Decoding happens entirely before anything touches the sink, so a corrupt
//! stream leaves the panel window untouched.

use alloc::vec::Vec;

use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

use amoled_core::{Error, Rect, Result, Rgb565};

use crate::image::jpeg_info;
use crate::sink::PixelSink;

/// A decoded image in panel-native pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<Rgb565>,
}

/// Decode a whole JPEG stream
pub fn decode_jpeg(data: &[u8]) -> Result<DecodedImage> {
    // cheap structural check before the decoder allocates
    jpeg_info(data)?;

    let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(data, options);
    let raw = decoder.decode().map_err(|_| Error::DecodeError)?;
    let (width, height) = decoder.dimensions().ok_or(Error::DecodeError)?;

    let count = width * height;
    if count == 0 {
        return Err(Error::DecodeError);
    }
    let pixels: Vec<Rgb565> = match raw.len() / count {
        3 => raw
            .chunks_exact(3)
            .map(|p| Rgb565::new(p[0], p[1], p[2]))
            .collect(),
        1 => raw.iter().map(|&l| Rgb565::new(l, l, l)).collect(),
        _ => return Err(Error::DecodeError),
    };

    Ok(DecodedImage {
        width: u16::try_from(width).map_err(|_| Error::DecodeError)?,
        height: u16::try_from(height).map_err(|_| Error::DecodeError)?,
        pixels,
    })
}

/// Decode a JPEG and keep only the `width`x`height` region at (x, y)
///
/// The region must lie inside the image.
pub fn decode_jpeg_region(data: &[u8], x: u16, y: u16, width: u16, height: u16) -> Result<DecodedImage> {
    let full = decode_jpeg(data)?;
    let image = Rect::new(0, 0, u32::from(full.width), u32::from(full.height));
    let region = Rect::new(i32::from(x), i32::from(y), u32::from(width), u32::from(height));
    if region.is_empty() || image.intersect(&region) != Some(region) {
        return Err(Error::InvalidArgument);
    }

    let stride = usize::from(full.width);
    let mut pixels = Vec::with_capacity(usize::from(width) * usize::from(height));
    for row in usize::from(y)..usize::from(y) + usize::from(height) {
        let start = row * stride + usize::from(x);
        pixels.extend_from_slice(&full.pixels[start..start + usize::from(width)]);
    }
    Ok(DecodedImage {
        width,
        height,
        pixels,
    })
}

/// Decode `data` and blit it with its top-left corner at (x, y), clipped
///
/// Does not commit; [`Draw::jpeg`](crate::Draw::jpeg) does.
pub fn draw_jpeg<S: PixelSink + ?Sized>(sink: &mut S, data: &[u8], x: i32, y: i32) -> Result<()> {
    let image = decode_jpeg(data)?;
    crate::image::blit(
        sink,
        x,
        y,
        u32::from(image.width),
        u32::from(image.height),
        &image.pixels,
    )
}
