//! Raw image blits and JPEG header parsing

use amoled_core::{ByteOrder, Error, Rect, Result, Rgb565};

use crate::sink::PixelSink;

/// Copy the visible part of a `width`x`height` image whose top-left corner
/// lands at (x, y)
///
/// `pixels` is row-major and must hold at least `width * height` entries.
pub(crate) fn blit<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    pixels: &[Rgb565],
) -> Result<()> {
    let needed = width as usize * height as usize;
    if pixels.len() < needed {
        return Err(Error::InvalidArgument);
    }
    blit_with(sink, Rect::new(x, y, width, height), |index| pixels[index])
}

/// Like [`blit`] for packed 16-bit pixel bytes
pub(crate) fn blit_bytes<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    data: &[u8],
    order: ByteOrder,
) -> Result<()> {
    let needed = width as usize * height as usize * 2;
    if data.len() < needed {
        return Err(Error::InvalidArgument);
    }
    blit_with(sink, Rect::new(x, y, width, height), |index| {
        Rgb565::from_bytes([data[index * 2], data[index * 2 + 1]], order)
    })
}

fn blit_with<S, F>(sink: &mut S, image: Rect, pixel_at: F) -> Result<()>
where
    S: PixelSink + ?Sized,
    F: Fn(usize) -> Rgb565,
{
    let Some(visible) = sink.bounds().intersect(&image) else {
        return Ok(());
    };
    let stride = image.width as usize;
    let col0 = (visible.x - image.x) as usize;
    let row0 = (visible.y - image.y) as usize;
    let cols = visible.width as usize;
    let pixel_at = &pixel_at;

    let pixels = (0..visible.height as usize).flat_map(move |row| {
        let base = (row0 + row) * stride + col0;
        (base..base + cols).map(pixel_at)
    });
    sink.write_area(visible, pixels)
}

/// Baseline or progressive JPEG dimensions, read from the SOF segment
/// without decoding
pub fn jpeg_info(data: &[u8]) -> Result<(u16, u16)> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(Error::DecodeError);
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        while pos < data.len() && data[pos] == 0xFF {
            pos += 1;
        }
        let Some(&marker) = data.get(pos) else {
            break;
        };
        pos += 1;

        // standalone markers carry no length
        if marker == 0x00 || marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            continue;
        }

        let len_bytes = data.get(pos..pos + 2).ok_or(Error::DecodeError)?;
        let length = usize::from(u16::from_be_bytes([len_bytes[0], len_bytes[1]]));
        if length < 2 {
            return Err(Error::DecodeError);
        }

        if marker == 0xC0 || marker == 0xC2 {
            let sof = data.get(pos..pos + 7).ok_or(Error::DecodeError)?;
            let height = u16::from_be_bytes([sof[3], sof[4]]);
            let width = u16::from_be_bytes([sof[5], sof[6]]);
            if width == 0 || height == 0 {
                return Err(Error::DecodeError);
            }
            return Ok((width, height));
        }

        pos += length;
    }
    Err(Error::DecodeError)
}
