//! Panel transports
//!
//! A transport frames commands and pixel streams for one wiring:
//!
//! - [`Qspi`]: quad-lane panels, opcode carried in a single-lane header
//! - [`Spi`]: 1-lane panels with a data/command pin
//!
//! Both own chip-select and hold it asserted for exactly one logical
//! transaction. CS is released even when the bus write fails, so the next
//! transaction starts from a clean frame.

pub mod qspi;
pub mod spi;

pub use qspi::Qspi;
pub use spi::Spi;

use amoled_core::{ByteOrder, Error, PixelFormat, Result, Rgb565};
use embedded_hal::digital::OutputPin;

/// Size of the stack buffer pixels are encoded into before each bus write
///
/// A multiple of both 2 and 3 so no pixel straddles two writes.
pub const CHUNK_BYTES: usize = 1536;

/// Memory write (RAMWR)
pub(crate) const RAMWR: u8 = 0x2C;
/// Memory write continue (RAMWRC)
pub(crate) const RAMWRC: u8 = 0x3C;

/// Command and pixel framing over a panel bus
pub trait Transport {
    /// Send `cmd` followed by its parameter bytes in one transaction
    fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<()>;

    /// Send already-encoded pixel bytes, continuing the current memory write
    fn send_data(&mut self, data: &[u8]) -> Result<()>;

    /// Start a memory write and stream exactly `count` pixels
    ///
    /// An iterator that yields fewer or more than `count` pixels is an
    /// [`Error::InvalidArgument`]; bytes already on the wire stay there.
    fn send_pixels<I>(&mut self, pixels: I, count: usize, format: PixelFormat) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<()> {
        T::send_command(self, cmd, params)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<()> {
        T::send_data(self, data)
    }

    fn send_pixels<I>(&mut self, pixels: I, count: usize, format: PixelFormat) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        T::send_pixels(self, pixels, count, format)
    }
}

pub(crate) fn pin_error<E>(_: E) -> Error {
    Error::BusFault
}

/// Run `f` with chip-select asserted (low)
///
/// CS is released whatever `f` returns; the first error wins.
pub(crate) fn with_cs<CS, F>(cs: &mut CS, f: F) -> Result<()>
where
    CS: OutputPin,
    F: FnOnce() -> Result<()>,
{
    cs.set_low().map_err(pin_error)?;
    let result = f();
    let released = cs.set_high().map_err(pin_error);
    result.and(released)
}

/// Encode `count` pixels into stack chunks and hand each chunk to `write`
pub(crate) fn encode_chunks<I, F>(
    pixels: I,
    count: usize,
    format: PixelFormat,
    order: ByteOrder,
    mut write: F,
) -> Result<()>
where
    I: IntoIterator<Item = Rgb565>,
    F: FnMut(&[u8]) -> Result<()>,
{
    let size = format.bytes_per_pixel();
    let mut buf = [0u8; CHUNK_BYTES];
    let mut len = 0;
    let mut iter = pixels.into_iter();

    for _ in 0..count {
        let color = iter.next().ok_or(Error::InvalidArgument)?;
        len += format.encode(color, order, &mut buf[len..]);
        if len + size > CHUNK_BYTES {
            write(&buf[..len])?;
            len = 0;
        }
    }
    if len > 0 {
        write(&buf[..len])?;
    }

    if iter.next().is_some() {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mock::{log, Event, MockPin};
    use core::iter;
    use proptest::prelude::*;
    use std::vec::Vec;

    fn collect(count: usize, supplied: usize, format: PixelFormat) -> (Vec<usize>, Vec<u8>, Result<()>) {
        let mut sizes = Vec::new();
        let mut bytes = Vec::new();
        let result = encode_chunks(
            iter::repeat(Rgb565::RED).take(supplied),
            count,
            format,
            ByteOrder::BigEndian,
            |chunk| {
                sizes.push(chunk.len());
                bytes.extend_from_slice(chunk);
                Ok(())
            },
        );
        (sizes, bytes, result)
    }

    #[test]
    fn test_encode_big_endian_red() {
        let (sizes, bytes, result) = collect(2, 2, PixelFormat::Rgb565);
        assert!(result.is_ok());
        assert_eq!(sizes, [4]);
        assert_eq!(bytes, [0xF8, 0x00, 0xF8, 0x00]);
    }

    #[test]
    fn test_encode_count_mismatch() {
        let (_, _, short) = collect(10, 9, PixelFormat::Rgb565);
        assert_eq!(short, Err(Error::InvalidArgument));
        let (_, _, long) = collect(10, 11, PixelFormat::Rgb565);
        assert_eq!(long, Err(Error::InvalidArgument));
    }

    #[test]
    fn test_cs_released_on_error() {
        let events = log();
        let mut cs = MockPin::new("cs", &events);
        let result = with_cs(&mut cs, || Err(Error::BusTimeout));
        assert_eq!(result, Err(Error::BusTimeout));
        assert_eq!(
            *events.borrow(),
            [Event::Pin("cs", false), Event::Pin("cs", true)]
        );
    }

    proptest! {
        #[test]
        fn prop_chunks_cover_every_pixel(count in 0usize..3000, wide in any::<bool>()) {
            let format = if wide { PixelFormat::Rgb888 } else { PixelFormat::Rgb565 };
            let (sizes, bytes, result) = collect(count, count, format);
            prop_assert!(result.is_ok());
            prop_assert_eq!(bytes.len(), count * format.bytes_per_pixel());
            for size in sizes {
                prop_assert!(size <= CHUNK_BYTES);
                prop_assert_eq!(size % format.bytes_per_pixel(), 0);
            }
        }
    }
}
