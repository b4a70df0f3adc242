//! 1-lane SPI transport
//!
//! The data/command pin frames each transaction: low while the opcode byte
//! is clocked out, high for parameters and pixel data.

use amoled_core::{ByteOrder, Error, PixelFormat, Result, Rgb565};
use amoled_hal::{LaneBus, Lanes};
use embedded_hal::digital::OutputPin;

use super::{encode_chunks, pin_error, with_cs, Transport, RAMWR};

/// SPI transport with chip-select and data/command pins
pub struct Spi<B, CS, DC> {
    bus: B,
    cs: CS,
    dc: DC,
    order: ByteOrder,
}

impl<B: LaneBus, CS: OutputPin, DC: OutputPin> Spi<B, CS, DC> {
    pub fn new(bus: B, cs: CS, dc: DC) -> Self {
        Self {
            bus,
            cs,
            dc,
            order: ByteOrder::BigEndian,
        }
    }

    /// Use a different byte order for 16-bit pixels
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// Release the bus and pins
    pub fn release(self) -> (B, CS, DC) {
        (self.bus, self.cs, self.dc)
    }
}

impl<B: LaneBus, CS: OutputPin, DC: OutputPin> Transport for Spi<B, CS, DC> {
    fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<()> {
        let (bus, dc) = (&mut self.bus, &mut self.dc);
        with_cs(&mut self.cs, || {
            dc.set_low().map_err(pin_error)?;
            bus.write(Lanes::Single, &[cmd]).map_err(Error::from_bus)?;
            if !params.is_empty() {
                dc.set_high().map_err(pin_error)?;
                bus.write(Lanes::Single, params).map_err(Error::from_bus)?;
            }
            bus.flush().map_err(Error::from_bus)
        })
    }

    fn send_data(&mut self, data: &[u8]) -> Result<()> {
        let (bus, dc) = (&mut self.bus, &mut self.dc);
        with_cs(&mut self.cs, || {
            dc.set_high().map_err(pin_error)?;
            bus.write(Lanes::Single, data).map_err(Error::from_bus)?;
            bus.flush().map_err(Error::from_bus)
        })
    }

    fn send_pixels<I>(&mut self, pixels: I, count: usize, format: PixelFormat) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        let order = self.order;
        let (bus, dc) = (&mut self.bus, &mut self.dc);
        with_cs(&mut self.cs, || {
            dc.set_low().map_err(pin_error)?;
            bus.write(Lanes::Single, &[RAMWR]).map_err(Error::from_bus)?;
            dc.set_high().map_err(pin_error)?;
            encode_chunks(pixels, count, format, order, |chunk| {
                bus.write(Lanes::Single, chunk).map_err(Error::from_bus)
            })?;
            bus.flush().map_err(Error::from_bus)
        })
    }
}
