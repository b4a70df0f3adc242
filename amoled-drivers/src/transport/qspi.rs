//! Quad-SPI transport
//!
//! Every transaction starts with a four-byte header on a single lane:
//! `[opcode, 0x00, register, 0x00]`. Register writes keep their parameters
//! on that lane; pixel writes switch to four lanes after the header.
//!
//! ```text
//! CS  ‾‾\______________________________________/‾‾
//! D0     | 02 | 00 | cmd | 00 | p0 | p1 | ...
//!
//! CS  ‾‾\______________________________________/‾‾
//! D0     | 32 | 00 | 2C | 00 |  pixel bytes on D0..D3
//! ```

use amoled_core::{ByteOrder, Error, PixelFormat, Result, Rgb565};
use amoled_hal::{LaneBus, Lanes};
use embedded_hal::digital::OutputPin;

use super::{encode_chunks, with_cs, Transport, RAMWR, RAMWRC};

/// Header opcodes
pub mod opcode {
    /// Register write, parameters on one lane
    pub const WRITE_REG: u8 = 0x02;
    /// Memory write, data on four lanes
    pub const WRITE_QUAD: u8 = 0x32;
}

/// QSPI transport over a [`LaneBus`] that supports [`Lanes::Quad`]
pub struct Qspi<B, CS> {
    bus: B,
    cs: CS,
    order: ByteOrder,
}

impl<B: LaneBus, CS: OutputPin> Qspi<B, CS> {
    /// Create a transport; pixels go out big-endian
    ///
    /// The bus must drive four lanes. A narrower bus is rejected here with
    /// [`Error::InvalidArgument`] rather than on the first pixel write.
    pub fn new(bus: B, cs: CS) -> Result<Self> {
        if bus.max_lanes() < Lanes::Quad {
            #[cfg(feature = "defmt")]
            defmt::error!("QSPI needs 4 lanes, bus has {}", bus.max_lanes().count());
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            bus,
            cs,
            order: ByteOrder::BigEndian,
        })
    }

    /// Use a different byte order for 16-bit pixels
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Release the bus and chip-select pin
    pub fn release(self) -> (B, CS) {
        (self.bus, self.cs)
    }

    const fn header(op: u8, register: u8) -> [u8; 4] {
        [op, 0x00, register, 0x00]
    }
}

impl<B: LaneBus, CS: OutputPin> Transport for Qspi<B, CS> {
    fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<()> {
        let bus = &mut self.bus;
        with_cs(&mut self.cs, || {
            bus.write(Lanes::Single, &Self::header(opcode::WRITE_REG, cmd))
                .map_err(Error::from_bus)?;
            if !params.is_empty() {
                bus.write(Lanes::Single, params).map_err(Error::from_bus)?;
            }
            bus.flush().map_err(Error::from_bus)
        })
    }

    fn send_data(&mut self, data: &[u8]) -> Result<()> {
        let bus = &mut self.bus;
        with_cs(&mut self.cs, || {
            bus.write(Lanes::Single, &Self::header(opcode::WRITE_QUAD, RAMWRC))
                .map_err(Error::from_bus)?;
            bus.write(Lanes::Quad, data).map_err(Error::from_bus)?;
            bus.flush().map_err(Error::from_bus)
        })
    }

    fn send_pixels<I>(&mut self, pixels: I, count: usize, format: PixelFormat) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        let order = self.order;
        let bus = &mut self.bus;
        with_cs(&mut self.cs, || {
            bus.write(Lanes::Single, &Self::header(opcode::WRITE_QUAD, RAMWR))
                .map_err(Error::from_bus)?;
            encode_chunks(pixels, count, format, order, |chunk| {
                bus.write(Lanes::Quad, chunk).map_err(Error::from_bus)
            })?;
            bus.flush().map_err(Error::from_bus)
        })
    }
}
