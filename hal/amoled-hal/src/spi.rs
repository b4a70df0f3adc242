//! Single-lane adapter
//!
//! [`SingleLane`] lets any `embedded-hal` 1.0 [`SpiBus`] drive a panel in
//! 1-lane mode, with the transport managing chip-select and D/C itself.

use embedded_hal::spi::{Error as _, ErrorKind as SpiErrorKind, SpiBus};

use crate::bus::{Error, ErrorKind, LaneBus, Lanes};

/// Error from a [`SingleLane`] bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SingleLaneError<E> {
    /// Underlying SPI error
    Spi(E),
    /// More than one lane was requested
    UnsupportedLanes,
}

impl<E: embedded_hal::spi::Error> Error for SingleLaneError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            SingleLaneError::Spi(e) => match e.kind() {
                SpiErrorKind::Overrun => ErrorKind::Overrun,
                SpiErrorKind::ChipSelectFault => ErrorKind::Busy,
                _ => ErrorKind::Other,
            },
            SingleLaneError::UnsupportedLanes => ErrorKind::UnsupportedLanes,
        }
    }
}

/// 1-lane [`LaneBus`] over an `embedded-hal` SPI bus
pub struct SingleLane<B> {
    spi: B,
}

impl<B: SpiBus> SingleLane<B> {
    /// Wrap an SPI bus
    pub fn new(spi: B) -> Self {
        Self { spi }
    }

    /// Release the underlying bus
    pub fn release(self) -> B {
        self.spi
    }
}

impl<B: SpiBus> LaneBus for SingleLane<B> {
    type Error = SingleLaneError<B::Error>;

    fn max_lanes(&self) -> Lanes {
        Lanes::Single
    }

    fn write(&mut self, lanes: Lanes, data: &[u8]) -> Result<(), Self::Error> {
        if lanes != Lanes::Single {
            return Err(SingleLaneError::UnsupportedLanes);
        }
        self.spi.write(data).map_err(SingleLaneError::Spi)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(SingleLaneError::Spi)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    #[derive(Debug)]
    struct MockSpiError;

    impl embedded_hal::spi::Error for MockSpiError {
        fn kind(&self) -> SpiErrorKind {
            SpiErrorKind::Overrun
        }
    }

    struct MockSpi {
        written: Vec<u8>,
        fail: bool,
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = MockSpiError;
    }

    impl SpiBus for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockSpiError);
            }
            self.written.extend_from_slice(words);
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.write(write)
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_single_lane_writes_through() {
        let mut bus = SingleLane::new(MockSpi {
            written: Vec::new(),
            fail: false,
        });
        bus.write(Lanes::Single, &[0x2A, 0x00]).unwrap();
        assert_eq!(bus.release().written, [0x2A, 0x00]);
    }

    #[test]
    fn test_single_lane_rejects_quad() {
        let mut bus = SingleLane::new(MockSpi {
            written: Vec::new(),
            fail: false,
        });
        let err = bus.write(Lanes::Quad, &[0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedLanes);
    }

    #[test]
    fn test_spi_error_classified() {
        let mut bus = SingleLane::new(MockSpi {
            written: Vec::new(),
            fail: true,
        });
        let err = bus.write(Lanes::Single, &[0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overrun);
    }
}
