//! Lane bus abstraction
//!
//! A [`LaneBus`] moves bytes to the panel over one, two or four data
//! lines. Chip-select is not part of this trait: the transport above it
//! keeps CS asserted across the header and payload of one transaction.

/// Number of data lines used for a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lanes {
    /// Classic SPI, MOSI only
    Single = 1,
    /// Dual SPI (D0, D1)
    Dual = 2,
    /// Quad SPI (D0..D3)
    Quad = 4,
}

impl Lanes {
    /// Number of data lines as an integer
    pub const fn count(self) -> u8 {
        self as u8
    }
}

/// Bus error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// The peripheral did not complete the transfer in time
    Timeout,
    /// The peripheral is owned by another transfer
    Busy,
    /// Buffer length not accepted by the peripheral
    InvalidLength,
    /// Lane count not supported by the peripheral
    UnsupportedLanes,
    /// Data overrun
    Overrun,
    /// Anything else
    Other,
}

/// Error type contract for [`LaneBus`] implementations
pub trait Error: core::fmt::Debug {
    /// Classify the error
    fn kind(&self) -> ErrorKind;
}

impl Error for ErrorKind {
    fn kind(&self) -> ErrorKind {
        *self
    }
}

/// Byte sink over N data lanes
///
/// Implementations map `lanes` onto their peripheral's line mode. A
/// single-lane bus must reject [`Lanes::Quad`] with
/// [`ErrorKind::UnsupportedLanes`] instead of silently degrading, since
/// the panel would misread the bits.
pub trait LaneBus {
    /// Error type for bus operations
    type Error: Error;

    /// Widest line mode this bus can drive
    fn max_lanes(&self) -> Lanes;

    /// Write `data` using `lanes` data lines
    fn write(&mut self, lanes: Lanes, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until all queued bytes are on the wire
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: LaneBus + ?Sized> LaneBus for &mut T {
    type Error = T::Error;

    fn max_lanes(&self) -> Lanes {
        T::max_lanes(self)
    }

    fn write(&mut self, lanes: Lanes, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, lanes, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_counts() {
        assert_eq!(Lanes::Single.count(), 1);
        assert_eq!(Lanes::Dual.count(), 2);
        assert_eq!(Lanes::Quad.count(), 4);
        assert!(Lanes::Quad > Lanes::Single);
    }

    #[test]
    fn test_error_kind_is_its_own_error() {
        assert_eq!(ErrorKind::Timeout.kind(), ErrorKind::Timeout);
    }
}
