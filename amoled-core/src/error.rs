//! Error taxonomy

use core::fmt;

use amoled_hal::bus::{self, ErrorKind};

/// Errors raised by the transport, panel controller and rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus busy or a transfer did not complete in time
    BusTimeout,
    /// Bus failure other than a timeout (overrun, mode fault)
    BusFault,
    /// Bad geometry, color, length or configuration value
    InvalidArgument,
    /// Operation requires the panel to be initialized and awake
    NotInitialized,
    /// Image data could not be decoded
    DecodeError,
    /// Address outside the panel's addressable range
    OutOfBounds,
}

/// Result alias used across the driver crates
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Convert a bus error into the driver taxonomy
    pub fn from_bus<E: bus::Error>(err: E) -> Self {
        match err.kind() {
            ErrorKind::Timeout | ErrorKind::Busy => Error::BusTimeout,
            ErrorKind::InvalidLength | ErrorKind::UnsupportedLanes => Error::InvalidArgument,
            ErrorKind::Overrun | ErrorKind::Other => Error::BusFault,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::BusTimeout => "bus timeout",
            Error::BusFault => "bus fault",
            Error::InvalidArgument => "invalid argument",
            Error::NotInitialized => "panel not initialized",
            Error::DecodeError => "image decode failed",
            Error::OutOfBounds => "address out of bounds",
        };
        f.write_str(msg)
    }
}
