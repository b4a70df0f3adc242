//! Control pin helpers
//!
//! Panel control pins (chip-select, data/command, reset, power-enable,
//! tearing-effect) use the `embedded-hal` 1.0 digital traits. This module
//! adds the pieces those traits leave out: a placeholder for pins that are
//! not wired and a logic level type for configurable active levels.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// The opposite level
    pub const fn inverse(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Drive `pin` to this level
    pub fn apply<P: OutputPin>(self, pin: &mut P) -> Result<(), P::Error> {
        match self {
            Level::Low => pin.set_low(),
            Level::High => pin.set_high(),
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Placeholder for an optional pin that is not connected
///
/// Writes are ignored and reads return low.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}
