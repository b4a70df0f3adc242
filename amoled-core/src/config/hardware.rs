//! Board wiring
//!
//! Which GPIO drives which panel signal. Optional roles are `None` when the
//! board leaves them unconnected (reset tied high, no TE line, ...).

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::panel::PanelConfig;
use crate::error::Error;

/// Maximum length of a board label
pub const MAX_LABEL_LEN: usize = 32;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
    pub fn parse(value: &str) -> crate::Result<Self> {
        let mut config = Self::default();
        let mut s = value.trim();

        loop {
            if let Some(rest) = s.strip_prefix('!') {
                config.inverted = true;
                s = rest;
            } else if let Some(rest) = s.strip_prefix('^') {
                config.pull_up = true;
                s = rest;
            } else {
                break;
            }
        }

        let digits = s.strip_prefix("gpio").ok_or(Error::InvalidArgument)?;
        config.pin = digits.parse().map_err(|_| Error::InvalidArgument)?;
        Ok(config)
    }
}

/// Panel signal assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMap {
    /// Bus clock
    pub clk: PinConfig,
    /// Data lanes D0..D3 (D0 is MOSI in single-lane mode)
    pub data: [PinConfig; 4],
    /// Chip select
    pub cs: PinConfig,
    /// Data/command select, single-lane SPI only
    pub dc: Option<PinConfig>,
    /// Panel reset
    pub rst: Option<PinConfig>,
    /// Panel power enable
    pub power: Option<PinConfig>,
    /// Tearing-effect input
    pub te: Option<PinConfig>,
    /// Touch controller interrupt
    pub touch_int: Option<PinConfig>,
}

impl PinMap {
    /// Every assigned pin number, in role order
    pub fn assigned(&self) -> impl Iterator<Item = u8> + '_ {
        [Some(self.clk), Some(self.cs)]
            .into_iter()
            .chain(self.data.iter().copied().map(Some))
            .chain([self.dc, self.rst, self.power, self.te, self.touch_int])
            .flatten()
            .map(|p| p.pin)
    }

    /// Reject maps that assign one GPIO to two roles
    pub fn validate(&self) -> crate::Result<()> {
        let mut seen: u128 = 0;
        for pin in self.assigned() {
            let bit = 1u128.checked_shl(u32::from(pin)).ok_or(Error::InvalidArgument)?;
            if seen & bit != 0 {
                return Err(Error::InvalidArgument);
            }
            seen |= bit;
        }
        Ok(())
    }
}

/// Complete board description: panel plus wiring
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Human-readable board name
    pub label: String<MAX_LABEL_LEN>,
    /// Panel descriptor
    pub panel: PanelConfig,
    /// Signal assignment
    pub pins: PinMap,
}

impl BoardConfig {
    /// Check both panel and wiring
    pub fn validate(&self) -> crate::Result<()> {
        self.panel.validate()?;
        self.pins.validate()
    }
}
