//! Panel controller command set
//!
//! Each supported controller is a [`PanelVariant`]: a tag that selects a
//! rotation table and an init script. Scripts are plain data so the driver
//! can replay them with either a blocking or a yielding delay.

mod variants;

use amoled_core::config::PanelConfig;
use amoled_core::frame::RotationTable;
pub use amoled_core::config::PanelVariant;

/// MIPI DCS and vendor commands
pub mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Row address set
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    /// Vertical scroll definition
    pub const VSCRDEF: u8 = 0x33;
    pub const TEOFF: u8 = 0x34;
    pub const TEON: u8 = 0x35;
    /// Memory data access control
    pub const MADCTL: u8 = 0x36;
    /// Vertical scroll start address
    pub const VSCSAD: u8 = 0x37;
    /// Interface pixel format
    pub const COLMOD: u8 = 0x3A;
    pub const RAMWRC: u8 = 0x3C;
    /// Tear scanline
    pub const STESL: u8 = 0x44;
    /// Display brightness
    pub const WRDISBV: u8 = 0x51;
    /// Display control (brightness block enable)
    pub const WRCTRLD: u8 = 0x53;
    /// Raydium command page select
    pub const CMDSET: u8 = 0xFE;
}

/// Delay after releasing reset before the first command
pub const RESET_SETTLE_MS: u32 = 200;
/// Reset pulse width
pub const RESET_HOLD_MS: u32 = 300;
/// Delay after SWRESET
pub const SWRESET_MS: u32 = 120;
/// Delay after SLPOUT before DISPON
pub const SLEEP_OUT_MS: u32 = 120;
/// Delay after SLPIN before power can be removed
pub const SLEEP_IN_MS: u32 = 5;

/// One step of an init script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    /// Command with fixed parameters
    Command(u8, &'static [u8]),
    /// COLMOD with the configured pixel format
    Colmod,
    /// MADCTL with the current register image
    Madctl,
    /// Pause in milliseconds
    Delay(u32),
}

/// Tables selected by a panel variant
pub trait PanelTables {
    /// Rotation table for a panel that is `width` x `height` at 0°
    fn rotations(&self, width: u16, height: u16) -> RotationTable;

    /// Power-on command sequence, ending with the display switched on
    fn init_script(&self) -> &'static [InitStep];
}

impl PanelTables for PanelVariant {
    fn rotations(&self, width: u16, height: u16) -> RotationTable {
        match self {
            PanelVariant::Rm67162 => variants::raydium_rotations(width, height, 0),
            PanelVariant::Rm690b0 => variants::raydium_rotations(width, height, variants::RM690B0_COL_OFFSET),
            PanelVariant::Sh8601 => variants::sh8601_rotations(width, height),
        }
    }

    fn init_script(&self) -> &'static [InitStep] {
        match self {
            PanelVariant::Rm67162 => variants::RM67162_INIT,
            PanelVariant::Rm690b0 => variants::RM690B0_INIT,
            PanelVariant::Sh8601 => variants::SH8601_INIT,
        }
    }
}

/// Rotation table for a panel configuration
pub fn rotation_table(config: &PanelConfig) -> RotationTable {
    config.variant.rotations(config.width, config.height)
}
