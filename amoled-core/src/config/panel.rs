//! Panel descriptor

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ColorOrder, PixelFormat};
use crate::error::Error;
use crate::frame::Orientation;

/// Supported panel controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PanelVariant {
    /// Raydium RM67162, 240x536 (T-Display S3 AMOLED 1.91")
    Rm67162,
    /// Raydium RM690B0, 450x600 (T4-S3 AMOLED 2.41")
    Rm690b0,
    /// Sitronix SH8601, 368x448 (1.8" touch AMOLED)
    Sh8601,
}

impl PanelVariant {
    /// Native size in the 0° orientation
    pub const fn native_size(self) -> (u16, u16) {
        match self {
            PanelVariant::Rm67162 => (240, 536),
            PanelVariant::Rm690b0 => (450, 600),
            PanelVariant::Sh8601 => (368, 448),
        }
    }

    /// Whether partial windows must start on an even address with an
    /// even span
    pub const fn requires_even_window(self) -> bool {
        matches!(self, PanelVariant::Rm67162 | PanelVariant::Rm690b0)
    }

    /// Numeric type id used by board descriptions
    pub const fn id(self) -> u8 {
        match self {
            PanelVariant::Rm67162 => 0,
            PanelVariant::Rm690b0 => 1,
            PanelVariant::Sh8601 => 2,
        }
    }
}

impl TryFrom<u8> for PanelVariant {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(PanelVariant::Rm67162),
            1 => Ok(PanelVariant::Rm690b0),
            2 => Ok(PanelVariant::Sh8601),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// Immutable per-device panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Controller variant (selects command and rotation tables)
    pub variant: PanelVariant,
    /// Physical width in pixels
    pub width: u16,
    /// Physical height in pixels
    pub height: u16,
    /// Interface pixel format
    pub pixel_format: PixelFormat,
    /// Subpixel order
    pub color_order: ColorOrder,
    /// Orientation applied at construction
    pub rotation: Orientation,
    /// Reset is asserted by driving the pin high
    pub reset_active_high: bool,
    /// Even-align partial refresh windows
    pub align_even: bool,
    /// Push framebuffer changes after every primitive
    pub auto_refresh: bool,
    /// Bus clock in Hz
    pub clock_hz: u32,
}

impl PanelConfig {
    /// Native defaults for a variant
    pub const fn for_variant(variant: PanelVariant) -> Self {
        let (width, height) = variant.native_size();
        Self {
            variant,
            width,
            height,
            pixel_format: PixelFormat::Rgb565,
            color_order: ColorOrder::Rgb,
            rotation: Orientation::Deg0,
            reset_active_high: false,
            align_even: variant.requires_even_window(),
            auto_refresh: true,
            clock_hz: 80_000_000, // 80 MHz
        }
    }

    /// Set the pixel format from a bits-per-pixel count
    pub fn with_bpp(mut self, bpp: u8) -> crate::Result<Self> {
        self.pixel_format = PixelFormat::from_bpp(bpp)?;
        Ok(self)
    }

    /// Check the descriptor is usable
    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 || self.clock_hz == 0 {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Pixels in one full frame
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Serialize to postcard bytes, returning the used length
    #[cfg(feature = "serde")]
    pub fn to_postcard(&self, buf: &mut [u8]) -> crate::Result<usize> {
        postcard::to_slice(self, buf)
            .map(|used| used.len())
            .map_err(|_| Error::InvalidArgument)
    }

    /// Deserialize from postcard bytes
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> crate::Result<Self> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| Error::InvalidArgument)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::for_variant(PanelVariant::Rm67162)
    }
}
