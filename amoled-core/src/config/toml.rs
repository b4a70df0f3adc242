//! TOML board descriptions
//!
//! ```toml
//! label = "T-Display S3 AMOLED"
//!
//! [panel]
//! variant = "rm67162"
//! bpp = 16
//!
//! [pins]
//! clk = "gpio47"
//! data = ["gpio18", "gpio7", "gpio48", "gpio5"]
//! cs = "gpio6"
//! rst = "gpio17"
//! ```
//!
//! Omitted panel fields take the variant's defaults.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

use super::hardware::{BoardConfig, PinConfig, PinMap};
use super::panel::{PanelConfig, PanelVariant};
use crate::color::ColorOrder;
use crate::error::Error;
use crate::frame::Orientation;

#[derive(Deserialize)]
struct RawBoard {
    #[serde(default)]
    label: String,
    panel: RawPanel,
    pins: RawPins,
}

#[derive(Deserialize)]
struct RawPanel {
    variant: PanelVariant,
    width: Option<u16>,
    height: Option<u16>,
    bpp: Option<u8>,
    color_order: Option<ColorOrder>,
    rotation: Option<u16>,
    reset_active_high: Option<bool>,
    align_even: Option<bool>,
    auto_refresh: Option<bool>,
    clock_hz: Option<u32>,
}

#[derive(Deserialize)]
struct RawPins {
    clk: String,
    data: Vec<String>,
    cs: String,
    dc: Option<String>,
    rst: Option<String>,
    power: Option<String>,
    te: Option<String>,
    touch_int: Option<String>,
}

impl RawPanel {
    fn resolve(self) -> crate::Result<PanelConfig> {
        let mut panel = PanelConfig::for_variant(self.variant);
        if let Some(w) = self.width {
            panel.width = w;
        }
        if let Some(h) = self.height {
            panel.height = h;
        }
        if let Some(bpp) = self.bpp {
            panel = panel.with_bpp(bpp)?;
        }
        if let Some(order) = self.color_order {
            panel.color_order = order;
        }
        if let Some(degrees) = self.rotation {
            panel.rotation = Orientation::try_from(degrees)?;
        }
        panel.reset_active_high = self.reset_active_high.unwrap_or(panel.reset_active_high);
        panel.align_even = self.align_even.unwrap_or(panel.align_even);
        panel.auto_refresh = self.auto_refresh.unwrap_or(panel.auto_refresh);
        panel.clock_hz = self.clock_hz.unwrap_or(panel.clock_hz);
        panel.validate()?;
        Ok(panel)
    }
}

fn optional_pin(value: Option<String>) -> crate::Result<Option<PinConfig>> {
    value.as_deref().map(PinConfig::parse).transpose()
}

impl RawPins {
    fn resolve(self) -> crate::Result<PinMap> {
        if self.data.len() != 4 {
            return Err(Error::InvalidArgument);
        }
        let mut data = [PinConfig::default(); 4];
        for (slot, name) in data.iter_mut().zip(&self.data) {
            *slot = PinConfig::parse(name)?;
        }

        let map = PinMap {
            clk: PinConfig::parse(&self.clk)?,
            data,
            cs: PinConfig::parse(&self.cs)?,
            dc: optional_pin(self.dc)?,
            rst: optional_pin(self.rst)?,
            power: optional_pin(self.power)?,
            te: optional_pin(self.te)?,
            touch_int: optional_pin(self.touch_int)?,
        };
        map.validate()?;
        Ok(map)
    }
}

impl BoardConfig {
    /// Parse a TOML board description
    pub fn from_toml(input: &str) -> crate::Result<Self> {
        let raw: RawBoard = ::toml::from_str(input).map_err(|_| Error::InvalidArgument)?;

        let mut label = heapless::String::new();
        label
            .push_str(&raw.label)
            .map_err(|_| Error::InvalidArgument)?;

        Ok(Self {
            label,
            panel: raw.panel.resolve()?,
            pins: raw.pins.resolve()?,
        })
    }
}
