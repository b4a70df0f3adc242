//! QSPI/SPI AMOLED panel drivers
//!
//! Layers, bottom up:
//!
//! - [`transport`]: command and pixel framing over a [`LaneBus`](amoled_hal::LaneBus)
//! - [`panel`]: controller command set, init scripts and rotation tables
//! - [`Amoled`]: lifecycle, window addressing and direct drawing
//! - [`Buffered`]: framebuffer drawing with dirty-region flushes
//!
//! Drawing operations come from [`amoled_graphics::Draw`], implemented for
//! every [`PixelSink`](amoled_graphics::PixelSink).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod amoled;
pub mod buffered;
pub mod panel;
pub mod transport;

#[cfg(test)]
mod mock;

pub use amoled::{Amoled, ControlPins, VERSION};
pub use buffered::Buffered;
pub use panel::{cmd, InitStep, PanelTables, PanelVariant};
pub use transport::{Qspi, Spi, Transport};

pub use amoled_core::config::PanelConfig;
pub use amoled_core::{Error, Orientation, PixelFormat, Result, Rgb565};
pub use amoled_graphics::Draw;
