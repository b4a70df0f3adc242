//! Board-agnostic core types for the AMOLED panel drivers
//!
//! This crate contains everything that does not touch a bus:
//!
//! - Error taxonomy shared by all layers
//! - Color model (RGB888 to RGB565/666/888 bus encodings)
//! - Geometry (rectangles, panel address windows)
//! - Frame/window state (orientation, logical size, gaps, MADCTL)
//! - Panel lifecycle state machine
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "toml")]
extern crate alloc;

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod state;

pub use color::{ByteOrder, ColorOrder, PixelFormat, Rgb565};
pub use error::{Error, Result};
pub use frame::{FrameState, Orientation, RotationEntry};
pub use geometry::{Point, Rect, Window};
pub use state::{PanelEvent, PanelState};
