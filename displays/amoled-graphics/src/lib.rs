//! Rasterizer for AMOLED panel drivers
//!
//! This crate provides:
//! - `PixelSink`, the seam between drawing code and pixel storage
//! - `Draw`, shape, text and image operations for every sink
//! - Bitmap (monospace and proportional) and Hershey vector fonts
//! - `Framebuffer`, an in-memory sink with dirty-region tracking
//!
//! # Architecture
//!
//! Primitives reduce every shape to clipped rectangular spans and hand
//! them to a [`PixelSink`]. A panel driver implements the sink by setting
//! the column/row window and streaming pixels; a framebuffer implements it
//! by copying into RAM and later flushing only what changed.
//!
//! ## Optional features
//!
//! - `jpeg`: baseline/progressive JPEG decoding (needs an allocator)
//! - `embedded-graphics`: `DrawTarget` for [`Framebuffer`]
//! - `defmt`: defmt formatting for core types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "jpeg")]
extern crate alloc;

pub mod draw;
pub mod framebuffer;
pub mod image;
pub mod primitives;
pub mod sink;
pub mod text;

#[cfg(feature = "embedded-graphics")]
pub mod eg;
#[cfg(feature = "jpeg")]
pub mod jpeg;

// Re-export key types
pub use draw::Draw;
pub use framebuffer::Framebuffer;
pub use image::jpeg_info;
pub use primitives::{polygon_center, LinePoints, MAX_POLY_VERTICES};
pub use sink::PixelSink;
pub use text::hershey::measure_vector;
pub use text::{measure, Font, Glyph, HersheyFont, MonoFont, ProportionalFont, Tile};

#[cfg(feature = "jpeg")]
pub use jpeg::{decode_jpeg, draw_jpeg, DecodedImage};
