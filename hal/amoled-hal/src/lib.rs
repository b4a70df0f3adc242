//! AMOLED Hardware Abstraction Layer
//!
//! This crate defines the bus capability the panel drivers are written
//! against. A panel controller only needs to "send bytes over N data
//! lanes" while it owns chip-select, so the same controller logic runs
//! over a 4-lane QSPI peripheral or a plain 1-lane SPI bus.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  amoled-drivers (Transport, Controller) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  amoled-hal (this crate - LaneBus)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip QSPI    │       │ embedded-hal  │
//! │  peripheral   │       │ SpiBus (1x)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::LaneBus`] - Multi-lane byte writes
//! - [`bus::Error`] - Classification of bus failures
//!
//! Pins use the `embedded-hal` 1.0 digital traits directly; [`gpio::NoPin`]
//! stands in for optional pins that are not wired.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod spi;

// Re-export key types at crate root for convenience
pub use bus::{ErrorKind, LaneBus, Lanes};
pub use gpio::{Level, NoPin};
pub use spi::{SingleLane, SingleLaneError};
