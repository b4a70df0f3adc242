//! Configuration types
//!
//! Board-agnostic configuration structures. With the `serde` feature they
//! persist as postcard binary data; with `toml` a whole board description
//! parses from text.

pub mod hardware;
pub mod panel;
#[cfg(feature = "toml")]
pub mod toml;

pub use hardware::*;
pub use panel::*;
