//! Frame/window state
//!
//! Tracks the current orientation, the logical drawing size it implies,
//! the controller offsets (gaps) and the MADCTL register image. The panel
//! controller owns one [`FrameState`] and consults it before every window
//! command.

pub mod orientation;
pub mod state;

pub use orientation::{madctl, Orientation, RotationEntry, RotationTable};
pub use state::FrameState;
