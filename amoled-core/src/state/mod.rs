//! Panel lifecycle state machine
//!
//! Unpowered → Reset → Initialized → {Active ⇄ Sleeping}. The state is
//! explicit, finite and deterministic; the panel controller feeds it an
//! event after each successful lifecycle command.

pub mod events;
pub mod machine;

pub use events::PanelEvent;
pub use machine::PanelState;
