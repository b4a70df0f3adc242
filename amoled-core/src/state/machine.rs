//! State machine definition

use crate::error::Error;

use super::events::PanelEvent;

/// Panel lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Driver constructed, nothing sent
    #[default]
    Unpowered,
    /// Reset pulse or SWRESET done
    Reset,
    /// Init script sent, display not yet switched on
    Initialized,
    /// Display on, accepting pixel data
    Active,
    /// Sleep-in, memory retained
    Sleeping,
}

impl PanelState {
    /// Check if drawing is allowed
    pub fn can_draw(&self) -> bool {
        matches!(self, PanelState::Active)
    }

    /// Check if register writes are meaningful (panel out of reset)
    pub fn is_configured(&self) -> bool {
        !matches!(self, PanelState::Unpowered)
    }

    /// Process an event and return the next state
    ///
    /// Events that do not apply in the current state leave it unchanged.
    pub fn transition(self, event: PanelEvent) -> Self {
        use PanelEvent::*;
        use PanelState::*;

        match (self, event) {
            // A reset is valid from anywhere
            (_, ResetComplete) => Reset,
            (_, PowerOff) => Unpowered,

            (Reset, InitComplete) => Initialized,
            // Re-running init restarts from the init script
            (Initialized | Active | Sleeping, InitComplete) => Initialized,

            (Initialized, DisplayOn) => Active,
            (Sleeping, DisplayOn) => Active,

            (Active, Sleep) => Sleeping,
            (Initialized, Sleep) => Sleeping,
            (Sleeping, Wake) => Active,

            // Default: stay in current state
            _ => self,
        }
    }

    /// Like [`transition`](Self::transition) but rejects events that do
    /// not apply
    pub fn try_transition(self, event: PanelEvent) -> crate::Result<Self> {
        let next = self.transition(event);
        let accepted = next != self
            || matches!(
                (self, event),
                (PanelState::Reset, PanelEvent::ResetComplete)
                    | (PanelState::Unpowered, PanelEvent::PowerOff)
                    | (PanelState::Initialized, PanelEvent::InitComplete)
            );
        if accepted {
            Ok(next)
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Require the drawing state
    pub fn ensure_active(&self) -> crate::Result<()> {
        if self.can_draw() {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}
