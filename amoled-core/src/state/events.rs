//! Events that trigger panel state transitions

/// Lifecycle events reported by the panel controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    /// Hardware or software reset completed
    ResetComplete,
    /// Init script sent (panel still dark)
    InitComplete,
    /// DISPON sent
    DisplayOn,
    /// SLPIN / DISPOFF sent
    Sleep,
    /// SLPOUT / DISPON sent after sleeping
    Wake,
    /// Power removed or driver released
    PowerOff,
}
