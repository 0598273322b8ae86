/// Event counters kept by the [`Dimmer`](crate::Dimmer).
///
/// The dimmer never reports errors; a stuck dial or a dead switch shows up here
/// as counters that stop moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    pub presses: u32,
    pub releases: u32,
    pub value_changes: u32,
    pub direction_changes: u32,
    /// Counter forced back to 0 after turning below the bottom of the dial.
    pub low_reseeds: u32,
    /// Counter forced back to the top after turning past it.
    pub high_reseeds: u32,
    pub blinks_completed: u32,
    /// Blinks cut short by another press.
    pub blinks_abandoned: u32,
}
