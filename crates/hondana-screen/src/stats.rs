//! Screen header view model

/// What the screen header shows
///
/// Read-only snapshot; the runtime rebuilds it on demand from the roster
/// and the wall clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenStats {
    /// Currently visible avatars
    pub visible: usize,
    /// Whether the capacity badge lights up
    pub at_capacity: bool,
    /// Whether the "nobody here yet" placeholder shows
    pub show_empty_state: bool,
    /// `HH:MM:SS` wall-clock text
    pub clock: String,
}
