/// Category of scheduled work a tick subscription participates in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TickMode {
    /// Regular frames; paused while an interactive gesture is being tracked.
    #[default]
    Default,
    /// Frames serviced while an interactive gesture (drag, scroll) is held.
    Tracking,
    /// Participates in every mode.
    Common,
}

impl TickMode {
    /// Returns true when a subscription made under `self` fires while the
    /// loop is serviced under `active`.
    pub fn runs_in(self, active: TickMode) -> bool {
        self == TickMode::Common || self == active
    }
}
