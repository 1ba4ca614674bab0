use std::time::Duration;

use crate::tick::TickMode;

/// Tracker configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Minimum elapsed time between two reports.
    pub notification_interval: Duration,

    /// Mode used by `FrameRateTracker::start_default`.
    pub mode: TickMode,
}

impl TrackerConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.notification_interval = interval;
        self
    }

    pub fn with_mode(mut self, mode: TickMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            notification_interval: Self::DEFAULT_INTERVAL,
            mode: TickMode::Common,
        }
    }
}
