//! Frame rate tracking.
//!
//! [`FrameRateTracker`] subscribes to a tick source, counts refresh ticks in a
//! time window and reports the averaged rate to a weakly held
//! [`FrameRateObserver`] each time the window reaches the notification
//! interval.

mod config;
mod frame_rate;
mod observer;
mod sample_window;

pub use config::TrackerConfig;
pub use frame_rate::{FrameRateTracker, TrackerId};
pub use observer::FrameRateObserver;
pub use sample_window::{SampleWindow, round_rate};
