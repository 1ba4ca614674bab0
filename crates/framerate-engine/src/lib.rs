//! Frame rate engine crate.
//!
//! Samples per-refresh ticks, averages them over a time window and reports the
//! resulting rate to an observer. Also owns the tick sources and the `winit`
//! runtime that drives them.

pub mod core;
pub mod logging;
pub mod tick;
pub mod tracker;
pub mod window;

pub use tick::{Subscription, SubscriptionId, TickLoop, TickMode, TickSource};
pub use tracker::{FrameRateObserver, FrameRateTracker, TrackerConfig, TrackerId};
