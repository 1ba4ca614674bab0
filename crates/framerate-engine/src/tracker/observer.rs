use super::TrackerId;

/// Receives frame rate reports.
///
/// Trackers hold observers weakly: dropping the last `Rc` to an observer
/// silently turns reports into no-ops.
pub trait FrameRateObserver {
    fn on_frame_rate_update(&self, tracker: TrackerId, fps: u32);
}

impl<F> FrameRateObserver for F
where
    F: Fn(TrackerId, u32),
{
    fn on_frame_rate_update(&self, tracker: TrackerId, fps: u32) {
        self(tracker, fps)
    }
}
