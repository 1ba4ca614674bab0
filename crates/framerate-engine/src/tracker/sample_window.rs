use std::time::{Duration, Instant};

/// Time window over which refresh ticks are averaged.
///
/// Two states: awaiting a window start (`started_at == None`) and
/// accumulating. The tick that opens a window is not counted, so a partial
/// first interval does not inflate the rate.
#[derive(Debug, Clone, Default)]
pub struct SampleWindow {
    started_at: Option<Instant>,
    frames: u32,
}

impl SampleWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one tick. Returns the rounded rate when the window has reached
    /// `interval`, after which the window is reset.
    pub fn record(&mut self, now: Instant, interval: Duration) -> Option<u32> {
        let Some(started_at) = self.started_at else {
            self.open(now);
            return None;
        };

        self.frames = self.frames.saturating_add(1);

        // Out-of-order timestamps clamp to zero rather than panic.
        let elapsed = now.saturating_duration_since(started_at);

        // A zero-length window has no defined rate; keep accumulating.
        if elapsed < interval || elapsed.is_zero() {
            return None;
        }

        let fps = round_rate(self.frames, elapsed);
        self.reset();
        Some(fps)
    }

    /// Drops any partially accumulated window.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.frames = 0;
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Ticks counted since the window opened.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    fn open(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.frames = 0;
    }
}

/// `frames / elapsed` rounded to the nearest integer, ties away from zero
/// (`f64::round`). Saturates at `u32::MAX`.
pub fn round_rate(frames: u32, elapsed: Duration) -> u32 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    // `as` saturates for out-of-range floats.
    (f64::from(frames) / secs).round() as u32
}
