use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::tick::{Subscription, TickLoop, TickMode, TickSource};

use super::{FrameRateObserver, SampleWindow, TrackerConfig};

/// Process-unique tracker identity passed along with every report.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TrackerId(u64);

impl TrackerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tracker#{}", self.0)
    }
}

/// State reachable from the tick callback.
struct Shared {
    id: TrackerId,
    interval: Cell<Duration>,
    window: RefCell<SampleWindow>,
    observer: RefCell<Option<Weak<dyn FrameRateObserver>>>,
    last_fps: Cell<Option<u32>>,
}

impl Shared {
    fn handle_tick(&self, now: Instant) {
        let report = self.window.borrow_mut().record(now, self.interval.get());
        let Some(fps) = report else {
            return;
        };

        self.last_fps.set(Some(fps));
        log::trace!("{}: {fps} fps", self.id);

        // Upgrade and release the borrow before calling out.
        let observer = self.observer.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(observer) = observer {
            observer.on_frame_rate_update(self.id, fps);
        }
    }
}

/// Measures the rate at which a tick source fires.
///
/// Created inactive. [`start`](Self::start) attaches to a tick source,
/// [`stop`](Self::stop) or dropping the tracker detaches it. Every
/// `notification_interval` worth of ticks the averaged rate is reported to the
/// observer, if one is set and still alive.
///
/// The tracker is single-threaded (`!Send`): drive it from the thread that
/// owns its tick source.
pub struct FrameRateTracker {
    shared: Rc<Shared>,
    config: TrackerConfig,
    subscription: Option<Subscription>,
}

impl FrameRateTracker {
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                id: TrackerId::next(),
                interval: Cell::new(config.notification_interval),
                window: RefCell::new(SampleWindow::new()),
                observer: RefCell::new(None),
                last_fps: Cell::new(None),
            }),
            config,
            subscription: None,
        }
    }

    pub fn id(&self) -> TrackerId {
        self.shared.id
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Attaches to `source` under `mode`.
    ///
    /// Any existing subscription is torn down first and the partial window is
    /// discarded, so the next tick opens a fresh window.
    pub fn start(&mut self, source: Rc<dyn TickSource>, mode: TickMode) {
        self.stop();
        self.shared.window.borrow_mut().reset();

        let weak = Rc::downgrade(&self.shared);
        let callback = Box::new(move |now: Instant| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_tick(now);
            }
        });

        self.subscription = Some(Subscription::attach(source, mode, callback));
        log::debug!("{}: tracking started ({mode:?})", self.shared.id);
    }

    /// Attaches to this thread's main [`TickLoop`] under the configured mode.
    pub fn start_default(&mut self) {
        self.start(TickLoop::main(), self.config.mode);
    }

    /// Detaches from the tick source. No-op when not tracking.
    pub fn stop(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };

        drop(subscription);
        self.shared.window.borrow_mut().reset();
        self.shared.last_fps.set(None);
        log::debug!("{}: tracking stopped", self.shared.id);
    }

    pub fn is_tracking(&self) -> bool {
        self.subscription.is_some()
    }

    /// Mode of the active subscription, if tracking.
    pub fn subscription_mode(&self) -> Option<TickMode> {
        self.subscription.as_ref().map(Subscription::mode)
    }

    // ── sampling ──────────────────────────────────────────────────────────

    /// Feeds one refresh tick. Called by the tick source while tracking;
    /// exposed so callers with their own frame loop can drive it directly.
    ///
    /// Ignored when not tracking: a stopped tracker never accumulates or
    /// reports.
    pub fn handle_tick(&self, now: Instant) {
        if !self.is_tracking() {
            return;
        }
        self.shared.handle_tick(now);
    }

    pub fn notification_interval(&self) -> Duration {
        self.shared.interval.get()
    }

    /// Takes effect at the next window boundary check.
    pub fn set_notification_interval(&mut self, interval: Duration) {
        self.shared.interval.set(interval);
        self.config.notification_interval = interval;
    }

    /// Ticks counted in the current window.
    pub fn frame_count(&self) -> u32 {
        self.shared.window.borrow().frames()
    }

    /// Timestamp of the tick that opened the current window.
    pub fn window_start(&self) -> Option<Instant> {
        self.shared.window.borrow().started_at()
    }

    /// Most recent reported rate. Cleared by [`stop`](Self::stop).
    pub fn last_fps(&self) -> Option<u32> {
        self.shared.last_fps.get()
    }

    // ── observer ──────────────────────────────────────────────────────────

    /// Sets the observer. Only a weak reference is kept.
    pub fn set_observer<O>(&mut self, observer: &Rc<O>)
    where
        O: FrameRateObserver + 'static,
    {
        let weak = Rc::downgrade(observer);
        self.set_observer_weak(weak);
    }

    /// Sets an already type-erased observer, e.g. one held as
    /// `Rc<dyn FrameRateObserver>`.
    pub fn set_observer_weak(&mut self, observer: Weak<dyn FrameRateObserver>) {
        *self.shared.observer.borrow_mut() = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.shared.observer.borrow_mut().take();
    }

    /// Returns true if an observer is set and still alive.
    pub fn has_observer(&self) -> bool {
        self.shared
            .observer
            .borrow()
            .as_ref()
            .is_some_and(|w| w.strong_count() > 0)
    }
}

impl Default for FrameRateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameRateTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRateTracker")
            .field("id", &self.shared.id)
            .field("interval", &self.shared.interval.get())
            .field("subscription", &self.subscription)
            .field("frames", &self.frame_count())
            .finish_non_exhaustive()
    }
}

impl Drop for FrameRateTracker {
    fn drop(&mut self) {
        self.stop();
    }
}
