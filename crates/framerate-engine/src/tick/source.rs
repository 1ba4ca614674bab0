use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use super::TickMode;

/// Callback invoked once per refresh with the frame timestamp.
pub type TickCallback = Box<dyn FnMut(Instant)>;

/// Opaque handle returned by [`TickSource::attach`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// A per-refresh tick producer.
///
/// Implementations are single-threaded; `attach` and `detach` take `&self`
/// so they can be called from inside a running callback.
pub trait TickSource {
    /// Registers `callback` to run once per refresh while the source is
    /// serviced under a mode that `mode` runs in.
    fn attach(&self, mode: TickMode, callback: TickCallback) -> SubscriptionId;

    /// Stops delivering ticks to `id`. Unknown ids are ignored.
    fn detach(&self, id: SubscriptionId);
}

/// Attachment to a tick source. Detaches when dropped.
pub struct Subscription {
    source: Rc<dyn TickSource>,
    id: SubscriptionId,
    mode: TickMode,
}

impl Subscription {
    pub fn attach(source: Rc<dyn TickSource>, mode: TickMode, callback: TickCallback) -> Self {
        let id = source.attach(mode, callback);
        Self { source, id, mode }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn mode(&self) -> TickMode {
        self.mode
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.source.detach(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick::TickLoop;
    use std::cell::Cell;

    #[test]
    fn drop_detaches() {
        let ticks = Rc::new(TickLoop::new());
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let sub = Subscription::attach(
            ticks.clone(),
            TickMode::Common,
            Box::new(move |_| h.set(h.get() + 1)),
        );
        assert_eq!(ticks.subscriber_count(), 1);

        ticks.dispatch(Instant::now());
        drop(sub);
        ticks.dispatch(Instant::now());

        assert_eq!(hits.get(), 1);
        assert_eq!(ticks.subscriber_count(), 0);
    }

    #[test]
    fn remembers_mode() {
        let ticks = Rc::new(TickLoop::new());
        let sub = Subscription::attach(ticks.clone(), TickMode::Tracking, Box::new(|_| {}));
        assert_eq!(sub.mode(), TickMode::Tracking);
        assert_ne!(sub.id(), ticks.attach(TickMode::Tracking, Box::new(|_| {})));
    }
}
