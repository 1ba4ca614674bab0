use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use super::{SubscriptionId, TickCallback, TickMode, TickSource};

struct Entry {
    id: SubscriptionId,
    mode: TickMode,
    live: Cell<bool>,
    callback: RefCell<TickCallback>,
}

/// Single-threaded tick dispatcher.
///
/// The owner of the display loop calls [`TickLoop::dispatch`] once per
/// refresh. Subscribers whose mode runs in the loop's current mode are
/// invoked in attach order.
pub struct TickLoop {
    mode: Cell<TickMode>,
    next_id: Cell<u64>,
    entries: RefCell<Vec<Rc<Entry>>>,
}

thread_local! {
    static MAIN: Rc<TickLoop> = Rc::new(TickLoop::new());
}

impl TickLoop {
    pub fn new() -> Self {
        Self {
            mode: Cell::new(TickMode::Default),
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Returns the calling thread's main loop.
    ///
    /// This is the default context for trackers and the loop the `winit`
    /// runtime drives.
    pub fn main() -> Rc<TickLoop> {
        MAIN.with(Rc::clone)
    }

    /// Mode the loop is currently being serviced under.
    pub fn mode(&self) -> TickMode {
        self.mode.get()
    }

    pub fn set_mode(&self, mode: TickMode) {
        if self.mode.replace(mode) != mode {
            log::trace!("tick loop mode -> {mode:?}");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Delivers one tick to every subscriber that runs in the current mode.
    ///
    /// Returns how many callbacks ran. Subscribers may attach or detach from
    /// inside their callback; an entry detached mid-dispatch is skipped.
    pub fn dispatch(&self, now: Instant) -> usize {
        let active = self.mode.get();

        // Snapshot so callbacks can mutate the entry list.
        let due: Vec<Rc<Entry>> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.mode.runs_in(active))
            .cloned()
            .collect();

        let mut fired = 0;
        for entry in due {
            if !entry.live.get() {
                continue;
            }

            // A callback that re-enters `dispatch` does not tick itself twice.
            let Ok(mut callback) = entry.callback.try_borrow_mut() else {
                continue;
            };

            callback(now);
            fired += 1;
        }

        fired
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for TickLoop {
    fn attach(&self, mode: TickMode, callback: TickCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.entries.borrow_mut().push(Rc::new(Entry {
            id,
            mode,
            live: Cell::new(true),
            callback: RefCell::new(callback),
        }));

        log::trace!("tick subscription {} attached ({mode:?})", id.0);
        id
    }

    fn detach(&self, id: SubscriptionId) {
        let mut entries = self.entries.borrow_mut();
        if let Some(pos) = entries.iter().position(|e| e.id == id) {
            let entry = entries.remove(pos);
            entry.live.set(false);
            log::trace!("tick subscription {} detached", id.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick::Subscription;

    fn counter(ticks: &Rc<TickLoop>, mode: TickMode) -> (Rc<Cell<u32>>, SubscriptionId) {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = ticks.attach(mode, Box::new(move |_| h.set(h.get() + 1)));
        (hits, id)
    }

    // ── mode filtering ────────────────────────────────────────────────────

    #[test]
    fn default_subscribers_pause_in_tracking_mode() {
        let ticks = Rc::new(TickLoop::new());
        let (default_hits, _) = counter(&ticks, TickMode::Default);
        let (common_hits, _) = counter(&ticks, TickMode::Common);

        ticks.dispatch(Instant::now());
        ticks.set_mode(TickMode::Tracking);
        ticks.dispatch(Instant::now());

        assert_eq!(default_hits.get(), 1);
        assert_eq!(common_hits.get(), 2);
    }

    #[test]
    fn dispatch_reports_fired_count() {
        let ticks = Rc::new(TickLoop::new());
        counter(&ticks, TickMode::Default);
        counter(&ticks, TickMode::Tracking);
        counter(&ticks, TickMode::Common);

        assert_eq!(ticks.dispatch(Instant::now()), 2);
    }

    #[test]
    fn delivers_timestamp_in_attach_order() {
        let ticks = Rc::new(TickLoop::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b"] {
            let s = seen.clone();
            ticks.attach(TickMode::Common, Box::new(move |t| s.borrow_mut().push((tag, t))));
        }

        let now = Instant::now();
        ticks.dispatch(now);
        assert_eq!(*seen.borrow(), vec![("a", now), ("b", now)]);
    }

    // ── detach ────────────────────────────────────────────────────────────

    #[test]
    fn detach_unknown_id_is_ignored() {
        let ticks = Rc::new(TickLoop::new());
        let (_, id) = counter(&ticks, TickMode::Common);
        ticks.detach(id);
        ticks.detach(id);
        assert_eq!(ticks.subscriber_count(), 0);
    }

    #[test]
    fn detach_during_dispatch_skips_later_entry() {
        let ticks = Rc::new(TickLoop::new());
        let victim: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let t = ticks.clone();
        let v = victim.clone();
        ticks.attach(
            TickMode::Common,
            Box::new(move |_| {
                if let Some(id) = v.get() {
                    t.detach(id);
                }
            }),
        );
        let (victim_hits, victim_id) = counter(&ticks, TickMode::Common);
        victim.set(Some(victim_id));

        assert_eq!(ticks.dispatch(Instant::now()), 1);
        assert_eq!(victim_hits.get(), 0);
        assert_eq!(ticks.subscriber_count(), 1);
    }

    #[test]
    fn subscription_can_drop_itself_mid_tick() {
        let ticks = Rc::new(TickLoop::new());
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let s = slot.clone();
        let h = hits.clone();
        let sub = Subscription::attach(
            ticks.clone(),
            TickMode::Common,
            Box::new(move |_| {
                h.set(h.get() + 1);
                s.borrow_mut().take();
            }),
        );
        *slot.borrow_mut() = Some(sub);

        ticks.dispatch(Instant::now());
        ticks.dispatch(Instant::now());

        assert_eq!(hits.get(), 1);
        assert_eq!(ticks.subscriber_count(), 0);
    }

    #[test]
    fn main_loop_is_shared_per_thread() {
        assert!(Rc::ptr_eq(&TickLoop::main(), &TickLoop::main()));
    }
}
