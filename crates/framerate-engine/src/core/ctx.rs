use std::rc::Rc;
use std::time::Instant;

use winit::window::Window;

use crate::tick::{TickLoop, TickMode};

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: &'a Window,

    /// Loop that was just dispatched for this frame.
    pub ticks: &'a Rc<TickLoop>,

    /// Timestamp delivered to tick subscribers this frame.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameCtx<'_> {
    /// Mode the tick loop was serviced under this frame.
    pub fn mode(&self) -> TickMode {
        self.ticks.mode()
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}
