use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use framerate_engine::core::{App, AppControl, FrameCtx};
use framerate_engine::logging::{init_logging, LoggingConfig};
use framerate_engine::window::{Runtime, RuntimeConfig};
use framerate_engine::{
    FrameRateObserver, FrameRateTracker, TickLoop, TickMode, TrackerConfig, TrackerId,
};

/// Observes the tracker and keeps the latest report for the window title.
#[derive(Default)]
struct Readout {
    fps: Cell<Option<u32>>,
}

impl FrameRateObserver for Readout {
    fn on_frame_rate_update(&self, tracker: TrackerId, fps: u32) {
        log::info!("{tracker}: {fps} fps");
        self.fps.set(Some(fps));
    }
}

struct Studio {
    tracker: FrameRateTracker,
    readout: Rc<Readout>,
    mode: TickMode,
    shown: Option<(Option<u32>, TickMode, TickMode, bool)>,
}

impl Studio {
    fn new() -> Self {
        let readout = Rc::new(Readout::default());

        // Report twice a second so mode switches show up quickly.
        let config = TrackerConfig::default()
            .with_interval(Duration::from_millis(500))
            .with_mode(TickMode::Default);
        let mut tracker = FrameRateTracker::with_config(config);
        tracker.set_observer(&readout);
        tracker.start_default();

        Self {
            tracker,
            readout,
            mode: config.mode,
            shown: None,
        }
    }

    fn toggle_tracking(&mut self) {
        if self.tracker.is_tracking() {
            self.tracker.stop();
            self.readout.fps.set(None);
        } else {
            self.tracker.start(TickLoop::main(), self.mode);
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            TickMode::Common => TickMode::Default,
            _ => TickMode::Common,
        };
        log::info!("subscription mode -> {:?}", self.mode);

        if self.tracker.is_tracking() {
            self.tracker.start(TickLoop::main(), self.mode);
        }
    }
}

impl App for Studio {
    fn on_window_event(&mut self, _window: &Window, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed || event.repeat {
            return AppControl::Continue;
        }

        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => return AppControl::Exit,
            PhysicalKey::Code(KeyCode::Space) => self.toggle_tracking(),
            PhysicalKey::Code(KeyCode::KeyM) => self.toggle_mode(),
            _ => {}
        }

        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let state = (
            self.readout.fps.get(),
            self.mode,
            ctx.mode(),
            self.tracker.is_tracking(),
        );
        if self.shown == Some(state) {
            return AppControl::Continue;
        }

        let (fps, mode, loop_mode, tracking) = state;
        let rate = match (tracking, fps) {
            (false, _) => "paused".to_string(),
            (true, None) => "measuring..".to_string(),
            (true, Some(fps)) => format!("{fps} fps"),
        };
        ctx.set_title(&format!(
            "framerate studio · {rate} · {mode:?} subscription · loop in {loop_mode:?}"
        ));

        self.shown = Some(state);
        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("space: start/stop  ·  m: toggle Default/Common mode  ·  esc: quit");
    log::info!("hold a mouse button to enter the tracking mode");

    Runtime::run(
        RuntimeConfig {
            title: "framerate studio".to_string(),
            ..RuntimeConfig::default()
        },
        Studio::new(),
    )
}
