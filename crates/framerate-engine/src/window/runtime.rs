use anyhow::{Context, Result};
use std::rc::Rc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::tick::{TickLoop, TickMode};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "framerate".to_string(),
            initial_size: LogicalSize::new(640.0, 360.0),
        }
    }
}

/// Derives the tick loop mode from pointer button state.
///
/// While any button is held the loop runs in [`TickMode::Tracking`], so only
/// `Tracking` and `Common` subscribers keep ticking during a drag.
#[derive(Debug, Default)]
pub struct GestureMode {
    held: u32,
}

impl GestureMode {
    pub fn button(&mut self, state: ElementState) -> TickMode {
        match state {
            ElementState::Pressed => self.held = self.held.saturating_add(1),
            ElementState::Released => self.held = self.held.saturating_sub(1),
        }
        self.mode()
    }

    /// Focus loss drops any gesture in progress.
    pub fn cancel(&mut self) -> TickMode {
        self.held = 0;
        self.mode()
    }

    pub fn mode(&self) -> TickMode {
        if self.held > 0 {
            TickMode::Tracking
        } else {
            TickMode::Default
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes or the app exits.
    ///
    /// Each `RedrawRequested` dispatches the calling thread's main
    /// [`TickLoop`] before `App::on_frame` runs.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, TickLoop::main(), app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct AppState<A> {
    config: RuntimeConfig,
    app: A,
    ticks: Rc<TickLoop>,
    gesture: GestureMode,

    window: Option<Window>,
    frame_index: u64,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, ticks: Rc<TickLoop>, app: A) -> Self {
        Self {
            config,
            app,
            ticks,
            gesture: GestureMode::default(),
            window: None,
            frame_index: 0,
            exit_requested: false,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        log::debug!("window {:?} created", window.id());
        self.window = Some(window);
        Ok(())
    }

    fn set_mode(&self, mode: TickMode) {
        self.ticks.set_mode(mode);
    }

    fn redraw(&mut self) -> AppControl {
        let Some(window) = self.window.as_ref() else {
            return AppControl::Continue;
        };

        let now = Instant::now();
        self.ticks.dispatch(now);

        let mut ctx = FrameCtx {
            window,
            ticks: &self.ticks,
            now,
            frame_index: self.frame_index,
        };
        let control = self.app.on_frame(&mut ctx);

        self.frame_index = self.frame_index.wrapping_add(1);
        window.pre_present_notify();
        control
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one tick per presented frame.
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(window) = self.window.as_ref().filter(|w| w.id() == window_id) else {
            return;
        };

        if self.app.on_window_event(window, &event) == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.exit_requested = true;
            }

            WindowEvent::MouseInput { state, .. } => {
                let mode = self.gesture.button(state);
                self.set_mode(mode);
            }

            WindowEvent::Focused(false) => {
                let mode = self.gesture.cancel();
                self.set_mode(mode);
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.exit_requested = true;
                }
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
