//! Core runtime-facing contracts.
//!
//! Defines the interface between the `winit` runtime and the application
//! driving it, plus the per-frame context handed to the application.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
