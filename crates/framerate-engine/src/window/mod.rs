//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and turns redraws into ticks on the
//! main [`TickLoop`](crate::tick::TickLoop).

mod runtime;

pub use runtime::{GestureMode, Runtime, RuntimeConfig};
