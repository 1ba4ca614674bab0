//! Tick subsystem.
//!
//! A tick source calls its subscribers once per display refresh with a
//! monotonic timestamp. Subscriptions are made under a [`TickMode`] so callers
//! can choose whether they keep receiving ticks during interactive gestures.
//!
//! Intended usage:
//! - the runtime owns a [`TickLoop`] (usually [`TickLoop::main`]) and calls
//!   `dispatch` once per presented frame
//! - consumers hold a [`Subscription`], which detaches when dropped

mod mode;
mod source;
mod tick_loop;

pub use mode::TickMode;
pub use source::{Subscription, SubscriptionId, TickCallback, TickSource};
pub use tick_loop::TickLoop;
