#![forbid(unsafe_code)]

//! Core: canonical events, viewport classification, timers, and scroll intake.
//!
//! # Role in Awning
//! `awning-core` is the input layer. It owns the normalized event types that
//! the chrome state machines consume, plus the small time-based primitives
//! (timeouts, frame gating, scroll coalescing) those machines are built on.
//!
//! # Primary responsibilities
//! - **InputEvent**: canonical input events (keys, pointers, wheel, scroll,
//!   resize, page load).
//! - **Viewport**: size classification against a configurable breakpoint.
//! - **Timing**: deadline timers polled against an injected clock.
//! - **Scroll intake**: latest-wins sample coalescing and per-frame gating.
//!
//! # How it fits in the system
//! The chrome layer (`awning-chrome`) consumes `awning_core` events and
//! produces projected chrome state. The runtime (`awning-runtime`) pumps host
//! events through both. Nothing in this crate depends on a render target, so
//! the same event stream drives a DOM host, a terminal host, or a test.

pub mod event;
pub mod logging;
pub mod scroll;
pub mod timing;
pub mod viewport;

#[cfg(feature = "test-helpers")]
pub mod testing;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
