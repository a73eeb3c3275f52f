#![forbid(unsafe_code)]

//! Structured logging support.
//!
//! With the `tracing` feature enabled this module re-exports the tracing
//! macros so the rest of the workspace logs through one place. The
//! `tracing-json` feature adds [`init_json`] for hosts that collect logs as
//! line-delimited JSON.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Falls back to the `info` level when `RUST_LOG` is unset or invalid.
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one keeps receiving events.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
