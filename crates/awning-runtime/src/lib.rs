#![forbid(unsafe_code)]

//! Host runtime for Awning navigation chrome.
//!
//! # Role in Awning
//! `awning-runtime` is the layer between a host's event sources and the
//! pure state machines in `awning-chrome`. It owns threads, channels, and
//! lifecycle; the chrome layer below it never does.
//!
//! # Primary responsibilities
//! - **Shell**: one controller lifecycle per page load, with reconciling
//!   hook registries (idempotent re-install) and explicit dispose.
//! - **Event pump**: synchronous dispatch for discrete events, latest-wins
//!   intake of frame ticks.
//! - **Frame ticker**: background thread delivering frame boundaries, with
//!   cooperative condvar stop and join-on-stop.
//! - **Snapshot cell**: lock-free publication of the latest
//!   [`ChromeSnapshot`](awning_chrome::ChromeSnapshot) for readers on
//!   other threads.
//!
//! # How it fits in the system
//! A host builds a [`Shell`] from a
//! [`ChromeConfig`](awning_chrome::ChromeConfig), registers effect and
//! command hooks, calls [`Shell::install`] on every page load, and routes
//! input through [`Shell::dispatch`]. Render threads read state through
//! [`SnapshotReader`] without touching the dispatch thread.

pub mod cell;
pub mod pump;
pub mod shell;
pub mod ticker;

pub use cell::{SnapshotCell, SnapshotReader};
pub use pump::EventPump;
pub use shell::{HookId, Shell, ShellError};
pub use ticker::{FrameTick, FrameTicker, StopSignal, TickerConfig};
