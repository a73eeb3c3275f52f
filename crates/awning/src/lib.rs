#![forbid(unsafe_code)]

//! Awning public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! A minimal host wires up like this: build a
//! [`ChromeConfig`], wrap it in a [`Shell`], register hooks that mirror
//! [`Effect`]s onto the host tree, and call [`Shell::install`] on every
//! page load.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use awning_core::event::{
    InputEvent, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerEventKind,
};
pub use awning_core::scroll::{FrameGate, OffsetAccumulator, ScrollCoalescer};
pub use awning_core::timing::Timeout;
pub use awning_core::viewport::{Breakpoint, ViewportClass, ViewportSize};

// --- Chrome re-exports -----------------------------------------------------

pub use awning_chrome::label::ToggleLabels;
pub use awning_chrome::{
    BarVisibility, ChromeCommand, ChromeConfig, ChromeSnapshot, CloseReason, DrawerConfig,
    DrawerPhase, Effect, FocusTarget, NavChrome, Outcome, PanelItem, PanelItemKind, PartId, Parts,
    StyleClass, VisibilityConfig,
};

// --- Runtime re-exports ----------------------------------------------------

pub use awning_runtime::{Shell, ShellError, SnapshotReader, TickerConfig};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for awning apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure in host plumbing.
    Io(std::io::Error),
    /// Runtime shell error.
    Shell(ShellError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Shell(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Shell(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ShellError> for Error {
    fn from(err: ShellError) -> Self {
        Self::Shell(err)
    }
}

/// Standard result type for awning APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BarVisibility, Breakpoint, ChromeCommand, ChromeConfig, ChromeSnapshot, DrawerPhase,
        Effect, Error, InputEvent, KeyCode, Modifiers, PanelItem, PartId, Result, Shell,
        StyleClass, TickerConfig, ToggleLabels, ViewportSize,
    };

    pub use crate::{chrome, core, runtime};
}

pub use awning_chrome as chrome;
pub use awning_core as core;
pub use awning_runtime as runtime;
