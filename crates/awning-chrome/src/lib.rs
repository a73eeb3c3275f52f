#![forbid(unsafe_code)]

//! Navigation chrome state machines for Awning.
//!
//! This crate models the behavior of retractable navigation chrome: a bar
//! that hides on downward scroll and reveals on upward scroll, a drawer
//! menu with ordered open/close side effects, and a focus trap that keeps
//! keyboard navigation inside the open drawer.
//!
//! Everything here is headless. State machines consume canonical
//! [`awning_core::event::InputEvent`]s plus host-resolved hit information
//! and emit [`projection::Effect`]s for the host to apply. No host tree is
//! touched directly, which keeps every transition deterministic and
//! testable without a browser or terminal attached.

pub mod controller;
pub mod drawer;
pub mod focus;
pub mod intent;
pub mod label;
pub mod motion;
pub mod parts;
pub mod projection;
pub mod visibility;

pub use controller::{ChromeCommand, ChromeConfig, NavChrome, Outcome};
pub use drawer::{CloseReason, Drawer, DrawerConfig, DrawerPhase};
pub use focus::{FocusMove, FocusRing, FocusTarget, FocusTrap};
pub use parts::{PanelItem, PanelItemKind, PartId, Parts};
pub use projection::{ChromeSnapshot, Effect, StyleClass};
pub use visibility::{BarVisibility, ScrollVisibility, VisibilityConfig};
