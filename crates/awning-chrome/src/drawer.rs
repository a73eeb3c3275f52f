#![forbid(unsafe_code)]

//! Drawer menu state machine.
//!
//! The drawer is a strict two-phase machine: `Closed` or `Open`. Every
//! transition is explicit and carries a [`CloseReason`] so hosts and logs
//! can tell a backdrop tap from an Escape press from a viewport widening.
//!
//! Two deadlines live here rather than in the host:
//!
//! - Link activation closes the drawer after a short delay, so the pressed
//!   item stays visible while navigation starts.
//! - Viewport resizes are debounced. Only after the size settles does the
//!   drawer decide whether the viewport widened past the breakpoint, in
//!   which case an open drawer auto-closes.
//!
//! Both deadlines take explicit `now` instants, which keeps every path
//! through this module deterministic under test.

use std::time::Duration;

use awning_core::timing::Timeout;
use awning_core::viewport::{Breakpoint, ViewportSize};
use web_time::Instant;

// ---------------------------------------------------------------------------
// Phases and reasons
// ---------------------------------------------------------------------------

/// Drawer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawerPhase {
    /// Drawer is closed and its items are out of the tab order.
    #[default]
    Closed,
    /// Drawer is open, page scroll is locked, focus is trapped inside.
    Open,
}

impl DrawerPhase {
    /// Whether the drawer is open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, DrawerPhase::Open)
    }
}

/// Why the drawer closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum CloseReason {
    /// Toggle pressed while open.
    Toggle,
    /// Backdrop tapped.
    Backdrop,
    /// Escape pressed.
    Escape,
    /// A link item was activated and the deferred close fired.
    Link,
    /// The viewport settled at or past the wide breakpoint.
    BreakpointCrossed,
    /// A fresh page install reset the chrome.
    PageLoad,
}

/// A completed drawer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerAction {
    /// Drawer opened.
    Opened,
    /// Drawer closed for the given reason.
    Closed(CloseReason),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Drawer behavior tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawerConfig {
    close_on_backdrop: bool,
    close_on_escape: bool,
    link_close_delay: Duration,
    resize_debounce: Duration,
}

impl DrawerConfig {
    /// Create a config with default behavior.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            close_on_backdrop: true,
            close_on_escape: true,
            link_close_delay: Duration::from_millis(100),
            resize_debounce: Duration::from_millis(100),
        }
    }

    /// Whether tapping the backdrop closes the drawer (default: true).
    #[must_use]
    pub const fn close_on_backdrop(mut self, enabled: bool) -> Self {
        self.close_on_backdrop = enabled;
        self
    }

    /// Whether Escape closes the drawer (default: true).
    #[must_use]
    pub const fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    /// Delay between link activation and the drawer close (default: 100ms).
    #[must_use]
    pub const fn link_close_delay(mut self, delay: Duration) -> Self {
        self.link_close_delay = delay;
        self
    }

    /// Quiet period a resize burst must hold before the breakpoint is
    /// re-evaluated (default: 100ms).
    #[must_use]
    pub const fn resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// The drawer state machine.
#[derive(Debug, Clone)]
pub struct Drawer {
    phase: DrawerPhase,
    config: DrawerConfig,
    link_close: Timeout,
    resize_settle: Timeout,
    settled_viewport: Option<ViewportSize>,
}

impl Drawer {
    /// Create a closed drawer.
    #[must_use]
    pub fn new(config: DrawerConfig) -> Self {
        Self {
            phase: DrawerPhase::Closed,
            config,
            link_close: Timeout::new(config.link_close_delay),
            resize_settle: Timeout::new(config.resize_debounce),
            settled_viewport: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> DrawerPhase {
        self.phase
    }

    /// Whether the drawer is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    /// Behavior tuning in effect.
    #[must_use]
    pub const fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Whether a deferred link close is armed.
    #[must_use]
    pub const fn link_close_pending(&self) -> bool {
        self.link_close.is_pending()
    }

    /// Whether any deadline is armed and needs polling.
    #[must_use]
    pub const fn timers_pending(&self) -> bool {
        self.link_close.is_pending() || self.resize_settle.is_pending()
    }

    /// Open the drawer. No-op while already open.
    pub fn open(&mut self) -> Option<DrawerAction> {
        if self.phase.is_open() {
            return None;
        }
        self.link_close.clear();
        self.set_phase(DrawerPhase::Open, "open");
        Some(DrawerAction::Opened)
    }

    /// Close the drawer. No-op while already closed.
    ///
    /// Any armed link close is cancelled; an explicit close supersedes the
    /// deferred one.
    pub fn close(&mut self, reason: CloseReason) -> Option<DrawerAction> {
        if !self.phase.is_open() {
            return None;
        }
        self.link_close.clear();
        self.set_phase(DrawerPhase::Closed, reason_label(reason));
        Some(DrawerAction::Closed(reason))
    }

    /// Flip the drawer phase, as the toggle button does.
    pub fn toggle(&mut self) -> Option<DrawerAction> {
        if self.phase.is_open() {
            self.close(CloseReason::Toggle)
        } else {
            self.open()
        }
    }

    /// Close for a user-initiated reason, honoring the config.
    ///
    /// Escape and backdrop dismissals can be disabled; every other reason
    /// always closes.
    pub fn dismiss(&mut self, reason: CloseReason) -> Option<DrawerAction> {
        let allowed = match reason {
            CloseReason::Escape => self.config.close_on_escape,
            CloseReason::Backdrop => self.config.close_on_backdrop,
            _ => true,
        };
        if allowed { self.close(reason) } else { None }
    }

    /// Arm the deferred close after a link activation.
    ///
    /// No-op while closed. Re-activation before the deadline re-arms it.
    pub fn schedule_link_close(&mut self, now: Instant) {
        if self.phase.is_open() {
            self.link_close.set(now);
        }
    }

    /// Record a viewport size and restart the settle debounce.
    ///
    /// The breakpoint decision happens in [`Drawer::poll`] once the burst
    /// goes quiet, against the last size seen here.
    pub fn observe_resize(&mut self, size: ViewportSize, now: Instant) {
        self.settled_viewport = Some(size);
        self.resize_settle.set(now);
    }

    /// Fire any due deadlines.
    ///
    /// Called once per frame by the controller. At most one transition is
    /// returned per call; a deadline that loses the race stays consumed or
    /// resolves harmlessly on the next poll.
    pub fn poll(&mut self, now: Instant, breakpoint: &Breakpoint) -> Option<DrawerAction> {
        if self.link_close.fire(now) {
            if let Some(action) = self.close(CloseReason::Link) {
                return Some(action);
            }
        }
        if self.resize_settle.fire(now) {
            if let Some(size) = self.settled_viewport.take() {
                if self.phase.is_open() && breakpoint.classify(size).is_wide() {
                    return self.close(CloseReason::BreakpointCrossed);
                }
            }
        }
        None
    }

    /// Reset to the fresh-page state: closed, no deadlines armed.
    ///
    /// Returns the close transition if the drawer was open, so hosts can
    /// still run the ordered close effects during a page swap.
    pub fn reset(&mut self) -> Option<DrawerAction> {
        let action = self.close(CloseReason::PageLoad);
        self.link_close.clear();
        self.resize_settle.clear();
        self.settled_viewport = None;
        action
    }

    fn set_phase(&mut self, next: DrawerPhase, _reason: &str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "drawer.phase",
            reason = _reason,
            from = ?self.phase,
            to = ?next
        );
        self.phase = next;
    }
}

fn reason_label(reason: CloseReason) -> &'static str {
    match reason {
        CloseReason::Toggle => "toggle",
        CloseReason::Backdrop => "backdrop",
        CloseReason::Escape => "escape",
        CloseReason::Link => "link",
        CloseReason::BreakpointCrossed => "breakpoint",
        CloseReason::PageLoad => "page_load",
    }
}
