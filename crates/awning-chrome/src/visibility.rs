#![forbid(unsafe_code)]

//! Scroll-driven bar visibility.
//!
//! The bar shows or hides from scroll direction: scrolling down past the
//! hysteresis band hides it, scrolling up reveals it, and near the top of
//! the page it is always shown regardless of direction.
//!
//! # Design
//!
//! [`ScrollVisibility`] is a two-state machine evaluated once per frame
//! with the latest coalesced scroll offset. Rules, in order:
//!
//! 1. Strictly below `top_reveal` the bar is visible. Direction is
//!    ignored; the boundary offset itself is already outside the zone.
//! 2. Movement of at most `hysteresis` since the previous evaluation
//!    keeps the current state. This absorbs sub-pixel jitter and touch
//!    tremor without flapping.
//! 3. Beyond the band, downward movement hides and upward movement shows.
//!
//! The reference offset updates on every evaluation, including ones that
//! land inside the band, so a slow sustained drift never accumulates into
//! a surprise flip.
//!
//! # Invariants
//!
//! - Observing the same offset twice in a row never transitions.
//! - The bar is never hidden while the offset is inside the top zone.
//! - Non-finite offsets are discarded without touching any state.

/// Whether the bar is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum BarVisibility {
    /// Bar is on screen.
    #[default]
    Visible,
    /// Bar is retracted off the top edge.
    Hidden,
}

impl BarVisibility {
    /// Whether the bar is hidden.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, BarVisibility::Hidden)
    }
}

/// Tuning for the visibility machine.
///
/// Distances are in host scroll units (CSS pixels for DOM hosts, rows for
/// terminal hosts).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityConfig {
    top_reveal: f64,
    hysteresis: f64,
}

impl VisibilityConfig {
    /// Create a config with default tuning.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top_reveal: 50.0,
            hysteresis: 5.0,
        }
    }

    /// Offset below which the bar always shows (default: 50.0). The
    /// boundary offset itself falls to the hysteresis rules.
    #[must_use]
    pub const fn top_reveal(mut self, offset: f64) -> Self {
        self.top_reveal = offset;
        self
    }

    /// Movement that must be exceeded before the state flips (default: 5.0).
    #[must_use]
    pub const fn hysteresis(mut self, distance: f64) -> Self {
        self.hysteresis = distance;
        self
    }
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The scroll-direction visibility machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollVisibility {
    state: BarVisibility,
    last_offset: f64,
}

impl ScrollVisibility {
    /// Start visible at the top of the page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: BarVisibility::Visible,
            last_offset: 0.0,
        }
    }

    /// Evaluate one coalesced scroll offset.
    ///
    /// Returns the new state when this observation changed it, `None`
    /// otherwise. The reference offset advances on every finite
    /// observation regardless of outcome.
    pub fn observe(&mut self, offset: f64, config: &VisibilityConfig) -> Option<BarVisibility> {
        if !offset.is_finite() {
            return None;
        }

        let next = if offset < config.top_reveal {
            BarVisibility::Visible
        } else {
            let delta = offset - self.last_offset;
            if delta.abs() <= config.hysteresis {
                self.state
            } else if delta > 0.0 {
                BarVisibility::Hidden
            } else {
                BarVisibility::Visible
            }
        };
        self.last_offset = offset;

        if next == self.state {
            return None;
        }
        #[cfg(feature = "tracing")]
        Self::log_transition(self.state, next, offset);
        self.state = next;
        Some(next)
    }

    /// Forget scroll history and show the bar, as on a fresh page.
    pub fn reset(&mut self) {
        self.state = BarVisibility::Visible;
        self.last_offset = 0.0;
    }

    /// Show the bar without touching scroll history.
    ///
    /// Used when the drawer opens over a hidden bar: the bar must be on
    /// screen to anchor the drawer, but the next scroll evaluation still
    /// compares against the real previous offset.
    pub fn show(&mut self) {
        self.state = BarVisibility::Visible;
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BarVisibility {
        self.state
    }

    /// Offset of the most recent finite observation.
    #[must_use]
    pub const fn last_offset(&self) -> f64 {
        self.last_offset
    }

    #[cfg(feature = "tracing")]
    fn log_transition(from: BarVisibility, to: BarVisibility, offset: f64) {
        tracing::debug!(
            message = "bar.visibility",
            from = ?from,
            to = ?to,
            offset
        );
    }
}

impl Default for ScrollVisibility {
    fn default() -> Self {
        Self::new()
    }
}
