#![forbid(unsafe_code)]

//! Optional slide motion for the bar and the drawer panel.
//!
//! Motion is strictly presentational. State machines commit their
//! transitions synchronously and hosts apply attribute effects
//! immediately; this module only describes how far along a slide is so a
//! host that animates in-process (a terminal embedding, a canvas shell)
//! can draw the in-between frames. Hosts with their own transition system
//! leave motion disabled, which is the default.
//!
//! The machine runs `Closed -> Opening -> Open -> Closing -> Closed`.
//! Reversing mid-flight inverts the progress, so a drawer that is 30%
//! open closes from exactly there instead of snapping.

use std::time::Duration;

// ============================================================================
// Configuration
// ============================================================================

/// Easing curve applied to slide progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, gentle landing.
    #[default]
    EaseOut,
    /// Gentle start, fast landing.
    EaseIn,
    /// Gentle at both ends.
    EaseInOut,
}

impl Easing {
    /// Apply the curve to a progress value in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseIn => t * t * t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Slide motion tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionConfig {
    enabled: bool,
    duration: Duration,
    easing: Easing,
}

impl MotionConfig {
    /// Create a config with motion disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: false,
            duration: Duration::from_millis(200),
            easing: Easing::EaseOut,
        }
    }

    /// Enable or disable motion (default: disabled).
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Slide duration (default: 200ms).
    #[must_use]
    pub const fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Easing curve (default: ease-out).
    #[must_use]
    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Config honoring a reduced-motion preference.
    ///
    /// Returns `self` unchanged when the preference is off, and a disabled
    /// config when it is on. Transitions then complete instantly.
    #[must_use]
    pub const fn effective(self, reduced_motion: bool) -> Self {
        if reduced_motion {
            Self {
                enabled: false,
                duration: Duration::ZERO,
                easing: self.easing,
            }
        } else {
            self
        }
    }

    /// Whether motion is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Slide machine
// ============================================================================

/// Where a slide is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlidePhase {
    /// Fully retracted.
    #[default]
    Closed,
    /// Sliding in.
    Opening,
    /// Fully presented.
    Open,
    /// Sliding out.
    Closing,
}

/// A single slide animation, used for both the bar reveal and the drawer
/// panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideMotion {
    phase: SlidePhase,
    progress: f32,
    config: MotionConfig,
}

impl SlideMotion {
    /// Create a retracted slide.
    #[must_use]
    pub const fn new(config: MotionConfig) -> Self {
        Self {
            phase: SlidePhase::Closed,
            progress: 0.0,
            config,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SlidePhase {
        self.phase
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.phase, SlidePhase::Opening | SlidePhase::Closing)
    }

    /// Begin presenting.
    ///
    /// With motion disabled this jumps straight to `Open`. Reversing a
    /// slide that is mid-close continues from its current position.
    pub fn slide_in(&mut self) {
        if !self.config.enabled || self.config.duration.is_zero() {
            self.phase = SlidePhase::Open;
            self.progress = 1.0;
            return;
        }
        match self.phase {
            SlidePhase::Closed => {
                self.phase = SlidePhase::Opening;
                self.progress = 0.0;
            }
            SlidePhase::Closing => {
                self.phase = SlidePhase::Opening;
                self.progress = 1.0 - self.progress;
            }
            SlidePhase::Opening | SlidePhase::Open => {}
        }
    }

    /// Begin retracting. The mirror of [`SlideMotion::slide_in`].
    pub fn slide_out(&mut self) {
        if !self.config.enabled || self.config.duration.is_zero() {
            self.phase = SlidePhase::Closed;
            self.progress = 0.0;
            return;
        }
        match self.phase {
            SlidePhase::Open => {
                self.phase = SlidePhase::Closing;
                self.progress = 0.0;
            }
            SlidePhase::Opening => {
                self.phase = SlidePhase::Closing;
                self.progress = 1.0 - self.progress;
            }
            SlidePhase::Closing | SlidePhase::Closed => {}
        }
    }

    /// Advance the slide by a frame delta.
    ///
    /// Returns `true` when the slide reached a steady phase this tick.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }
        let duration = self.config.duration;
        if duration.is_zero() {
            self.progress = 1.0;
        } else {
            self.progress += delta.as_secs_f32() / duration.as_secs_f32();
        }
        if self.progress < 1.0 {
            return false;
        }
        self.progress = 1.0;
        self.phase = match self.phase {
            SlidePhase::Opening => SlidePhase::Open,
            SlidePhase::Closing => SlidePhase::Closed,
            steady => steady,
        };
        if self.phase == SlidePhase::Closed {
            self.progress = 0.0;
        }
        true
    }

    /// How much of the element is presented, eased, in `[0, 1]`.
    ///
    /// `0.0` is fully retracted, `1.0` fully presented. Hosts map this to
    /// a translate offset.
    #[must_use]
    pub fn presented(&self) -> f32 {
        match self.phase {
            SlidePhase::Closed => 0.0,
            SlidePhase::Open => 1.0,
            SlidePhase::Opening => self.config.easing.apply(self.progress),
            SlidePhase::Closing => 1.0 - self.config.easing.apply(self.progress),
        }
    }

    /// Jump to `Open` without animating.
    pub fn force_open(&mut self) {
        self.phase = SlidePhase::Open;
        self.progress = 1.0;
    }

    /// Jump to `Closed` without animating.
    pub fn force_closed(&mut self) {
        self.phase = SlidePhase::Closed;
        self.progress = 0.0;
    }
}
