#![forbid(unsafe_code)]

//! Scroll intake: coalescing, frame gating, and offset accumulation.
//!
//! Hosts can deliver scroll input at a much higher rate than the chrome
//! needs to react. This module provides the three small pieces that turn a
//! flood of samples into at most one state-machine evaluation per frame:
//!
//! - [`ScrollCoalescer`] keeps only the most recent absolute offset sample.
//! - [`FrameGate`] ensures at most one frame callback is requested while
//!   samples accumulate.
//! - [`OffsetAccumulator`] folds relative wheel deltas into an absolute
//!   offset for hosts that cannot report one directly.
//!
//! # Design
//!
//! All three types use a "latest wins" strategy and hold O(1) state. None of
//! them read the clock; the caller decides when a frame happens.

/// Coalesces absolute scroll offset samples between frames.
///
/// # Thread Safety
///
/// `ScrollCoalescer` is not thread-safe. It should be used from a single
/// event processing thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollCoalescer {
    /// Pending offset sample (latest wins).
    pending: Option<f64>,

    /// Samples folded into `pending` since the last take.
    samples: u32,
}

impl ScrollCoalescer {
    /// Create a new coalescer with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an offset sample, replacing any pending one.
    pub fn push(&mut self, offset: f64) {
        self.pending = Some(offset);
        self.samples = self.samples.saturating_add(1);
    }

    /// Take the pending sample, leaving the coalescer empty.
    pub fn take(&mut self) -> Option<f64> {
        self.samples = 0;
        self.pending.take()
    }

    /// Check if a sample is pending.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of samples folded into the pending value since the last take.
    ///
    /// Returns 0 when nothing is pending.
    #[must_use]
    pub const fn sample_count(&self) -> u32 {
        self.samples
    }

    /// Discard any pending sample without processing it.
    ///
    /// Use this when pending input must not be evaluated, for example while
    /// scroll handling is suppressed by an open drawer.
    pub fn clear(&mut self) {
        self.pending = None;
        self.samples = 0;
    }
}

/// Gates state-machine evaluation to at most once per frame.
///
/// Mirrors the host idiom of scheduling a single animation-frame callback:
/// the first [`request`](FrameGate::request) after an idle period returns
/// `true` (the caller schedules a frame), further requests return `false`,
/// and [`take`](FrameGate::take) at frame delivery consumes the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameGate {
    armed: bool,
}

impl FrameGate {
    /// Create an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an evaluation frame.
    ///
    /// Returns `true` if this call armed the gate and the caller should
    /// schedule a frame callback; `false` if one is already scheduled.
    pub fn request(&mut self) -> bool {
        if self.armed {
            false
        } else {
            self.armed = true;
            true
        }
    }

    /// Consume the pending request at frame delivery.
    ///
    /// Returns `true` when a request was pending. The gate is idle afterward,
    /// so the next sample arms it again.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }

    /// Whether a frame request is outstanding.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Drop any outstanding request without running a frame.
    pub fn cancel(&mut self) {
        self.armed = false;
    }
}

/// Folds relative wheel deltas into an absolute scroll offset.
///
/// Offsets are clamped to `0.0..=max` (unbounded above when no maximum is
/// set). Negative offsets never escape: hosts report them transiently during
/// overscroll bounce, and the chrome treats the document top as the floor.
/// Non-finite inputs are ignored.
#[derive(Debug, Clone, Copy)]
pub struct OffsetAccumulator {
    offset: f64,
    max: Option<f64>,
}

impl Default for OffsetAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetAccumulator {
    /// Create an accumulator at offset zero with no upper bound.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0.0,
            max: None,
        }
    }

    /// Set the maximum scrollable offset (document height minus viewport).
    #[must_use]
    pub const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Apply a wheel delta and return the new offset.
    pub fn apply(&mut self, delta_y: f64) -> f64 {
        if delta_y.is_finite() {
            self.offset = self.clamp(self.offset + delta_y);
        }
        self.offset
    }

    /// Overwrite the offset with an absolute sample.
    pub fn set(&mut self, offset: f64) {
        if offset.is_finite() {
            self.offset = self.clamp(offset);
        }
    }

    /// Current absolute offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    fn clamp(&self, offset: f64) -> f64 {
        let floored = offset.max(0.0);
        match self.max {
            Some(max) => floored.min(max),
            None => floored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_coalescer_has_no_pending() {
        let coalescer = ScrollCoalescer::new();
        assert!(!coalescer.has_pending());
        assert_eq!(coalescer.sample_count(), 0);
    }

    #[test]
    fn latest_sample_wins() {
        let mut coalescer = ScrollCoalescer::new();
        coalescer.push(10.0);
        coalescer.push(25.0);
        coalescer.push(90.0);

        assert_eq!(coalescer.sample_count(), 3);
        assert_eq!(coalescer.take(), Some(90.0));
        assert_eq!(coalescer.sample_count(), 0);
    }

    #[test]
    fn take_leaves_coalescer_empty() {
        let mut coalescer = ScrollCoalescer::new();
        coalescer.push(42.0);

        assert_eq!(coalescer.take(), Some(42.0));
        assert_eq!(coalescer.take(), None);
        assert!(!coalescer.has_pending());
    }

    #[test]
    fn clear_discards_pending() {
        let mut coalescer = ScrollCoalescer::new();
        coalescer.push(5.0);
        coalescer.clear();

        assert!(!coalescer.has_pending());
        assert_eq!(coalescer.take(), None);
    }

    #[test]
    fn gate_arms_once_per_frame() {
        let mut gate = FrameGate::new();

        assert!(gate.request());
        assert!(!gate.request());
        assert!(!gate.request());
        assert!(gate.is_armed());
    }

    #[test]
    fn take_disarms_gate() {
        let mut gate = FrameGate::new();
        gate.request();

        assert!(gate.take());
        assert!(!gate.is_armed());
        assert!(!gate.take());
        assert!(gate.request());
    }

    #[test]
    fn cancel_drops_request() {
        let mut gate = FrameGate::new();
        gate.request();
        gate.cancel();

        assert!(!gate.take());
    }

    #[test]
    fn accumulator_clamps_at_top() {
        let mut acc = OffsetAccumulator::new();
        acc.apply(30.0);
        assert_eq!(acc.apply(-100.0), 0.0);
        assert_eq!(acc.offset(), 0.0);
    }

    #[test]
    fn accumulator_clamps_at_max() {
        let mut acc = OffsetAccumulator::new().with_max(500.0);
        assert_eq!(acc.apply(450.0), 450.0);
        assert_eq!(acc.apply(200.0), 500.0);
    }

    #[test]
    fn set_overwrites_and_clamps() {
        let mut acc = OffsetAccumulator::new().with_max(300.0);
        acc.set(120.0);
        assert_eq!(acc.offset(), 120.0);

        acc.set(-40.0);
        assert_eq!(acc.offset(), 0.0);

        acc.set(900.0);
        assert_eq!(acc.offset(), 300.0);
    }

    #[test]
    fn non_finite_inputs_are_ignored() {
        let mut acc = OffsetAccumulator::new();
        acc.apply(50.0);

        acc.apply(f64::NAN);
        assert_eq!(acc.offset(), 50.0);

        acc.set(f64::INFINITY);
        assert_eq!(acc.offset(), 50.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offset_stays_within_bounds(
                deltas in proptest::collection::vec(-5000.0f64..5000.0, 0..64),
                max in 0.0f64..10_000.0,
            ) {
                let mut acc = OffsetAccumulator::new().with_max(max);
                for delta in deltas {
                    let offset = acc.apply(delta);
                    prop_assert!(offset >= 0.0);
                    prop_assert!(offset <= max);
                }
            }

            #[test]
            fn coalescer_always_yields_last_sample(
                samples in proptest::collection::vec(0.0f64..10_000.0, 1..32),
            ) {
                let mut coalescer = ScrollCoalescer::new();
                for &sample in &samples {
                    coalescer.push(sample);
                }
                prop_assert_eq!(coalescer.take(), samples.last().copied());
            }
        }
    }
}
