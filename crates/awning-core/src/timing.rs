#![forbid(unsafe_code)]

//! Deadline timers polled against an injected clock.
//!
//! The chrome never sleeps and never spawns timers of its own. Debounced
//! resize handling and the deferred close after a link activation are both
//! expressed as a [`Timeout`]: the owner arms it with the current instant and
//! polls [`fire`](Timeout::fire) whenever time may have advanced (input
//! dispatch, frame ticks). Injecting `now` keeps every machine deterministic
//! under test.

use std::time::Duration;

use web_time::Instant;

/// A one-shot deadline timer.
///
/// Arming an already-armed timeout replaces its deadline, so a burst of
/// [`set`](Timeout::set) calls collapses into a single firing measured from
/// the last one. That replacement rule is exactly the debounce contract;
/// callers that want plain one-shot behavior simply arm once.
#[derive(Debug, Clone, Copy)]
pub struct Timeout {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Timeout {
    /// Create an unarmed timeout with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timeout to fire `delay` after `now`.
    pub fn set(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarm without firing.
    pub fn clear(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is armed and has not yet fired.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Poll the timeout.
    ///
    /// Returns `true` exactly once per arming, on the first poll at or after
    /// the deadline. Subsequent polls return `false` until the timeout is
    /// armed again.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, or `None` when unarmed.
    ///
    /// Returns `Duration::ZERO` once the deadline has passed. Hosts use this
    /// to schedule their next wakeup instead of polling in a tight loop.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// The configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}
