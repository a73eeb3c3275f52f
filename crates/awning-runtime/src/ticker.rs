#![forbid(unsafe_code)]

//! Background frame ticker with cooperative stop.
//!
//! Hosts without a native animation-frame callback (headless tests,
//! terminal embeddings) need something to drive [`frame`] evaluation.
//! [`FrameTicker`] runs a background thread that sends a [`FrameTick`]
//! through a channel at a fixed interval until stopped.
//!
//! Stopping is cooperative: [`FrameTicker::stop`] signals a condition
//! variable and joins the thread, so no tick is in flight afterward.
//! Dropping the ticker signals the thread but does not join it, to avoid
//! blocking in drop.
//!
//! [`frame`]: awning_chrome::NavChrome::frame

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use web_time::Instant;

/// One frame boundary delivered by the ticker.
#[derive(Debug, Clone, Copy)]
pub struct FrameTick {
    /// When the tick fired.
    pub at: Instant,
}

/// Signal a ticker thread polls to learn it should exit.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a signal/trigger pair.
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Whether stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Block until stopped or until `duration` elapses.
    ///
    /// Returns `true` if stopped, `false` on timeout.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        if *stopped {
            return true;
        }
        let (stopped, _) = cvar
            .wait_timeout(stopped, duration)
            .unwrap_or_else(|e| e.into_inner());
        *stopped
    }
}

/// Control side of a [`StopSignal`].
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        cvar.notify_all();
    }
}

/// Ticker tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    /// Interval between ticks. Default: 16 ms, roughly one repaint frame.
    pub interval: Duration,
}

impl TickerConfig {
    /// Default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: Duration::from_millis(16),
        }
    }

    /// Set the tick interval.
    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running ticker thread.
pub struct FrameTicker {
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl FrameTicker {
    /// Spawn the ticker thread, sending ticks into `sender`.
    ///
    /// The thread exits when stopped or when the receiving side hangs up.
    pub fn spawn(config: TickerConfig, sender: mpsc::Sender<FrameTick>) -> io::Result<Self> {
        let (signal, trigger) = StopSignal::new();
        let interval = config.interval;
        let thread = thread::Builder::new()
            .name("awning-frame-ticker".to_owned())
            .spawn(move || {
                loop {
                    if signal.wait_timeout(interval) {
                        break;
                    }
                    let tick = FrameTick { at: Instant::now() };
                    if sender.send(tick).is_err() {
                        break;
                    }
                }
                tracing::debug!("frame ticker stopped");
            })?;
        Ok(Self {
            trigger,
            thread: Some(thread),
        })
    }

    /// Stop the ticker and join its thread.
    pub fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.trigger.stop();
        // No join in drop; stop() is the blocking path.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_signal_starts_clear() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.is_stopped());
    }

    #[test]
    fn trigger_sets_signal() {
        let (signal, trigger) = StopSignal::new();
        trigger.stop();
        assert!(signal.is_stopped());
        assert!(signal.wait_timeout(Duration::from_millis(50)));
    }

    #[test]
    fn wait_times_out_without_stop() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn ticker_delivers_ticks_until_stopped() {
        let (tx, rx) = mpsc::channel();
        let ticker = FrameTicker::spawn(
            TickerConfig::new().interval(Duration::from_millis(5)),
            tx,
        )
        .unwrap();

        thread::sleep(Duration::from_millis(40));
        ticker.stop();

        let ticks: Vec<_> = rx.try_iter().collect();
        assert!(!ticks.is_empty(), "expected at least one tick");

        // Stopped and joined: nothing further arrives.
        thread::sleep(Duration::from_millis(20));
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn ticker_exits_when_receiver_drops() {
        let (tx, rx) = mpsc::channel();
        let ticker = FrameTicker::spawn(
            TickerConfig::new().interval(Duration::from_millis(5)),
            tx,
        )
        .unwrap();
        drop(rx);
        thread::sleep(Duration::from_millis(20));
        // stop() joins promptly because the send loop already broke.
        ticker.stop();
    }
}
