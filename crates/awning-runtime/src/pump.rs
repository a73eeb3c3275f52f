#![forbid(unsafe_code)]

//! Event pump: synchronous dispatch plus frame-boundary intake.
//!
//! Discrete interactions (presses, keys, resizes) go straight through to
//! the controller and commit their transition before [`dispatch`] returns.
//! Frame ticks arrive asynchronously from a [`FrameTicker`] channel; the
//! pump drains them latest-wins, so a dispatch loop that stalled for a few
//! ticks runs one catch-up frame rather than a burst.
//!
//! The pump owns the [`NavChrome`]. Hosts that drive their own frame
//! callback skip the tick channel and call [`frame`] directly.
//!
//! [`dispatch`]: EventPump::dispatch
//! [`frame`]: EventPump::frame

use std::sync::mpsc;

use awning_chrome::{NavChrome, Outcome, PartId};
use awning_core::event::InputEvent;
use web_time::Instant;

use crate::ticker::FrameTick;

/// Pumps input events and frame ticks through a [`NavChrome`].
pub struct EventPump {
    chrome: NavChrome,
    ticks: Option<mpsc::Receiver<FrameTick>>,
}

impl EventPump {
    /// A pump without a tick source; the host calls [`EventPump::frame`].
    #[must_use]
    pub fn new(chrome: NavChrome) -> Self {
        Self {
            chrome,
            ticks: None,
        }
    }

    /// A pump fed by a ticker channel, drained by [`EventPump::poll`].
    #[must_use]
    pub fn with_ticks(chrome: NavChrome, ticks: mpsc::Receiver<FrameTick>) -> Self {
        Self {
            chrome,
            ticks: Some(ticks),
        }
    }

    /// Dispatch one input event synchronously.
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        hit: Option<PartId>,
        now: Instant,
    ) -> Outcome {
        self.chrome.process(event, hit, now)
    }

    /// Run one frame evaluation at `now`.
    pub fn frame(&mut self, now: Instant) -> Outcome {
        self.chrome.frame(now)
    }

    /// Drain pending ticks and run one frame at the latest tick time.
    ///
    /// Returns `None` when no tick is pending or no tick source exists.
    pub fn poll(&mut self) -> Option<Outcome> {
        let ticks = self.ticks.as_ref()?;
        let mut latest = None;
        while let Ok(tick) = ticks.try_recv() {
            latest = Some(tick.at);
        }
        latest.map(|at| self.chrome.frame(at))
    }

    /// The controller.
    #[must_use]
    pub const fn chrome(&self) -> &NavChrome {
        &self.chrome
    }

    /// Mutable access for lifecycle calls (install, item swaps).
    pub const fn chrome_mut(&mut self) -> &mut NavChrome {
        &mut self.chrome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awning_chrome::{BarVisibility, ChromeConfig, PanelItem};
    use awning_core::testing;

    fn pump_with_channel() -> (EventPump, mpsc::Sender<FrameTick>) {
        let (tx, rx) = mpsc::channel();
        let chrome = NavChrome::new(ChromeConfig::new().item(PanelItem::link("About")));
        (EventPump::with_ticks(chrome, rx), tx)
    }

    #[test]
    fn poll_without_ticks_is_none() {
        let (mut pump, _tx) = pump_with_channel();
        assert!(pump.poll().is_none());
    }

    #[test]
    fn poll_coalesces_a_tick_burst_into_one_frame() {
        let (mut pump, tx) = pump_with_channel();
        let t0 = Instant::now();
        pump.dispatch(&testing::scroll(140.0), None, t0);

        for offset_ms in [16, 32, 48] {
            tx.send(FrameTick {
                at: t0 + std::time::Duration::from_millis(offset_ms),
            })
            .unwrap();
        }

        let outcome = pump.poll().expect("tick was pending");
        assert!(!outcome.effects.is_empty());
        assert_eq!(pump.chrome().bar_visibility(), BarVisibility::Hidden);
        // The burst is spent.
        assert!(pump.poll().is_none());
    }

    #[test]
    fn manual_frame_works_without_a_tick_source() {
        let chrome = NavChrome::new(ChromeConfig::new());
        let mut pump = EventPump::new(chrome);
        let t0 = Instant::now();
        pump.dispatch(&testing::scroll(90.0), None, t0);
        pump.frame(t0 + std::time::Duration::from_millis(16));
        assert_eq!(pump.chrome().bar_visibility(), BarVisibility::Hidden);
    }
}
