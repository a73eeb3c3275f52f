#![forbid(unsafe_code)]

//! Shell: owns the controller lifecycle for one page-load cycle.
//!
//! [`Shell`] wraps the pump, the snapshot cell, an optional frame ticker,
//! and two hook registries. Hooks are keyed by [`HookId`] and registration
//! reconciles instead of appending: registering under an id that is
//! already present replaces the previous hook. A host that installs twice
//! (two page-load events hitting the same entry point) therefore ends up
//! with one hook per id, and one user action produces exactly one
//! delivered transition.
//!
//! [`Shell::dispose`] stops the ticker (joining its thread), drops every
//! hook, and rejects further use with [`ShellError::Disposed`]. The
//! snapshot cell keeps serving the final snapshot to readers that
//! outlive the shell.

use std::fmt;
use std::sync::mpsc;
use std::sync::Arc;

use ahash::AHashMap;
use awning_chrome::{ChromeCommand, ChromeConfig, ChromeSnapshot, Effect, NavChrome, Outcome, PanelItem, PartId};
use awning_core::event::InputEvent;
use web_time::Instant;

use crate::cell::{SnapshotCell, SnapshotReader};
use crate::pump::EventPump;
use crate::ticker::{FrameTicker, TickerConfig};

/// Runtime-level failures.
#[derive(Debug)]
pub enum ShellError {
    /// The ticker thread could not be spawned.
    Io(std::io::Error),
    /// The shell was used after [`Shell::dispose`].
    Disposed,
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "ticker spawn failed: {err}"),
            Self::Disposed => write!(f, "shell used after dispose"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Disposed => None,
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Identifies a registered hook for reconciliation.
pub type HookId = u64;

type EffectHook = Box<dyn FnMut(&Effect) + Send>;
type CommandHook = Box<dyn FnMut(&ChromeCommand) + Send>;

/// Owns a [`NavChrome`] and its host plumbing for one lifecycle.
pub struct Shell {
    pump: EventPump,
    cell: Arc<SnapshotCell>,
    ticker: Option<FrameTicker>,
    effect_hooks: AHashMap<HookId, EffectHook>,
    command_hooks: AHashMap<HookId, CommandHook>,
    disposed: bool,
}

impl Shell {
    /// A shell whose host drives frames itself via [`Shell::frame_at`].
    #[must_use]
    pub fn new(config: ChromeConfig) -> Self {
        let chrome = NavChrome::new(config);
        let cell = Arc::new(SnapshotCell::new(chrome.snapshot().clone()));
        Self {
            pump: EventPump::new(chrome),
            cell,
            ticker: None,
            effect_hooks: AHashMap::new(),
            command_hooks: AHashMap::new(),
            disposed: false,
        }
    }

    /// A shell with a background ticker driving [`Shell::pump`].
    pub fn with_ticker(config: ChromeConfig, ticker: TickerConfig) -> Result<Self, ShellError> {
        let chrome = NavChrome::new(config);
        let cell = Arc::new(SnapshotCell::new(chrome.snapshot().clone()));
        let (tx, rx) = mpsc::channel();
        let ticker = FrameTicker::spawn(ticker, tx)?;
        Ok(Self {
            pump: EventPump::with_ticks(chrome, rx),
            cell,
            ticker: Some(ticker),
            effect_hooks: AHashMap::new(),
            command_hooks: AHashMap::new(),
            disposed: false,
        })
    }

    // -- hooks --------------------------------------------------------------

    /// Register (or replace) the effect hook stored under `id`.
    pub fn set_effect_hook(&mut self, id: HookId, hook: impl FnMut(&Effect) + Send + 'static) {
        if self.effect_hooks.insert(id, Box::new(hook)).is_some() {
            tracing::debug!(hook_id = id, "replacing effect hook");
        }
    }

    /// Register (or replace) the command hook stored under `id`.
    pub fn set_command_hook(
        &mut self,
        id: HookId,
        hook: impl FnMut(&ChromeCommand) + Send + 'static,
    ) {
        if self.command_hooks.insert(id, Box::new(hook)).is_some() {
            tracing::debug!(hook_id = id, "replacing command hook");
        }
    }

    /// Drop the effect hook stored under `id`, if any.
    pub fn remove_effect_hook(&mut self, id: HookId) {
        self.effect_hooks.remove(&id);
    }

    /// Drop the command hook stored under `id`, if any.
    pub fn remove_command_hook(&mut self, id: HookId) {
        self.command_hooks.remove(&id);
    }

    // -- lifecycle ----------------------------------------------------------

    /// Reset the chrome to its fresh-page baseline and deliver the
    /// reconciling effects. Safe to call on every page load.
    pub fn install(&mut self) -> Result<(), ShellError> {
        self.guard()?;
        tracing::debug!("installing chrome");
        let outcome = self.pump.chrome_mut().install();
        self.deliver(outcome);
        Ok(())
    }

    /// Dispatch one input event, stamping it with the current time.
    pub fn dispatch(&mut self, event: &InputEvent, hit: Option<PartId>) -> Result<(), ShellError> {
        self.dispatch_at(event, hit, Instant::now())
    }

    /// Dispatch one input event at an explicit time.
    pub fn dispatch_at(
        &mut self,
        event: &InputEvent,
        hit: Option<PartId>,
        now: Instant,
    ) -> Result<(), ShellError> {
        self.guard()?;
        let outcome = self.pump.dispatch(event, hit, now);
        self.deliver(outcome);
        Ok(())
    }

    /// Drain ticker frames and deliver whatever they produced.
    pub fn pump(&mut self) -> Result<(), ShellError> {
        self.guard()?;
        while let Some(outcome) = self.pump.poll() {
            self.deliver(outcome);
        }
        Ok(())
    }

    /// Run one frame at an explicit time (hosts with their own frame
    /// callback, and tests).
    pub fn frame_at(&mut self, now: Instant) -> Result<(), ShellError> {
        self.guard()?;
        let outcome = self.pump.frame(now);
        self.deliver(outcome);
        Ok(())
    }

    /// Replace the panel items, as on a soft page swap.
    pub fn set_items(&mut self, items: Vec<PanelItem>) -> Result<(), ShellError> {
        self.guard()?;
        let outcome = self.pump.chrome_mut().set_items(items);
        self.deliver(outcome);
        Ok(())
    }

    /// Tear down: stop and join the ticker, drop all hooks.
    ///
    /// Idempotent. The snapshot cell retains the final snapshot.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        tracing::debug!("disposing shell");
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.effect_hooks.clear();
        self.command_hooks.clear();
        self.disposed = true;
    }

    // -- reads --------------------------------------------------------------

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ChromeSnapshot> {
        self.cell.load()
    }

    /// A read handle that survives dispose.
    #[must_use]
    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader::new(Arc::clone(&self.cell))
    }

    /// The controller, for state inspection.
    #[must_use]
    pub const fn chrome(&self) -> &NavChrome {
        self.pump.chrome()
    }

    /// Whether [`Shell::dispose`] has run.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    // -- internals ----------------------------------------------------------

    fn guard(&self) -> Result<(), ShellError> {
        if self.disposed {
            Err(ShellError::Disposed)
        } else {
            Ok(())
        }
    }

    fn deliver(&mut self, outcome: Outcome) {
        for effect in &outcome.effects {
            for hook in self.effect_hooks.values_mut() {
                hook(effect);
            }
        }
        for command in &outcome.commands {
            tracing::debug!(?command, "chrome command");
            for hook in self.command_hooks.values_mut() {
                hook(command);
            }
        }
        if !outcome.effects.is_empty() {
            self.cell.publish(self.pump.chrome().snapshot().clone());
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        // Ticker drop signals its thread without joining.
        self.effect_hooks.clear();
        self.command_hooks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use awning_chrome::{DrawerPhase, PanelItem};
    use awning_core::testing;

    fn config() -> ChromeConfig {
        ChromeConfig::new()
            .item(PanelItem::link("Projects"))
            .item(PanelItem::link("About"))
    }

    fn counter_hook(log: &Arc<Mutex<Vec<Effect>>>) -> impl FnMut(&Effect) + Send + 'static {
        let log = Arc::clone(log);
        move |effect| log.lock().unwrap().push(effect.clone())
    }

    #[test]
    fn dispatch_delivers_effects_and_publishes() {
        let mut shell = Shell::new(config());
        let log = Arc::new(Mutex::new(Vec::new()));
        shell.set_effect_hook(1, counter_hook(&log));
        shell.install().unwrap();
        log.lock().unwrap().clear();

        shell
            .dispatch_at(&testing::press(5.0, 5.0), Some(PartId::Toggle), Instant::now())
            .unwrap();

        assert_eq!(log.lock().unwrap().len(), 6);
        assert!(shell.snapshot().toggle_expanded());
        assert_eq!(shell.chrome().drawer_phase(), DrawerPhase::Open);
    }

    #[test]
    fn hook_registration_reconciles_by_id() {
        let mut shell = Shell::new(config());
        let log = Arc::new(Mutex::new(Vec::new()));
        shell.set_effect_hook(7, counter_hook(&log));
        shell.set_effect_hook(7, counter_hook(&log));
        shell.install().unwrap();
        log.lock().unwrap().clear();

        shell
            .dispatch_at(&testing::press(5.0, 5.0), Some(PartId::Toggle), Instant::now())
            .unwrap();
        // One hook under the id, so six effects, not twelve.
        assert_eq!(log.lock().unwrap().len(), 6);
    }

    #[test]
    fn removed_hook_stops_receiving() {
        let mut shell = Shell::new(config());
        let log = Arc::new(Mutex::new(Vec::new()));
        shell.set_effect_hook(3, counter_hook(&log));
        shell.remove_effect_hook(3);
        shell.install().unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn command_hooks_observe_navigation() {
        let mut shell = Shell::new(config());
        let commands = Arc::new(Mutex::new(Vec::new()));
        {
            let commands = Arc::clone(&commands);
            shell.set_command_hook(1, move |cmd| commands.lock().unwrap().push(*cmd));
        }
        shell.install().unwrap();
        let t0 = Instant::now();
        shell
            .dispatch_at(&testing::press(5.0, 5.0), Some(PartId::Toggle), t0)
            .unwrap();
        shell
            .dispatch_at(&testing::press(40.0, 80.0), Some(PartId::Item(1)), t0)
            .unwrap();
        assert_eq!(*commands.lock().unwrap(), vec![ChromeCommand::Navigate(1)]);
    }

    #[test]
    fn dispose_rejects_further_use() {
        let mut shell = Shell::new(config());
        shell.install().unwrap();
        shell.dispose();
        shell.dispose();

        assert!(shell.is_disposed());
        assert!(matches!(shell.install(), Err(ShellError::Disposed)));
        assert!(matches!(
            shell.dispatch_at(&testing::page_load(), None, Instant::now()),
            Err(ShellError::Disposed)
        ));
    }

    #[test]
    fn cell_serves_final_snapshot_after_dispose() {
        let mut shell = Shell::new(config());
        shell.install().unwrap();
        shell
            .dispatch_at(&testing::press(5.0, 5.0), Some(PartId::Toggle), Instant::now())
            .unwrap();
        let reader = shell.reader();
        shell.dispose();
        assert!(reader.current().toggle_expanded());
    }

    #[test]
    fn error_display_is_stable() {
        assert_eq!(ShellError::Disposed.to_string(), "shell used after dispose");
    }
}
