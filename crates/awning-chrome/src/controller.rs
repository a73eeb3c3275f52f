#![forbid(unsafe_code)]

//! The chrome controller.
//!
//! [`NavChrome`] owns every state machine and the scroll intake, routes
//! classified intents to them, and projects each transition into an
//! ordered effect batch via [`ChromeSnapshot::effects_since`].
//!
//! # Driving it
//!
//! Hosts feed events through [`NavChrome::process`] and call
//! [`NavChrome::frame`] once per animation frame whenever an outcome set
//! `frame_requested`. Discrete interactions (presses, keys) commit their
//! transition synchronously inside `process`; scroll samples are
//! coalesced and evaluated on the next frame, so a storm of samples
//! costs one evaluation.
//!
//! # Invariants
//!
//! - Effects inside one outcome are in the projection contract order.
//! - At most one drawer transition per call.
//! - Scroll samples arriving while the drawer is open are discarded, and
//!   the visibility reference offset is left untouched.
//! - A part the host never mounted is never named in any effect.

use std::time::Duration;

use awning_core::event::InputEvent;
use awning_core::scroll::{FrameGate, OffsetAccumulator, ScrollCoalescer};
use awning_core::viewport::{Breakpoint, ViewportSize};
use web_time::Instant;

use crate::drawer::{CloseReason, Drawer, DrawerAction, DrawerConfig, DrawerPhase};
use crate::focus::{FocusMove, FocusTarget, FocusTrap};
use crate::intent::{self, ActivationTarget, Intent};
use crate::label::ToggleLabels;
use crate::motion::{MotionConfig, SlideMotion};
use crate::parts::{PanelItem, PanelItemKind, PartId, Parts};
use crate::projection::{ChromeSnapshot, Effect, StyleClass};
use crate::visibility::{BarVisibility, ScrollVisibility, VisibilityConfig};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A host-level consequence of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeCommand {
    /// Follow the link of the item at this index.
    Navigate(usize),
    /// The button item at this index was activated.
    ItemActivated(usize),
}

/// Everything one controller call asks of the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    /// Ordered mutations to apply synchronously, in order.
    pub effects: Vec<Effect>,
    /// Higher-level consequences for the host application.
    pub commands: Vec<ChromeCommand>,
    /// Whether the triggering event was handled and should not reach
    /// other listeners (hosts map this to `preventDefault`).
    pub consumed: bool,
    /// Whether the controller wants a frame callback. Level-triggered:
    /// hosts schedule one unless a callback is already booked.
    pub frame_requested: bool,
}

impl Outcome {
    /// Whether this outcome asks nothing of the host.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.commands.is_empty() && !self.consumed
            && !self.frame_requested
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything needed to build a [`NavChrome`].
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    parts: Parts,
    items: Vec<PanelItem>,
    labels: ToggleLabels,
    breakpoint: Breakpoint,
    viewport: ViewportSize,
    visibility: VisibilityConfig,
    drawer: DrawerConfig,
    motion: MotionConfig,
    max_scroll: Option<f64>,
}

impl ChromeConfig {
    /// Start from defaults: all parts mounted, no items, a phone-sized
    /// viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: Parts::all(),
            items: Vec::new(),
            labels: ToggleLabels::default(),
            breakpoint: Breakpoint::default(),
            viewport: ViewportSize::new(375, 667),
            visibility: VisibilityConfig::default(),
            drawer: DrawerConfig::default(),
            motion: MotionConfig::default(),
            max_scroll: None,
        }
    }

    /// Which chrome parts the host mounted (default: all).
    #[must_use]
    pub const fn parts(mut self, parts: Parts) -> Self {
        self.parts = parts;
        self
    }

    /// Panel items, in display order.
    #[must_use]
    pub fn items(mut self, items: Vec<PanelItem>) -> Self {
        self.items = items;
        self
    }

    /// Append one panel item.
    #[must_use]
    pub fn item(mut self, item: PanelItem) -> Self {
        self.items.push(item);
        self
    }

    /// Toggle label pair.
    #[must_use]
    pub fn labels(mut self, labels: ToggleLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Compact/wide breakpoint (default: 768).
    #[must_use]
    pub const fn breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Initial viewport size (default: 375x667).
    #[must_use]
    pub const fn viewport(mut self, viewport: ViewportSize) -> Self {
        self.viewport = viewport;
        self
    }

    /// Bar visibility tuning.
    #[must_use]
    pub const fn visibility(mut self, config: VisibilityConfig) -> Self {
        self.visibility = config;
        self
    }

    /// Drawer behavior tuning.
    #[must_use]
    pub const fn drawer(mut self, config: DrawerConfig) -> Self {
        self.drawer = config;
        self
    }

    /// Slide motion tuning (default: disabled).
    #[must_use]
    pub const fn motion(mut self, config: MotionConfig) -> Self {
        self.motion = config;
        self
    }

    /// Clamp integrated wheel scrolling to a document height.
    #[must_use]
    pub const fn max_scroll(mut self, max: f64) -> Self {
        self.max_scroll = Some(max);
        self
    }
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the chrome state machines and turns input into ordered effects.
#[derive(Debug)]
pub struct NavChrome {
    parts: Parts,
    items: Vec<PanelItem>,
    labels: ToggleLabels,
    breakpoint: Breakpoint,
    viewport: ViewportSize,
    visibility_config: VisibilityConfig,

    visibility: ScrollVisibility,
    drawer: Drawer,
    trap: FocusTrap,

    coalescer: ScrollCoalescer,
    gate: FrameGate,
    accumulator: OffsetAccumulator,

    bar_slide: SlideMotion,
    panel_slide: SlideMotion,
    last_frame: Option<Instant>,

    directed_focus: Option<FocusTarget>,
    snapshot: ChromeSnapshot,
}

impl NavChrome {
    /// Build a controller. No effects are produced until
    /// [`NavChrome::install`] runs.
    #[must_use]
    pub fn new(config: ChromeConfig) -> Self {
        let accumulator = match config.max_scroll {
            Some(max) => OffsetAccumulator::new().with_max(max),
            None => OffsetAccumulator::new(),
        };
        let mut bar_slide = SlideMotion::new(config.motion);
        bar_slide.force_open();
        let snapshot = ChromeSnapshot::initial(&config.labels);
        Self {
            parts: config.parts,
            items: config.items,
            labels: config.labels,
            breakpoint: config.breakpoint,
            viewport: config.viewport,
            visibility_config: config.visibility,
            visibility: ScrollVisibility::new(),
            drawer: Drawer::new(config.drawer),
            trap: FocusTrap::new(),
            coalescer: ScrollCoalescer::new(),
            gate: FrameGate::new(),
            accumulator,
            bar_slide,
            panel_slide: SlideMotion::new(config.motion),
            last_frame: None,
            directed_focus: None,
            snapshot,
        }
    }

    /// Reset to the fresh-page baseline and emit effects asserting it.
    ///
    /// Idempotent: hosts call this on mount and again on every soft page
    /// transition. Any open drawer closes, every deadline disarms, and
    /// the returned effects reconcile a host tree of unknown state. Focus
    /// is never moved by an install.
    pub fn install(&mut self) -> Outcome {
        self.drawer.reset();
        self.trap = FocusTrap::new();
        self.visibility.reset();
        self.coalescer.clear();
        self.gate.cancel();
        self.accumulator.set(0.0);
        self.bar_slide.force_open();
        self.panel_slide.force_closed();
        self.last_frame = None;
        self.directed_focus = None;
        self.snapshot = ChromeSnapshot::initial(&self.labels);
        Outcome {
            effects: self.snapshot.reconcile(),
            ..Outcome::default()
        }
    }

    /// Feed one input event with its host-resolved hit.
    pub fn process(&mut self, event: &InputEvent, hit: Option<PartId>, now: Instant) -> Outcome {
        match intent::classify(event, hit) {
            Some(intent) => self.apply(intent, now),
            None => Outcome::default(),
        }
    }

    /// Run one frame callback: evaluate coalesced scroll, fire due
    /// deadlines, advance motion.
    pub fn frame(&mut self, now: Instant) -> Outcome {
        self.gate.take();
        let delta = match self.last_frame {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);

        let mut transitioned = false;
        // Samples cannot be pending while the drawer is open: intake
        // discards them and opening clears the queue.
        if let Some(offset) = self.coalescer.take() {
            if let Some(state) = self.visibility.observe(offset, &self.visibility_config) {
                match state {
                    BarVisibility::Visible => self.bar_slide.slide_in(),
                    BarVisibility::Hidden => self.bar_slide.slide_out(),
                }
                transitioned = true;
            }
        }
        if self.parts.has_drawer() {
            if let Some(action) = self.drawer.poll(now, &self.breakpoint) {
                self.note_drawer_action(action);
                transitioned = true;
            }
        }
        self.bar_slide.tick(delta);
        self.panel_slide.tick(delta);

        let effects = if transitioned {
            self.rebuild_snapshot()
        } else {
            Vec::new()
        };
        Outcome {
            effects,
            frame_requested: self.wants_frame(),
            ..Outcome::default()
        }
    }

    /// Replace the panel items, as when a page swap changes navigation.
    ///
    /// If the drawer is open the trap re-engages over the new items and
    /// focus moves back to the first slot.
    pub fn set_items(&mut self, items: Vec<PanelItem>) -> Outcome {
        self.items = items;
        if self.trap.is_engaged() {
            self.directed_focus = Some(self.trap.engage(self.items.len()));
            return self.finish(false, Vec::new());
        }
        Outcome::default()
    }

    // -- accessors ----------------------------------------------------------

    /// Latest projected snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &ChromeSnapshot {
        &self.snapshot
    }

    /// Current drawer phase.
    #[must_use]
    pub const fn drawer_phase(&self) -> DrawerPhase {
        self.drawer.phase()
    }

    /// Current bar visibility.
    #[must_use]
    pub const fn bar_visibility(&self) -> BarVisibility {
        self.visibility.state()
    }

    /// Last viewport size reported by the host.
    #[must_use]
    pub const fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Panel items.
    #[must_use]
    pub fn items(&self) -> &[PanelItem] {
        &self.items
    }

    /// Where the chrome last directed focus.
    #[must_use]
    pub const fn directed_focus(&self) -> Option<FocusTarget> {
        self.directed_focus
    }

    /// Eased bar presentation for motion hosts, `0.0` retracted to `1.0`
    /// shown.
    #[must_use]
    pub fn bar_presented(&self) -> f32 {
        self.bar_slide.presented()
    }

    /// Eased drawer panel presentation for motion hosts.
    #[must_use]
    pub fn panel_presented(&self) -> f32 {
        self.panel_slide.presented()
    }

    // -- dispatch -----------------------------------------------------------

    fn apply(&mut self, intent: Intent, now: Instant) -> Outcome {
        match intent {
            Intent::Toggle => self.toggle_drawer(),
            Intent::Dismiss(reason) => self.dismiss_drawer(reason),
            Intent::Activate(target) => self.activate(target, now),
            Intent::Focus(mv) => self.move_focus(mv),
            Intent::Scroll(offset) => self.observe_scroll(offset),
            Intent::Wheel(delta) => self.nudge_scroll(delta),
            Intent::Viewport(size) => self.observe_viewport(size, now),
            Intent::Reinstall => self.install(),
        }
    }

    fn toggle_drawer(&mut self) -> Outcome {
        if !self.parts.has_drawer() {
            return Outcome::default();
        }
        // A wide viewport never opens the drawer, but a toggle press must
        // still close one left open while a resize burst settles.
        if !self.drawer.is_open() && self.breakpoint.classify(self.viewport).is_wide() {
            return Outcome::default();
        }
        match self.drawer.toggle() {
            Some(action) => {
                self.note_drawer_action(action);
                self.finish(true, Vec::new())
            }
            None => Outcome::default(),
        }
    }

    fn dismiss_drawer(&mut self, reason: CloseReason) -> Outcome {
        if !self.parts.has_drawer() {
            return Outcome::default();
        }
        match self.drawer.dismiss(reason) {
            Some(action) => {
                self.note_drawer_action(action);
                self.finish(true, Vec::new())
            }
            // Already closed or the reason is disabled: the event stays
            // unconsumed so outer layers may handle it.
            None => Outcome::default(),
        }
    }

    fn activate(&mut self, target: ActivationTarget, now: Instant) -> Outcome {
        if !self.parts.has_drawer() || !self.drawer.is_open() {
            return Outcome::default();
        }
        let index = match target {
            ActivationTarget::Item(index) => index,
            ActivationTarget::Focused => match self.trap.active() {
                Some(FocusTarget::Item(index)) => index,
                Some(FocusTarget::Toggle) => return self.toggle_drawer(),
                None => return Outcome::default(),
            },
        };
        let Some(item) = self.items.get(index) else {
            return Outcome::default();
        };
        let kind = item.kind();
        self.trap.focus(FocusTarget::Item(index));
        self.directed_focus = Some(FocusTarget::Item(index));
        match kind {
            PanelItemKind::Link => {
                self.drawer.schedule_link_close(now);
                self.finish(true, vec![ChromeCommand::Navigate(index)])
            }
            PanelItemKind::Button => self.finish(true, vec![ChromeCommand::ItemActivated(index)]),
        }
    }

    fn move_focus(&mut self, mv: FocusMove) -> Outcome {
        match self.trap.apply(mv) {
            Some(target) => {
                self.directed_focus = Some(target);
                self.finish(true, Vec::new())
            }
            None => Outcome::default(),
        }
    }

    fn observe_scroll(&mut self, offset: f64) -> Outcome {
        if !self.parts.has_bar() || self.drawer.is_open() || !offset.is_finite() {
            return Outcome::default();
        }
        self.accumulator.set(offset);
        self.coalescer.push(offset);
        self.gate.request();
        Outcome {
            frame_requested: true,
            ..Outcome::default()
        }
    }

    fn nudge_scroll(&mut self, delta: f64) -> Outcome {
        if !self.parts.has_bar() || self.drawer.is_open() || !delta.is_finite() {
            return Outcome::default();
        }
        let offset = self.accumulator.apply(delta);
        self.coalescer.push(offset);
        self.gate.request();
        Outcome {
            frame_requested: true,
            ..Outcome::default()
        }
    }

    fn observe_viewport(&mut self, size: ViewportSize, now: Instant) -> Outcome {
        self.viewport = size;
        if self.parts.has_drawer() {
            self.drawer.observe_resize(size, now);
        }
        Outcome {
            frame_requested: self.wants_frame(),
            ..Outcome::default()
        }
    }

    // -- shared transition plumbing -----------------------------------------

    fn note_drawer_action(&mut self, action: DrawerAction) {
        match action {
            DrawerAction::Opened => {
                // The drawer anchors to the bar, so a hidden bar comes
                // back first. Scroll history is preserved.
                self.visibility.show();
                self.bar_slide.slide_in();
                self.coalescer.clear();
                self.gate.cancel();
                self.directed_focus = Some(self.trap.engage(self.items.len()));
                self.panel_slide.slide_in();
            }
            DrawerAction::Closed(_) => {
                self.directed_focus = Some(self.trap.release());
                self.panel_slide.slide_out();
            }
        }
    }

    fn project(&self) -> ChromeSnapshot {
        let open = self.drawer.is_open();
        let mut classes = StyleClass::empty();
        if self.parts.has_bar() && self.visibility.state().is_hidden() {
            classes |= StyleClass::BAR_HIDDEN;
        }
        if open {
            classes |= StyleClass::MENU_OPEN;
        }
        ChromeSnapshot {
            classes,
            toggle_expanded: open,
            toggle_label: self.labels.for_expanded(open).to_owned(),
            panel_hidden: !open,
            items_tabbable: open,
            scroll_locked: open,
            focus: self.directed_focus,
        }
    }

    fn rebuild_snapshot(&mut self) -> Vec<Effect> {
        let next = self.project();
        let effects = next.effects_since(&self.snapshot);
        self.snapshot = next;
        effects
    }

    fn finish(&mut self, consumed: bool, commands: Vec<ChromeCommand>) -> Outcome {
        Outcome {
            effects: self.rebuild_snapshot(),
            commands,
            consumed,
            frame_requested: self.wants_frame(),
        }
    }

    fn wants_frame(&self) -> bool {
        self.gate.is_armed()
            || (self.parts.has_drawer() && self.drawer.timers_pending())
            || self.bar_slide.is_animating()
            || self.panel_slide.is_animating()
    }
}
