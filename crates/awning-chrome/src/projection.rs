#![forbid(unsafe_code)]

//! Host-facing projection of chrome state.
//!
//! Hosts never read the state machines directly. Every transition
//! produces a [`ChromeSnapshot`], and the difference between two
//! snapshots is an ordered list of [`Effect`]s the host applies
//! synchronously, in the order given.
//!
//! # Effect order
//!
//! The order is part of the contract and [`ChromeSnapshot::effects_since`]
//! is the only producer, so it cannot drift between call sites:
//!
//! 1. Style classes. Dependent CSS (transforms, backdrop fade) keys off
//!    these, so they land first.
//! 2. Toggle state: `aria-expanded` plus the accessible label.
//! 3. Panel exposure: `aria-hidden` on the panel.
//! 4. Item tab stops: panel items enter or leave the tab order.
//! 5. Scroll lock on the page body.
//! 6. Focus movement, always last, after the target is focusable.
//!
//! Assistive tech observes each attribute in a settled intermediate
//! state; focus never moves to an element still hidden from it.

use bitflags::bitflags;

use crate::focus::FocusTarget;
use crate::label::ToggleLabels;

bitflags! {
    /// Style classes the host mirrors onto its tree.
    ///
    /// `iter_names` gives stable names for hosts that map flags to CSS
    /// classes mechanically.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StyleClass: u8 {
        /// The bar is retracted off the top edge.
        const BAR_HIDDEN = 1;
        /// The drawer is open.
        const MENU_OPEN = 1 << 1;
    }
}

/// One synchronous host mutation.
///
/// Variants carry everything the host needs; applying them requires no
/// query back into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the chrome style classes.
    Classes(StyleClass),
    /// Set `aria-expanded` and the accessible label on the toggle.
    ToggleExpanded {
        /// New expanded state.
        expanded: bool,
        /// Accessible name matching that state.
        label: String,
    },
    /// Set `aria-hidden` on the panel.
    PanelHidden(bool),
    /// Move panel items into (`true`) or out of (`false`) the tab order.
    TabStops(bool),
    /// Lock (`true`) or release (`false`) page scrolling.
    ScrollLock(bool),
    /// Move focus to a chrome slot.
    Focus(FocusTarget),
}

/// Complete host-visible state at one instant.
///
/// Serializable under `state-persistence`; `StyleClass` rides along via
/// the `serde` support in `bitflags`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct ChromeSnapshot {
    pub(crate) classes: StyleClass,
    pub(crate) toggle_expanded: bool,
    pub(crate) toggle_label: String,
    pub(crate) panel_hidden: bool,
    pub(crate) items_tabbable: bool,
    pub(crate) scroll_locked: bool,
    pub(crate) focus: Option<FocusTarget>,
}

impl ChromeSnapshot {
    /// Snapshot of freshly installed chrome: bar shown, drawer closed,
    /// focus untouched.
    #[must_use]
    pub fn initial(labels: &ToggleLabels) -> Self {
        Self {
            classes: StyleClass::empty(),
            toggle_expanded: false,
            toggle_label: labels.for_expanded(false).to_owned(),
            panel_hidden: true,
            items_tabbable: false,
            scroll_locked: false,
            focus: None,
        }
    }

    /// Current style classes.
    #[must_use]
    pub const fn classes(&self) -> StyleClass {
        self.classes
    }

    /// Whether the toggle reports expanded.
    #[must_use]
    pub const fn toggle_expanded(&self) -> bool {
        self.toggle_expanded
    }

    /// Accessible name on the toggle.
    #[must_use]
    pub fn toggle_label(&self) -> &str {
        &self.toggle_label
    }

    /// Whether the panel is hidden from assistive tech.
    #[must_use]
    pub const fn panel_hidden(&self) -> bool {
        self.panel_hidden
    }

    /// Whether panel items sit in the tab order.
    #[must_use]
    pub const fn items_tabbable(&self) -> bool {
        self.items_tabbable
    }

    /// Whether page scrolling is locked.
    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Where focus was last directed, if the chrome moved it.
    #[must_use]
    pub const fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }

    /// Ordered effects that carry a host from `prev` to this snapshot.
    ///
    /// Unchanged aspects emit nothing. A focus of `None` never emits; the
    /// chrome directs focus, it does not blur.
    #[must_use]
    pub fn effects_since(&self, prev: &ChromeSnapshot) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.classes != prev.classes {
            effects.push(Effect::Classes(self.classes));
        }
        if self.toggle_expanded != prev.toggle_expanded || self.toggle_label != prev.toggle_label {
            effects.push(Effect::ToggleExpanded {
                expanded: self.toggle_expanded,
                label: self.toggle_label.clone(),
            });
        }
        if self.panel_hidden != prev.panel_hidden {
            effects.push(Effect::PanelHidden(self.panel_hidden));
        }
        if self.items_tabbable != prev.items_tabbable {
            effects.push(Effect::TabStops(self.items_tabbable));
        }
        if self.scroll_locked != prev.scroll_locked {
            effects.push(Effect::ScrollLock(self.scroll_locked));
        }
        if self.focus != prev.focus {
            if let Some(target) = self.focus {
                effects.push(Effect::Focus(target));
            }
        }
        effects
    }

    /// Unconditional effects asserting this entire snapshot.
    ///
    /// Used at install time to force a host of unknown state, possibly
    /// left over from a previous page, into agreement.
    #[must_use]
    pub fn reconcile(&self) -> Vec<Effect> {
        let mut effects = vec![
            Effect::Classes(self.classes),
            Effect::ToggleExpanded {
                expanded: self.toggle_expanded,
                label: self.toggle_label.clone(),
            },
            Effect::PanelHidden(self.panel_hidden),
            Effect::TabStops(self.items_tabbable),
            Effect::ScrollLock(self.scroll_locked),
        ];
        if let Some(target) = self.focus {
            effects.push(Effect::Focus(target));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> ToggleLabels {
        ToggleLabels::default()
    }

    fn open_snapshot() -> ChromeSnapshot {
        let labels = labels();
        ChromeSnapshot {
            classes: StyleClass::MENU_OPEN,
            toggle_expanded: true,
            toggle_label: labels.for_expanded(true).to_owned(),
            panel_hidden: false,
            items_tabbable: true,
            scroll_locked: true,
            focus: Some(FocusTarget::Item(0)),
        }
    }

    #[test]
    fn identical_snapshots_emit_nothing() {
        let snap = ChromeSnapshot::initial(&labels());
        assert!(snap.effects_since(&snap.clone()).is_empty());
    }

    #[test]
    fn full_open_diff_emits_in_contract_order() {
        let prev = ChromeSnapshot::initial(&labels());
        let effects = open_snapshot().effects_since(&prev);
        assert_eq!(
            effects,
            vec![
                Effect::Classes(StyleClass::MENU_OPEN),
                Effect::ToggleExpanded {
                    expanded: true,
                    label: "Close navigation menu".to_owned(),
                },
                Effect::PanelHidden(false),
                Effect::TabStops(true),
                Effect::ScrollLock(true),
                Effect::Focus(FocusTarget::Item(0)),
            ]
        );
    }

    #[test]
    fn class_only_change_emits_single_effect() {
        let prev = ChromeSnapshot::initial(&labels());
        let mut next = prev.clone();
        next.classes = StyleClass::BAR_HIDDEN;
        assert_eq!(
            next.effects_since(&prev),
            vec![Effect::Classes(StyleClass::BAR_HIDDEN)]
        );
    }

    #[test]
    fn clearing_focus_emits_no_blur() {
        let prev = open_snapshot();
        let mut next = prev.clone();
        next.focus = None;
        assert!(next.effects_since(&prev).is_empty());
    }

    #[test]
    fn label_change_alone_still_updates_toggle() {
        let prev = ChromeSnapshot::initial(&labels());
        let mut next = prev.clone();
        next.toggle_label = "Menu".to_owned();
        assert_eq!(
            next.effects_since(&prev),
            vec![Effect::ToggleExpanded {
                expanded: false,
                label: "Menu".to_owned(),
            }]
        );
    }

    #[test]
    fn reconcile_asserts_every_aspect() {
        let snap = ChromeSnapshot::initial(&labels());
        let effects = snap.reconcile();
        assert_eq!(effects.len(), 5);
        assert_eq!(effects[0], Effect::Classes(StyleClass::empty()));
        assert_eq!(effects[4], Effect::ScrollLock(false));
    }

    #[test]
    fn reconcile_includes_focus_only_when_directed() {
        let effects = open_snapshot().reconcile();
        assert_eq!(effects.len(), 6);
        assert_eq!(effects[5], Effect::Focus(FocusTarget::Item(0)));
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn snapshot_survives_serialization() {
        let snap = open_snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let restored: ChromeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snap);
        assert_eq!(restored.classes(), StyleClass::MENU_OPEN);
    }

    #[test]
    fn style_class_names_are_stable() {
        let names: Vec<&str> = StyleClass::all().iter_names().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["BAR_HIDDEN", "MENU_OPEN"]);
    }
}
