#![forbid(unsafe_code)]

//! Focus ring and trap for the open drawer.
//!
//! While the drawer is open, keyboard focus must not escape it. The ring
//! is the toggle button followed by every panel item, in order, and Tab
//! cycles through it in both directions. Arrow keys, Home and End work the
//! way menu users expect.
//!
//! # Degradation
//!
//! A panel with no focusable items degrades to a one-slot ring holding
//! only the toggle. Cycling a one-slot ring re-asserts focus on the same
//! slot; the key is still consumed so focus cannot leak out of the trap.
//!
//! Closing the drawer always returns focus to the toggle, which is the
//! element that opened it.

use awning_core::event::{KeyCode, KeyEvent, KeyEventKind};

/// A focusable slot inside the trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum FocusTarget {
    /// The drawer toggle button.
    Toggle,
    /// A panel item, by index.
    Item(usize),
}

/// A focus movement inside the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    /// Forward, wrapping from the last slot to the first.
    Next,
    /// Backward, wrapping from the first slot to the last.
    Prev,
    /// Jump to the first slot.
    First,
    /// Jump to the last slot.
    Last,
}

/// Cyclic focus order over the toggle and the panel items.
///
/// Slot 0 is always the toggle; slot `i + 1` is item `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRing {
    item_count: usize,
    active: usize,
}

impl FocusRing {
    /// Create a ring over the toggle and `item_count` items, with the
    /// toggle active.
    #[must_use]
    pub const fn new(item_count: usize) -> Self {
        Self {
            item_count,
            active: 0,
        }
    }

    /// Number of slots in the ring. Never zero.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.item_count + 1
    }

    /// A ring always contains at least the toggle.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The currently active slot.
    #[must_use]
    pub const fn active(&self) -> FocusTarget {
        Self::target_at(self.active)
    }

    /// Move focus and return the new active slot.
    pub fn apply(&mut self, mv: FocusMove) -> FocusTarget {
        let len = self.len();
        self.active = match mv {
            FocusMove::Next => (self.active + 1) % len,
            FocusMove::Prev => (self.active + len - 1) % len,
            FocusMove::First => 0,
            FocusMove::Last => len - 1,
        };
        self.active()
    }

    /// Set focus to a specific slot, as a pointer press does.
    ///
    /// Out-of-range item indices are ignored.
    pub fn focus(&mut self, target: FocusTarget) {
        match target {
            FocusTarget::Toggle => self.active = 0,
            FocusTarget::Item(index) if index < self.item_count => self.active = index + 1,
            FocusTarget::Item(_) => {}
        }
    }

    const fn target_at(slot: usize) -> FocusTarget {
        if slot == 0 {
            FocusTarget::Toggle
        } else {
            FocusTarget::Item(slot - 1)
        }
    }
}

/// Map a key press to a focus movement.
///
/// Tab and Shift+Tab cycle; hosts that deliver Shift+Tab as a distinct
/// back-tab key are normalized here too. Arrow keys, Home and End follow
/// the menu navigation conventions.
#[must_use]
pub fn movement_for(key: &KeyEvent) -> Option<FocusMove> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Tab if key.shift() => Some(FocusMove::Prev),
        KeyCode::Tab => Some(FocusMove::Next),
        KeyCode::BackTab => Some(FocusMove::Prev),
        KeyCode::Down => Some(FocusMove::Next),
        KeyCode::Up => Some(FocusMove::Prev),
        KeyCode::Home => Some(FocusMove::First),
        KeyCode::End => Some(FocusMove::Last),
        _ => None,
    }
}

/// Focus containment for the open drawer.
///
/// Engaging the trap decides the initial focus; releasing it reports
/// where focus must return. While engaged, focus keys are consumed even
/// when they do not change the active slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTrap {
    ring: FocusRing,
    engaged: bool,
}

impl FocusTrap {
    /// Create a disengaged trap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: FocusRing::new(0),
            engaged: false,
        }
    }

    /// Engage over `item_count` panel items and return the slot to focus.
    ///
    /// Focus lands on the first item when the panel has any, and stays on
    /// the toggle otherwise.
    pub fn engage(&mut self, item_count: usize) -> FocusTarget {
        self.ring = FocusRing::new(item_count);
        self.engaged = true;
        if item_count > 0 {
            self.ring.focus(FocusTarget::Item(0));
        }
        self.ring.active()
    }

    /// Release the trap and return the slot focus must restore to.
    pub fn release(&mut self) -> FocusTarget {
        self.engaged = false;
        self.ring = FocusRing::new(0);
        FocusTarget::Toggle
    }

    /// Whether the trap is engaged.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// The active slot, if engaged.
    #[must_use]
    pub fn active(&self) -> Option<FocusTarget> {
        self.engaged.then(|| self.ring.active())
    }

    /// Apply a movement while engaged.
    ///
    /// Returns the slot to focus, which may be the active one again in a
    /// one-slot ring. `None` when disengaged.
    pub fn apply(&mut self, mv: FocusMove) -> Option<FocusTarget> {
        if !self.engaged {
            return None;
        }
        Some(self.ring.apply(mv))
    }

    /// Handle a key press while engaged.
    ///
    /// Returns the slot to focus when the key was a focus movement, `None`
    /// when the key is not the trap's business or the trap is disengaged.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<FocusTarget> {
        movement_for(key).and_then(|mv| self.apply(mv))
    }

    /// Record focus landing on a slot, as after a pointer press.
    pub fn focus(&mut self, target: FocusTarget) {
        if self.engaged {
            self.ring.focus(target);
        }
    }
}

impl Default for FocusTrap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awning_core::event::Modifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn ring_cycles_forward_through_items_and_back_to_toggle() {
        let mut ring = FocusRing::new(2);
        assert_eq!(ring.active(), FocusTarget::Toggle);
        assert_eq!(ring.apply(FocusMove::Next), FocusTarget::Item(0));
        assert_eq!(ring.apply(FocusMove::Next), FocusTarget::Item(1));
        assert_eq!(ring.apply(FocusMove::Next), FocusTarget::Toggle);
    }

    #[test]
    fn ring_cycles_backward_from_toggle_to_last_item() {
        let mut ring = FocusRing::new(3);
        assert_eq!(ring.apply(FocusMove::Prev), FocusTarget::Item(2));
        assert_eq!(ring.apply(FocusMove::Prev), FocusTarget::Item(1));
    }

    #[test]
    fn ring_first_and_last_jump() {
        let mut ring = FocusRing::new(3);
        ring.apply(FocusMove::Next);
        assert_eq!(ring.apply(FocusMove::Last), FocusTarget::Item(2));
        assert_eq!(ring.apply(FocusMove::First), FocusTarget::Toggle);
    }

    #[test]
    fn single_slot_ring_cycles_to_itself() {
        let mut ring = FocusRing::new(0);
        assert_eq!(ring.apply(FocusMove::Next), FocusTarget::Toggle);
        assert_eq!(ring.apply(FocusMove::Prev), FocusTarget::Toggle);
    }

    #[test]
    fn pointer_focus_ignores_out_of_range_items() {
        let mut ring = FocusRing::new(2);
        ring.focus(FocusTarget::Item(1));
        assert_eq!(ring.active(), FocusTarget::Item(1));
        ring.focus(FocusTarget::Item(7));
        assert_eq!(ring.active(), FocusTarget::Item(1));
    }

    #[test]
    fn tab_moves_next_and_shift_tab_moves_prev() {
        assert_eq!(movement_for(&press(KeyCode::Tab)), Some(FocusMove::Next));
        let shift_tab = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert_eq!(movement_for(&shift_tab), Some(FocusMove::Prev));
        assert_eq!(movement_for(&press(KeyCode::BackTab)), Some(FocusMove::Prev));
    }

    #[test]
    fn arrows_home_and_end_map_to_movements() {
        assert_eq!(movement_for(&press(KeyCode::Down)), Some(FocusMove::Next));
        assert_eq!(movement_for(&press(KeyCode::Up)), Some(FocusMove::Prev));
        assert_eq!(movement_for(&press(KeyCode::Home)), Some(FocusMove::First));
        assert_eq!(movement_for(&press(KeyCode::End)), Some(FocusMove::Last));
    }

    #[test]
    fn releases_and_non_focus_keys_map_to_nothing() {
        let release = KeyEvent::new(KeyCode::Tab).with_kind(KeyEventKind::Release);
        assert_eq!(movement_for(&release), None);
        assert_eq!(movement_for(&press(KeyCode::Enter)), None);
        assert_eq!(movement_for(&press(KeyCode::Escape)), None);
    }

    #[test]
    fn engage_focuses_first_item() {
        let mut trap = FocusTrap::new();
        assert_eq!(trap.engage(3), FocusTarget::Item(0));
        assert!(trap.is_engaged());
        assert_eq!(trap.active(), Some(FocusTarget::Item(0)));
    }

    #[test]
    fn engage_with_empty_panel_keeps_toggle() {
        let mut trap = FocusTrap::new();
        assert_eq!(trap.engage(0), FocusTarget::Toggle);
        // Tab is still consumed and re-asserts the toggle.
        assert_eq!(
            trap.handle_key(&press(KeyCode::Tab)),
            Some(FocusTarget::Toggle)
        );
    }

    #[test]
    fn release_restores_toggle() {
        let mut trap = FocusTrap::new();
        trap.engage(2);
        assert_eq!(trap.release(), FocusTarget::Toggle);
        assert!(!trap.is_engaged());
        assert_eq!(trap.active(), None);
    }

    #[test]
    fn disengaged_trap_ignores_keys() {
        let mut trap = FocusTrap::new();
        assert_eq!(trap.handle_key(&press(KeyCode::Tab)), None);
    }

    #[test]
    fn trap_cycles_from_first_item() {
        let mut trap = FocusTrap::new();
        trap.engage(2);
        assert_eq!(
            trap.handle_key(&press(KeyCode::Tab)),
            Some(FocusTarget::Item(1))
        );
        assert_eq!(
            trap.handle_key(&press(KeyCode::Tab)),
            Some(FocusTarget::Toggle)
        );
        assert_eq!(
            trap.handle_key(&press(KeyCode::Tab)),
            Some(FocusTarget::Item(0))
        );
    }

    #[test]
    fn trap_records_pointer_focus() {
        let mut trap = FocusTrap::new();
        trap.engage(3);
        trap.focus(FocusTarget::Item(2));
        assert_eq!(
            trap.handle_key(&press(KeyCode::Tab)),
            Some(FocusTarget::Toggle)
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn moves() -> impl Strategy<Value = FocusMove> {
            prop_oneof![
                Just(FocusMove::Next),
                Just(FocusMove::Prev),
                Just(FocusMove::First),
                Just(FocusMove::Last),
            ]
        }

        proptest! {
            #[test]
            fn active_slot_never_leaves_the_ring(
                item_count in 0usize..12,
                seq in proptest::collection::vec(moves(), 0..64),
            ) {
                let mut ring = FocusRing::new(item_count);
                for mv in seq {
                    match ring.apply(mv) {
                        FocusTarget::Toggle => {}
                        FocusTarget::Item(index) => prop_assert!(index < item_count),
                    }
                }
            }

            #[test]
            fn next_and_prev_invert_from_any_slot(
                item_count in 0usize..12,
                seq in proptest::collection::vec(moves(), 0..32),
            ) {
                let mut ring = FocusRing::new(item_count);
                for mv in seq {
                    ring.apply(mv);
                }
                let before = ring.active();
                ring.apply(FocusMove::Next);
                ring.apply(FocusMove::Prev);
                prop_assert_eq!(ring.active(), before);
                ring.apply(FocusMove::Prev);
                ring.apply(FocusMove::Next);
                prop_assert_eq!(ring.active(), before);
            }

            #[test]
            fn full_forward_cycle_is_identity(
                item_count in 0usize..12,
                seq in proptest::collection::vec(moves(), 0..16),
            ) {
                let mut ring = FocusRing::new(item_count);
                for mv in seq {
                    ring.apply(mv);
                }
                let before = ring.active();
                for _ in 0..ring.len() {
                    ring.apply(FocusMove::Next);
                }
                prop_assert_eq!(ring.active(), before);
            }
        }
    }
}
