#![forbid(unsafe_code)]

//! Classify canonical input into chrome intents.
//!
//! Classification is purely syntactic: an Escape press becomes a dismiss
//! intent whether or not the drawer is open. The state machines already
//! no-op on intents that do not apply to their current phase, so keeping
//! state out of this layer means every event maps to at most one intent
//! and the mapping can be tested exhaustively.
//!
//! Pointer handling follows the hit contract in [`crate::parts`]: the
//! host resolves the hit, this layer only interprets it. Only primary
//! button presses count; moves, releases and secondary buttons fall
//! through untouched.

use awning_core::event::{
    InputEvent, KeyCode, KeyEventKind, PointerButton, PointerEventKind,
};
use awning_core::viewport::ViewportSize;

use crate::drawer::CloseReason;
use crate::focus::{self, FocusMove};
use crate::parts::PartId;

/// What an item activation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationTarget {
    /// The slot currently holding focus.
    Focused,
    /// A specific panel item, from a pointer hit.
    Item(usize),
}

/// A semantic chrome operation derived from one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Flip the drawer, from a toggle press.
    Toggle,
    /// Close the drawer for the given reason.
    Dismiss(CloseReason),
    /// Activate a panel item.
    Activate(ActivationTarget),
    /// Move focus inside the trap.
    Focus(FocusMove),
    /// An absolute scroll offset was reported.
    Scroll(f64),
    /// A wheel or gesture moved the page by a delta.
    Wheel(f64),
    /// The viewport was resized.
    Viewport(ViewportSize),
    /// A fresh page install was requested.
    Reinstall,
}

/// Map one event to at most one intent.
#[must_use]
pub fn classify(event: &InputEvent, hit: Option<PartId>) -> Option<Intent> {
    match event {
        InputEvent::Key(key) => {
            if let Some(mv) = focus::movement_for(key) {
                return Some(Intent::Focus(mv));
            }
            if key.kind != KeyEventKind::Press {
                return None;
            }
            match key.code {
                KeyCode::Escape => Some(Intent::Dismiss(CloseReason::Escape)),
                KeyCode::Enter | KeyCode::Char(' ')
                    if !key.ctrl() && !key.alt() && !key.meta() =>
                {
                    Some(Intent::Activate(ActivationTarget::Focused))
                }
                _ => None,
            }
        }
        InputEvent::Pointer(pointer) => {
            if pointer.kind != PointerEventKind::Down(PointerButton::Primary) {
                return None;
            }
            match hit? {
                PartId::Toggle => Some(Intent::Toggle),
                PartId::Backdrop => Some(Intent::Dismiss(CloseReason::Backdrop)),
                PartId::Item(index) => Some(Intent::Activate(ActivationTarget::Item(index))),
                PartId::Bar | PartId::Panel => None,
            }
        }
        InputEvent::Scroll { offset } => Some(Intent::Scroll(*offset)),
        InputEvent::Wheel { delta_y } => Some(Intent::Wheel(*delta_y)),
        InputEvent::Resize { width, height } => {
            Some(Intent::Viewport(ViewportSize::new(*width, *height)))
        }
        InputEvent::PageLoad => Some(Intent::Reinstall),
    }
}
