#![forbid(unsafe_code)]

//! Test helpers for constructing input events.
//!
//! Enabled with the `test-helpers` feature so downstream crates can build
//! event streams without spelling out every struct field.

use crate::event::{
    InputEvent, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerEventKind,
};

/// A key press with no modifiers.
#[must_use]
pub fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code))
}

/// A key press with modifiers.
#[must_use]
pub fn chord(code: KeyCode, modifiers: Modifiers) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code).with_modifiers(modifiers))
}

/// A primary-button press at the given position.
#[must_use]
pub fn press(x: f64, y: f64) -> InputEvent {
    InputEvent::Pointer(PointerEvent::new(
        PointerEventKind::Down(PointerButton::Primary),
        x,
        y,
    ))
}

/// A primary-button release at the given position.
#[must_use]
pub fn release(x: f64, y: f64) -> InputEvent {
    InputEvent::Pointer(PointerEvent::new(
        PointerEventKind::Up(PointerButton::Primary),
        x,
        y,
    ))
}

/// An absolute scroll offset sample.
#[must_use]
pub fn scroll(offset: f64) -> InputEvent {
    InputEvent::Scroll { offset }
}

/// A relative wheel tick.
#[must_use]
pub fn wheel(delta_y: f64) -> InputEvent {
    InputEvent::Wheel { delta_y }
}

/// A viewport resize.
#[must_use]
pub fn resize(width: u32, height: u32) -> InputEvent {
    InputEvent::Resize { width, height }
}

/// A page lifecycle boundary.
#[must_use]
pub fn page_load() -> InputEvent {
    InputEvent::PageLoad
}
