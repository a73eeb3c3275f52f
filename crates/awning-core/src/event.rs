#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the standard event types used throughout awning for
//! input handling. Hosts translate their native input (DOM listeners,
//! terminal backends, test drivers) into these types once, at the edge.
//!
//! # Design Notes
//!
//! - Pointer coordinates and scroll offsets are `f64` in logical pixels,
//!   matching what host environments report. Events therefore derive
//!   `PartialEq` but not `Eq`.
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish
//! - `Modifiers` use bitflags for easy combination
//! - `Scroll` carries an absolute offset sample; relative wheel deltas are a
//!   separate `Wheel` event so hosts can feed either form

use bitflags::bitflags;

/// Canonical input event.
///
/// This enum represents all possible input events that awning can receive
/// from a host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer event (mouse, touch, or pen).
    Pointer(PointerEvent),

    /// Relative wheel movement.
    ///
    /// `delta_y` is the vertical wheel delta in logical pixels; positive
    /// values scroll the document down. Horizontal wheel movement does not
    /// affect the chrome and is not modeled.
    Wheel {
        /// Vertical wheel delta in logical pixels.
        delta_y: f64,
    },

    /// An absolute scroll position sample.
    Scroll {
        /// Current vertical scroll offset in logical pixels, from the top.
        offset: f64,
    },

    /// The viewport was resized.
    Resize {
        /// New viewport width in logical pixels.
        width: u32,
        /// New viewport height in logical pixels.
        height: u32,
    },

    /// A page lifecycle boundary (initial load or client-side navigation).
    ///
    /// Hosts with soft navigation re-deliver this event on every transition;
    /// the chrome resets to its baseline state each time it is received.
    PageLoad,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Meta/Command modifier is held.
    #[must_use]
    pub const fn meta(&self) -> bool {
        self.modifiers.contains(Modifiers::META)
    }
}

/// Key codes for keyboard events.
///
/// Only keys the chrome reacts to are modeled. Hosts drop anything else at
/// the translation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Meta/Command key.
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// X coordinate in logical pixels (leftmost edge is 0).
    pub x: f64,

    /// Y coordinate in logical pixels (topmost edge is 0).
    pub y: f64,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer button pressed down.
    Down(PointerButton),

    /// Pointer button released.
    Up(PointerButton),

    /// Pointer moved (with or without a button held).
    Move,
}

/// Pointer button identifiers, following the host convention of naming
/// buttons by role rather than physical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button (usually the left mouse button, or a touch contact).
    Primary,

    /// Secondary button (usually the right mouse button).
    Secondary,

    /// Auxiliary button (usually the middle/wheel button).
    Auxiliary,
}

// ---------------------------------------------------------------------------
// Crossterm compatibility
// ---------------------------------------------------------------------------

/// Pixels of scroll attributed to one terminal wheel tick (one text line).
#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
const WHEEL_STEP: f64 = 16.0;

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
impl InputEvent {
    /// Convert a Crossterm event into an awning event.
    ///
    /// Returns `None` for events the chrome has no use for (focus changes,
    /// paste, unmapped keys). Wheel ticks are converted at one text line per
    /// tick; resize dimensions are reported in terminal cells, so terminal
    /// hosts should configure a column-based breakpoint.
    #[must_use]
    pub fn from_crossterm(event: &crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as CtEvent, MouseEventKind as CtMouseKind};

        match event {
            CtEvent::Key(key) => {
                let code = keycode_from_crossterm(key.code)?;
                let kind = match key.kind {
                    crossterm::event::KeyEventKind::Press => KeyEventKind::Press,
                    crossterm::event::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    crossterm::event::KeyEventKind::Release => KeyEventKind::Release,
                };
                Some(Self::Key(
                    KeyEvent::new(code)
                        .with_modifiers(modifiers_from_crossterm(key.modifiers))
                        .with_kind(kind),
                ))
            }
            CtEvent::Mouse(mouse) => {
                let x = f64::from(mouse.column);
                let y = f64::from(mouse.row);
                let modifiers = modifiers_from_crossterm(mouse.modifiers);
                let kind = match mouse.kind {
                    CtMouseKind::Down(button) => {
                        PointerEventKind::Down(button_from_crossterm(button))
                    }
                    CtMouseKind::Up(button) => PointerEventKind::Up(button_from_crossterm(button)),
                    CtMouseKind::Drag(_) | CtMouseKind::Moved => PointerEventKind::Move,
                    CtMouseKind::ScrollDown => return Some(Self::Wheel { delta_y: WHEEL_STEP }),
                    CtMouseKind::ScrollUp => return Some(Self::Wheel { delta_y: -WHEEL_STEP }),
                    CtMouseKind::ScrollLeft | CtMouseKind::ScrollRight => return None,
                };
                Some(Self::Pointer(
                    PointerEvent::new(kind, x, y).with_modifiers(modifiers),
                ))
            }
            CtEvent::Resize(width, height) => Some(Self::Resize {
                width: u32::from(*width),
                height: u32::from(*height),
            }),
            CtEvent::FocusGained | CtEvent::FocusLost | CtEvent::Paste(_) => None,
        }
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn keycode_from_crossterm(code: crossterm::event::KeyCode) -> Option<KeyCode> {
    use crossterm::event::KeyCode as CtKeyCode;

    match code {
        CtKeyCode::Char(c) => Some(KeyCode::Char(c)),
        CtKeyCode::Enter => Some(KeyCode::Enter),
        CtKeyCode::Esc => Some(KeyCode::Escape),
        CtKeyCode::Tab => Some(KeyCode::Tab),
        CtKeyCode::BackTab => Some(KeyCode::BackTab),
        CtKeyCode::Home => Some(KeyCode::Home),
        CtKeyCode::End => Some(KeyCode::End),
        CtKeyCode::PageUp => Some(KeyCode::PageUp),
        CtKeyCode::PageDown => Some(KeyCode::PageDown),
        CtKeyCode::Up => Some(KeyCode::Up),
        CtKeyCode::Down => Some(KeyCode::Down),
        CtKeyCode::Left => Some(KeyCode::Left),
        CtKeyCode::Right => Some(KeyCode::Right),
        _ => None,
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn modifiers_from_crossterm(modifiers: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event::KeyModifiers as CtModifiers;

    let mut out = Modifiers::NONE;
    if modifiers.contains(CtModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(CtModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(CtModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if modifiers.contains(CtModifiers::SUPER) || modifiers.contains(CtModifiers::META) {
        out |= Modifiers::META;
    }
    out
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn button_from_crossterm(button: crossterm::event::MouseButton) -> PointerButton {
    use crossterm::event::MouseButton as CtButton;

    match button {
        CtButton::Left => PointerButton::Primary,
        CtButton::Right => PointerButton::Secondary,
        CtButton::Middle => PointerButton::Auxiliary,
    }
}
