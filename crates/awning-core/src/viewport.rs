#![forbid(unsafe_code)]

//! Viewport size classification.
//!
//! The chrome behaves differently on narrow and wide viewports: the drawer
//! only exists on narrow ones, and crossing the breakpoint while it is open
//! forces it closed. This module owns the classification so every consumer
//! agrees on where the boundary sits and which side is inclusive.

/// Viewport dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSize {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl ViewportSize {
    /// Create a new viewport size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Width threshold separating compact and wide viewports.
///
/// A viewport is [`Wide`](ViewportClass::Wide) when its width is greater than
/// or equal to `min_width`; the boundary value itself is wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    /// Minimum width (inclusive) classified as wide.
    pub min_width: u32,
}

impl Breakpoint {
    /// Default boundary between compact and wide layouts (default: 768).
    pub const DEFAULT_MIN_WIDTH: u32 = 768;

    /// Create a breakpoint at the given minimum wide width.
    #[must_use]
    pub const fn at(min_width: u32) -> Self {
        Self { min_width }
    }

    /// Classify a viewport against this breakpoint.
    #[must_use]
    #[inline]
    pub const fn classify(&self, size: ViewportSize) -> ViewportClass {
        if size.width >= self.min_width {
            ViewportClass::Wide
        } else {
            ViewportClass::Compact
        }
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::at(Self::DEFAULT_MIN_WIDTH)
    }
}

/// Which side of the breakpoint a viewport falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewportClass {
    /// Narrower than the breakpoint; the drawer is available.
    Compact,

    /// At or beyond the breakpoint; navigation is inline and the drawer
    /// must not remain open.
    Wide,
}

impl ViewportClass {
    /// True for [`ViewportClass::Wide`].
    #[must_use]
    #[inline]
    pub const fn is_wide(self) -> bool {
        matches!(self, Self::Wide)
    }

    /// True for [`ViewportClass::Compact`].
    #[must_use]
    #[inline]
    pub const fn is_compact(self) -> bool {
        matches!(self, Self::Compact)
    }
}
