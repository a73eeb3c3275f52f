#![forbid(unsafe_code)]

//! Chrome part identities and the mounted-part set.
//!
//! The host owns the actual UI tree. It tells the controller which chrome
//! parts exist via [`Parts`] and resolves pointer events to a [`PartId`]
//! before forwarding them. Parts that were never mounted simply do not
//! appear in the set, and every operation touching them degrades to a
//! silent no-op rather than an error.
//!
//! # Hit contract
//!
//! Hosts resolve hits themselves (DOM hosts from event targets, terminal
//! hosts from hit-test regions) and pass `Option<PartId>`. `None` means
//! the pointer landed outside any chrome part.

use bitflags::bitflags;

/// Identity of a single chrome part, as resolved by the host's hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum PartId {
    /// The navigation bar strip itself.
    Bar,
    /// The hamburger toggle button.
    Toggle,
    /// The drawer panel containing navigation items.
    Panel,
    /// The dimming backdrop behind an open drawer.
    Backdrop,
    /// A single item inside the panel, by index.
    Item(usize),
}

bitflags! {
    /// Which chrome parts the host actually mounted.
    ///
    /// Item presence is implied by the panel item list, not tracked here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Parts: u8 {
        /// Navigation bar is present.
        const BAR = 1;
        /// Toggle button is present.
        const TOGGLE = 1 << 1;
        /// Drawer panel is present.
        const PANEL = 1 << 2;
        /// Backdrop element is present.
        const BACKDROP = 1 << 3;
    }
}

impl Parts {
    /// Whether the drawer wiring is viable.
    ///
    /// Both the toggle and the panel must exist. A page shipping only one
    /// of the two gets no drawer behavior at all, matching the silent
    /// degradation contract for partial markup.
    #[must_use]
    pub const fn has_drawer(self) -> bool {
        self.contains(Parts::TOGGLE.union(Parts::PANEL))
    }

    /// Whether scroll-driven bar visibility is viable.
    #[must_use]
    pub const fn has_bar(self) -> bool {
        self.contains(Parts::BAR)
    }
}

/// What activating a panel item means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum PanelItemKind {
    /// Navigates away. Activation schedules a deferred drawer close so the
    /// pressed state stays visible while navigation begins.
    Link,
    /// Performs an in-page action. The drawer stays open.
    Button,
}

/// A single entry in the drawer panel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelItem {
    label: String,
    kind: PanelItemKind,
}

impl PanelItem {
    /// Create a navigation link item.
    #[must_use]
    pub fn link(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: PanelItemKind::Link,
        }
    }

    /// Create an in-page action item.
    #[must_use]
    pub fn button(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: PanelItemKind::Button,
        }
    }

    /// Item label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Item kind.
    #[must_use]
    pub const fn kind(&self) -> PanelItemKind {
        self.kind
    }
}
