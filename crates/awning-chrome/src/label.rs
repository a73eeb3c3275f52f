#![forbid(unsafe_code)]

//! Toggle labels and display-width fitting for constrained hosts.
//!
//! The toggle button announces its action, not its state: "Open navigation
//! menu" while the drawer is closed and "Close navigation menu" while it is
//! open. The same string feeds both the accessible name and any visible
//! tooltip, so it swaps in the same ordered effect step as `aria-expanded`.
//!
//! Width fitting exists for hosts that render labels into fixed-width
//! chrome (status strips, terminal embeddings). Truncation happens at
//! grapheme boundaries so combining marks and emoji sequences never split.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Accessible-name pair for the drawer toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct ToggleLabels {
    open: String,
    close: String,
}

impl ToggleLabels {
    /// Create a label pair.
    ///
    /// `open` is announced while the drawer is closed (the action the
    /// button performs), `close` while it is open.
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Label for the current expanded state.
    #[must_use]
    pub fn for_expanded(&self, expanded: bool) -> &str {
        if expanded { &self.close } else { &self.open }
    }
}

impl Default for ToggleLabels {
    fn default() -> Self {
        Self::new("Open navigation menu", "Close navigation menu")
    }
}

/// Display width of a string in terminal columns.
///
/// ASCII text takes the byte-length fast path. Everything else is
/// segmented into grapheme clusters and measured per cluster, so ZWJ
/// emoji sequences and combining marks count once.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.len();
    }
    text.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Fit a label into `max_width` columns, truncating with an ellipsis.
///
/// Returns the input unchanged when it already fits. Truncation never
/// splits a grapheme cluster; if even the ellipsis does not fit the
/// result is empty.
#[must_use]
pub fn fit_label(text: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(text) <= max_width {
        return Cow::Borrowed(text);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push('\u{2026}');
    Cow::Owned(out)
}
