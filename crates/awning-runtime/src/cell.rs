#![forbid(unsafe_code)]

//! Lock-free snapshot publication.
//!
//! The shell mutates chrome state on one thread; render or observer threads
//! only ever need the latest [`ChromeSnapshot`]. [`SnapshotCell`] publishes
//! snapshots through an [`arc_swap::ArcSwap`] so readers are wait-free and
//! never observe a torn state.
//!
//! Readers hold a [`SnapshotReader`], a cheap cloneable handle that stays
//! valid after the shell is disposed (it keeps serving the final snapshot).

use std::sync::Arc;

use arc_swap::ArcSwap;
use awning_chrome::ChromeSnapshot;

/// Single-writer, many-reader cell holding the latest published snapshot.
#[derive(Debug)]
pub struct SnapshotCell {
    inner: ArcSwap<ChromeSnapshot>,
}

impl SnapshotCell {
    /// Create a cell seeded with an initial snapshot.
    #[must_use]
    pub fn new(initial: ChromeSnapshot) -> Self {
        Self {
            inner: ArcSwap::from_pointee(initial),
        }
    }

    /// Atomically replace the published snapshot.
    pub fn publish(&self, snapshot: ChromeSnapshot) {
        self.inner.store(Arc::new(snapshot));
    }

    /// Load the current snapshot.
    ///
    /// The returned `Arc` stays valid however many times the cell is
    /// republished afterward.
    #[must_use]
    pub fn load(&self) -> Arc<ChromeSnapshot> {
        self.inner.load_full()
    }

    /// Read without bumping the refcount.
    ///
    /// Prefer this for short-lived reads on hot paths.
    #[must_use]
    pub fn load_ref(&self) -> arc_swap::Guard<Arc<ChromeSnapshot>> {
        self.inner.load()
    }
}

/// Cloneable read handle onto a [`SnapshotCell`].
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    cell: Arc<SnapshotCell>,
}

impl SnapshotReader {
    pub(crate) fn new(cell: Arc<SnapshotCell>) -> Self {
        Self { cell }
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<ChromeSnapshot> {
        self.cell.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awning_chrome::label::ToggleLabels;

    fn initial() -> ChromeSnapshot {
        ChromeSnapshot::initial(&ToggleLabels::default())
    }

    #[test]
    fn load_returns_seed_before_any_publish() {
        let cell = SnapshotCell::new(initial());
        assert_eq!(*cell.load(), initial());
    }

    #[test]
    fn publish_replaces_snapshot() {
        let cell = SnapshotCell::new(initial());
        let next = ChromeSnapshot::initial(&ToggleLabels::new("Show menu", "Hide menu"));
        cell.publish(next.clone());
        assert_eq!(*cell.load(), next);
    }

    #[test]
    fn old_handles_survive_republish() {
        let cell = SnapshotCell::new(initial());
        let before = cell.load();
        cell.publish(ChromeSnapshot::initial(&ToggleLabels::new("A", "B")));
        assert_eq!(*before, initial());
    }

    #[test]
    fn readers_observe_publishes_across_threads() {
        let cell = Arc::new(SnapshotCell::new(initial()));
        let reader = SnapshotReader::new(Arc::clone(&cell));

        let next = ChromeSnapshot::initial(&ToggleLabels::new("Show", "Hide"));
        let writer = {
            let cell = Arc::clone(&cell);
            let next = next.clone();
            std::thread::spawn(move || cell.publish(next))
        };
        writer.join().unwrap();
        assert_eq!(*reader.current(), next);
    }
}
