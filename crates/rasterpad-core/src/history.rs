//! Undo/redo history of full raster snapshots.

use crate::snapshot::Snapshot;

/// Linear undo/redo history.
///
/// Both stacks hold complete snapshots with the most recent entry last.
/// There is no depth limit.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Undo history stack.
    undo_stack: Vec<Snapshot>,
    /// Redo history stack.
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed canvas state.
    ///
    /// Any pending redo entries are discarded.
    pub fn push_snapshot(&mut self, current: Snapshot) {
        self.undo_stack.push(current);
        self.redo_stack.clear();
        log::debug!("History push: undo={} redo=0", self.undo_stack.len());
    }

    /// Undo the last change.
    ///
    /// `current` is the canvas state being replaced; it is saved on the redo
    /// stack. Returns the snapshot to render, or `None` if there is nothing
    /// to undo (in which case `current` is dropped and nothing changes).
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Redo the last undone change.
    ///
    /// Returns the snapshot to render, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(snapshot)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Most recent entry on the undo stack.
    pub fn peek_undo(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    /// Most recent entry on the redo stack.
    pub fn peek_redo(&self) -> Option<&Snapshot> {
        self.redo_stack.last()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
