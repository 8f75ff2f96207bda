//! # Undo/Redo Stack
//!
//! Tracks layout history as whole-state snapshots.
//!
//! ## Design
//!
//! - The state *before* each applied action is recorded with the action's description
//! - Undo swaps the current state for the latest snapshot and keeps the current one for redo
//! - New actions clear the redo stack
//! - Batches collapse several actions into one undo step (e.g. deleting a section)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::with_max_levels(50);
//!
//! stack.record(before.clone(), "Added component");
//!
//! if let Some(previous) = stack.undo(current.clone()) {
//!     current = previous;
//! }
//! ```

use crate::model::LayoutState;

/// One undo step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// State to restore
    pub snapshot: LayoutState,

    /// What the step did, e.g. "Added component"
    pub description: String,
}

/// Undo/redo stack for layout editing
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots taken before applied actions (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Snapshots taken before undos (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Open batch: the first snapshot recorded after `begin_batch`
    current_batch: Option<(Option<LayoutState>, String)>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (50)
    pub fn new() -> Self {
        Self::with_max_levels(50)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the state as it was before an action
    pub fn record(&mut self, before: LayoutState, description: impl Into<String>) {
        if let Some((first, _)) = &mut self.current_batch {
            if first.is_none() {
                *first = Some(before);
            }
            return;
        }

        self.push_entry(HistoryEntry {
            snapshot: before,
            description: description.into(),
        });
    }

    /// Start a batch; every action until `end_batch` becomes one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.current_batch = Some((None, description.into()));
    }

    /// End the current batch and push it if anything was recorded
    pub fn end_batch(&mut self) {
        if let Some((Some(snapshot), description)) = self.current_batch.take() {
            self.push_entry(HistoryEntry {
                snapshot,
                description,
            });
        }
    }

    pub fn in_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
    }

    /// Step back; `current` is kept for redo. Returns the state to restore.
    pub fn undo(&mut self, current: LayoutState) -> Option<LayoutState> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            snapshot: current,
            description: entry.description,
        });
        Some(entry.snapshot)
    }

    /// Step forward again; `current` goes back on the undo stack
    pub fn redo(&mut self, current: LayoutState) -> Option<LayoutState> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            snapshot: current,
            description: entry.description,
        });
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|e| e.description.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.description.as_str())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
