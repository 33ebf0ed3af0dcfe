//! Edit history (undo/redo) as a linear list of whole-state snapshots.
//!
//! Content is shared behind an `Arc`, so a snapshot costs a pointer copy plus the
//! source map handles rather than a deep copy of the document.

use crate::model::{Cursor, Document, Selection};

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Editor state captured before a structural edit
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub document: Document,
    pub cursor: Cursor,
    pub selection: Option<Selection>,
}

/// Edit history with undo/redo stacks.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditorSnapshot>,
    redo_stack: Vec<EditorSnapshot>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record the state before an edit (clears redo stack)
    pub fn push(&mut self, snapshot: EditorSnapshot) {
        self.redo_stack.clear();
        self.undo_stack.push(snapshot);

        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Step back: returns the state to restore, remembering `current` for redo
    pub fn undo(&mut self, current: EditorSnapshot) -> Option<EditorSnapshot> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Step forward: returns the state to restore, remembering `current` for undo
    pub fn redo(&mut self, current: EditorSnapshot) -> Option<EditorSnapshot> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(snapshot)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
