//! # Undo/Redo Stack
//!
//! Tracks tree history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each effective change records the tree as it was *before* the change
//! - Trees are copy-on-write, so a history entry shares every untouched
//!   node with the live tree
//! - Undo swaps the recorded tree in and moves the current one to redo
//! - New changes clear the redo stack
//! - Supports batched operations (group multiple changes as one undo step)
//!
//! ## Example
//!
//! ```rust
//! use tessera_document::Tree;
//! use tessera_editor::UndoStack;
//!
//! let mut stack = UndoStack::new();
//! let before = Tree::new();
//! stack.record(before.clone());
//!
//! let current = Tree::new();
//! let restored = stack.undo(&current).unwrap();
//! assert_eq!(restored, before);
//! ```

use tessera_document::Tree;
use tracing::trace;

/// One undo step: the tree to restore
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub tree: Tree,

    /// Optional description of this step
    pub description: Option<String>,
}

#[derive(Debug)]
struct Batch {
    before: Option<Tree>,
    description: Option<String>,
}

/// Undo/redo stack for layout editing
#[derive(Debug)]
pub struct UndoStack {
    /// Trees before each applied step (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Trees before each undone step (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<Batch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
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

    /// Record the tree as it was before an effective change
    pub fn record(&mut self, before: Tree) {
        self.record_described(before, None);
    }

    pub fn record_described(&mut self, before: Tree, description: Option<String>) {
        if let Some(batch) = &mut self.current_batch {
            // Only the state before the first change of a batch matters
            if batch.before.is_none() {
                batch.before = Some(before);
            }
            if batch.description.is_none() {
                batch.description = description;
            }
        } else {
            self.push_entry(HistoryEntry {
                tree: before,
                description,
            });
        }
    }

    /// Start a batch of changes (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(Batch {
            before: None,
            description: None,
        });
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(Batch {
            before: Some(tree),
            description,
        }) = self.current_batch.take()
        {
            self.push_entry(HistoryEntry { tree, description });
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
        trace!(levels = self.undo_stack.len(), "Recorded undo step");
    }

    /// Undo the most recent step. Returns the tree to restore, or `None`
    /// when there is nothing to undo.
    pub fn undo(&mut self, current: &Tree) -> Option<Tree> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            tree: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.tree)
    }

    /// Redo the most recently undone step
    pub fn redo(&mut self, current: &Tree) -> Option<Tree> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            tree: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.tree)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
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

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
