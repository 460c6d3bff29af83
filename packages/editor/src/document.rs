//! # Layout Document
//!
//! One screen's layout and its editing state.
//!
//! ```text
//! Load → Edit → Derive → Save
//!   ↓      ↓       ↓        ↓
//! Host  Mutations Snapshot Host
//! ```

use tessera_document::{Edit, Tree};
use tracing::debug;

use crate::mutations::{Mutation, MutationError};

/// Editable layout of a single screen
#[derive(Debug, Clone)]
pub struct LayoutDocument {
    /// Screen identifier, also the host's storage key
    pub screen_id: String,

    /// Increments on every effective change
    pub version: u64,

    tree: Tree,
    dirty: bool,
}

impl LayoutDocument {
    pub fn new(screen_id: impl Into<String>, tree: Tree) -> Self {
        Self {
            screen_id: screen_id.into(),
            version: 0,
            tree,
            dirty: false,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Apply a mutation. No-ops leave version and dirty flag untouched.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<Edit, MutationError> {
        let edit = mutation.apply(&mut self.tree)?;
        if edit.is_applied() {
            self.version += 1;
            self.dirty = true;
            debug!(
                screen = %self.screen_id,
                version = self.version,
                path = %edit.path,
                "Applied mutation"
            );
        }
        Ok(edit)
    }

    /// Swap in a whole tree (undo/redo, reload). The incoming tree's
    /// generation is advanced past the current one.
    pub fn replace_tree(&mut self, mut tree: Tree) {
        tree.advance_generation(self.tree.generation());
        self.tree = tree;
        self.version += 1;
        self.dirty = true;
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}
