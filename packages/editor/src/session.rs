//! # Designer Session
//!
//! One designer editing one screen: the document, its history, the
//! current selection, in-progress row resizes and the presentation
//! pipeline, persisted through a [`LayoutHost`].
//!
//! All edits go through [`DesignerSession::apply`], which is the single
//! writer of the tree. Subscribers only ever see complete snapshots.

use std::sync::Arc;

use tessera_document::{Edit, Path};
use tessera_layout::{Drag, RowResizeTable, RowSizing};
use tessera_style::ResolveContext;
use tracing::{debug, info};

use crate::document::LayoutDocument;
use crate::errors::EditorError;
use crate::host::LayoutHost;
use crate::mutations::Mutation;
use crate::pipeline::{Observer, Pipeline, Snapshot, SubscriptionId};
use crate::undo_stack::UndoStack;

/// Session options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub context: ResolveContext,
    /// Maximum number of undo levels (0 = unlimited)
    pub undo_levels: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            context: ResolveContext::light(),
            undo_levels: 100,
        }
    }
}

pub struct DesignerSession<H: LayoutHost> {
    host: H,
    document: LayoutDocument,
    pipeline: Pipeline,
    history: UndoStack,
    resizes: RowResizeTable,
    selection: Option<Path>,
}

impl<H: LayoutHost> DesignerSession<H> {
    /// Load `screen_id` from the host and publish the first snapshot
    pub fn open(host: H, screen_id: &str, options: SessionOptions) -> Result<Self, EditorError> {
        let tree = host.load_layout(screen_id)?;
        info!(screen = screen_id, nodes = tree.node_count(), "Opened screen");

        let mut session = Self {
            host,
            document: LayoutDocument::new(screen_id, tree),
            pipeline: Pipeline::new(options.context),
            history: UndoStack::with_max_levels(options.undo_levels),
            resizes: RowResizeTable::new(),
            selection: None,
        };
        session.pipeline.publish(&session.document);
        Ok(session)
    }

    /// Apply a mutation, record history and publish a new snapshot
    pub fn apply(&mut self, mutation: Mutation) -> Result<Edit, EditorError> {
        let before = self.document.tree().clone();
        let edit = self.document.apply(&mutation)?;
        if !edit.is_applied() {
            return Ok(edit);
        }

        self.history.record_described(before, Some(mutation.describe()));
        if mutation.is_structural() {
            // Paths of tracked rows may have shifted
            self.resizes.clear();
        }
        self.update_selection(&mutation, &edit);
        self.pipeline.publish(&self.document);
        Ok(edit)
    }

    /// Apply several mutations as one undo step. Stops at the first error;
    /// mutations applied before it are kept.
    pub fn apply_all(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
        description: Option<&str>,
    ) -> Result<Vec<Edit>, EditorError> {
        self.history.begin_batch();
        if let Some(description) = description {
            self.history.set_batch_description(description);
        }
        let mut edits = Vec::new();
        let mut result = Ok(());
        for mutation in mutations {
            match self.apply(mutation) {
                Ok(edit) => edits.push(edit),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        self.history.end_batch();
        result.map(|_| edits)
    }

    fn update_selection(&mut self, mutation: &Mutation, edit: &Edit) {
        match mutation {
            Mutation::Remove { .. } => self.selection = None,
            Mutation::EnsureContainer { path } => self.selection = Some(path.clone()),
            Mutation::SetTopLevel { .. } | Mutation::CommitWeights { .. } => {}
            _ => self.selection = Some(edit.path.clone()),
        }
    }

    /// Select the node at `path`. Returns false (and clears the selection)
    /// if nothing resolves there.
    pub fn select(&mut self, path: Path) -> bool {
        if self.document.tree().resolve_node(&path).is_some() {
            self.selection = Some(path);
            true
        } else {
            self.selection = None;
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_ref()
    }

    /// Start resizing a row. `None` if `row` is not a row.
    pub fn begin_resize(&mut self, row: &Path) -> Option<RowSizing> {
        self.resizes.begin(self.document.tree(), row).cloned()
    }

    /// Live drag update. The tree is untouched until [`Self::end_resize`].
    pub fn drag_resize(&mut self, row: &Path, index: usize, drag: &Drag) -> Option<RowSizing> {
        self.resizes.drag(row, index, drag).cloned()
    }

    /// Finish a resize, committing the sizing as one undoable mutation
    pub fn end_resize(&mut self, row: &Path) -> Result<Option<Edit>, EditorError> {
        let Some(sizing) = self.resizes.finish(row) else {
            return Ok(None);
        };
        self.apply(Mutation::CommitWeights {
            row: row.clone(),
            sizing,
        })
        .map(Some)
    }

    pub fn cancel_resize(&mut self, row: &Path) {
        self.resizes.finish(row);
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.document.tree()) {
            Some(tree) => {
                self.restore(tree);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.document.tree()) {
            Some(tree) => {
                self.restore(tree);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, tree: tessera_document::Tree) {
        self.document.replace_tree(tree);
        self.resizes.clear();
        if let Some(path) = self.selection.take() {
            self.select(path);
        }
        debug!(
            screen = %self.document.screen_id,
            version = self.document.version,
            "Restored history entry"
        );
        self.pipeline.publish(&self.document);
    }

    /// Save the current tree as a draft
    pub fn save_draft(&mut self) -> Result<bool, EditorError> {
        let saved = self
            .host
            .save_draft(&self.document.screen_id, self.document.tree())?;
        self.document.mark_saved();
        Ok(saved)
    }

    /// Save pending changes and promote the draft
    pub fn publish(&mut self) -> Result<bool, EditorError> {
        if self.document.is_dirty() {
            self.save_draft()?;
        }
        Ok(self.host.publish(&self.document.screen_id)?)
    }

    /// Switch theme and re-derive
    pub fn set_context(&mut self, context: ResolveContext) {
        self.pipeline.set_context(context);
        self.pipeline.publish(&self.document);
    }

    pub fn context(&self) -> &ResolveContext {
        self.pipeline.context()
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.pipeline.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.pipeline.unsubscribe(id)
    }

    /// Most recent snapshot
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.pipeline.latest()
    }

    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
