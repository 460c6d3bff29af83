//! # Layout Mutations
//!
//! Serializable commands over a layout tree. Each variant maps onto one
//! tree operation, so a recorded list of mutations replays to the same
//! tree.
//!
//! ## Semantics
//!
//! - Paths are resolved against the tree as it is *when the mutation is
//!   applied*; a stale path is a no-op, never an error
//! - `Insert` with an unknown anchor appends to the root blocks
//! - `SetAttribute` cannot change a node's `type`
//! - `CommitWeights` writes a finished row resize back as child attributes
//!
//! Only malformed payloads (a node that is not a JSON object, and the
//! like) are errors.

use serde::{Deserialize, Serialize};
use tessera_document::{mutator, DocumentError, Edit, Path, Position, Tree};
use tessera_layout::RowSizing;
use thiserror::Error;

/// Semantic mutations on a layout tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a node next to `anchor` (or at the end of the root blocks)
    Insert {
        #[serde(default)]
        anchor: Option<Path>,
        node: serde_json::Value,
        #[serde(default)]
        position: Position,
    },

    /// Move a node within its list by `delta` positions
    Move { path: Path, delta: isize },

    /// Insert a deep copy right after the node
    Duplicate { path: Path },

    /// Remove a node and its subtree
    Remove { path: Path },

    /// Set an attribute value (`null` clears)
    SetAttribute {
        path: Path,
        name: String,
        value: serde_json::Value,
    },

    /// Create an empty `container` config when missing
    EnsureContainer { path: Path },

    /// Replace a top-level singleton such as `page` or `topBar`
    SetTopLevel {
        key: String,
        value: serde_json::Value,
    },

    /// Persist the sizing of a resized row
    CommitWeights { row: Path, sizing: RowSizing },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Invalid node: {0}")]
    InvalidNode(#[source] DocumentError),

    #[error("Invalid value for '{name}': {source}")]
    InvalidValue {
        name: String,
        #[source]
        source: DocumentError,
    },
}

impl Mutation {
    /// Apply to `tree`. The returned edit's path is the one a designer
    /// would select next.
    pub fn apply(&self, tree: &mut Tree) -> Result<Edit, MutationError> {
        match self {
            Mutation::Insert {
                anchor,
                node,
                position,
            } => {
                let fragment = Tree::fragment(node).map_err(MutationError::InvalidNode)?;
                Ok(mutator::insert(tree, anchor.as_ref(), &fragment, *position))
            }

            Mutation::Move { path, delta } => Ok(mutator::move_by(tree, path, *delta)),

            Mutation::Duplicate { path } => Ok(mutator::duplicate(tree, path)),

            Mutation::Remove { path } => Ok(mutator::remove(tree, path)),

            Mutation::SetAttribute { path, name, value } => {
                mutator::set_attribute(tree, path, name, value).map_err(|source| {
                    MutationError::InvalidValue {
                        name: name.clone(),
                        source,
                    }
                })
            }

            Mutation::EnsureContainer { path } => Ok(mutator::ensure_container(tree, path)),

            Mutation::SetTopLevel { key, value } => {
                let path = Path::root().field(key.as_str());
                let changed = tree.set_top_level(key, value).map_err(|source| {
                    MutationError::InvalidValue {
                        name: key.clone(),
                        source,
                    }
                })?;
                Ok(if changed {
                    Edit::applied(path)
                } else {
                    Edit::no_op(path)
                })
            }

            Mutation::CommitWeights { row, sizing } => Ok(sizing.commit(tree, row)),
        }
    }

    /// Whether the mutation can shift the paths of other nodes
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Mutation::Insert { .. }
                | Mutation::Move { .. }
                | Mutation::Duplicate { .. }
                | Mutation::Remove { .. }
        )
    }

    /// Short human-readable label, used for undo descriptions
    pub fn describe(&self) -> String {
        match self {
            Mutation::Insert { node, .. } => {
                let kind = node.get("type").and_then(|t| t.as_str()).unwrap_or("node");
                format!("Insert {}", kind)
            }
            Mutation::Move { path, delta } => format!("Move {} by {}", path, delta),
            Mutation::Duplicate { path } => format!("Duplicate {}", path),
            Mutation::Remove { path } => format!("Remove {}", path),
            Mutation::SetAttribute { path, name, .. } => format!("Set {} on {}", name, path),
            Mutation::EnsureContainer { path } => format!("Add container to {}", path),
            Mutation::SetTopLevel { key, .. } => format!("Set {}", key),
            Mutation::CommitWeights { row, .. } => format!("Resize {}", row),
        }
    }
}
