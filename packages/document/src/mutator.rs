//! # Tree Mutator
//!
//! Structural edits addressed by [`Path`].
//!
//! ## Semantics
//!
//! - Every edit targets a single ordered list and is applied whole or not at all
//! - Unresolved paths are a safe no-op, never an error: designer commands
//!   are issued against selection state that may be stale
//! - Each edit returns the path of the node the caller should select next
//! - The root itself is never moved or removed

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::DocumentError;
use crate::path::Path;
use crate::tree::{json_type_name, Tree, Value, BLOCKS_KEY};

/// Attribute holding a node's container style config
pub const CONTAINER_KEY: &str = "container";

/// Where to insert relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    Before,
    #[default]
    After,
}

/// Whether an edit changed the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Effect {
    Applied,
    NoOp,
}

/// Result of an edit: the path now relevant to the caller, and whether
/// anything changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub path: Path,
    pub effect: Effect,
}

impl Edit {
    pub fn applied(path: Path) -> Self {
        Self {
            path,
            effect: Effect::Applied,
        }
    }

    pub fn no_op(path: Path) -> Self {
        trace!(path = %path, "Edit had no effect");
        Self {
            path,
            effect: Effect::NoOp,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.effect == Effect::Applied
    }
}

/// Insert the root node of `fragment` next to `anchor`.
///
/// When the anchor's list exists the index is clamped into `[0, len]`.
/// Without an anchor, or when the anchor's list cannot be found, the node
/// is appended to the root's `blocks`.
pub fn insert(tree: &mut Tree, anchor: Option<&Path>, fragment: &Tree, position: Position) -> Edit {
    let target = anchor.and_then(|anchor| {
        let slot = tree.locate_list(anchor)?;
        let index = match position {
            Position::Before => slot.index,
            Position::After => slot.index.saturating_add(1),
        };
        Some((slot.owner, slot.key, index.min(slot.len), anchor.parent()?))
    });

    let (owner, key, index, list_path) = match target {
        Some(target) => target,
        None => {
            let root = tree.root();
            let len = tree
                .root_ref()
                .get(BLOCKS_KEY)
                .and_then(Value::as_list)
                .map_or(0, <[_]>::len);
            (root, BLOCKS_KEY.to_string(), len, Path::root().field(BLOCKS_KEY))
        }
    };

    let Some(new_id) = tree.graft_fragment(fragment) else {
        return Edit::no_op(list_path);
    };
    let Some(list) = tree.list_mut(owner, &key) else {
        tree.free_subtree(new_id);
        return Edit::no_op(list_path);
    };
    list.insert(index, new_id);
    tree.touch();

    let path = list_path.index(index);
    debug!(path = %path, kind = %fragment.root_ref().kind(), "Inserted node");
    Edit::applied(path)
}

/// Shift an element within its list by `delta`, clamped to the list bounds
pub fn move_by(tree: &mut Tree, path: &Path, delta: isize) -> Edit {
    let Some(slot) = tree.locate_parent(path) else {
        return Edit::no_op(path.clone());
    };

    let last = slot.len as isize - 1;
    let target = (slot.index as isize).saturating_add(delta).clamp(0, last) as usize;
    if target == slot.index {
        return Edit::no_op(path.clone());
    }

    let Some(list) = tree.list_mut(slot.owner, &slot.key) else {
        return Edit::no_op(path.clone());
    };
    let id = list.remove(slot.index);
    list.insert(target, id);
    tree.touch();

    let Some(new_path) = path.with_last_index(target) else {
        return Edit::no_op(path.clone());
    };
    debug!(from = %path, to = %new_path, "Moved node");
    Edit::applied(new_path)
}

/// Deep-clone the addressed element and insert the clone right after it
pub fn duplicate(tree: &mut Tree, path: &Path) -> Edit {
    let Some(slot) = tree.locate_parent(path) else {
        return Edit::no_op(path.clone());
    };
    let Some(original) = tree
        .node(slot.owner)
        .and_then(|owner| owner.get(&slot.key))
        .and_then(Value::as_list)
        .and_then(|items| items.get(slot.index).copied())
    else {
        return Edit::no_op(path.clone());
    };

    // Shares node storage with `tree`; the graft below copies every node
    // into fresh slots.
    let source = tree.clone();
    let Some(copy) = tree.graft(&source, original) else {
        return Edit::no_op(path.clone());
    };
    let Some(list) = tree.list_mut(slot.owner, &slot.key) else {
        tree.free_subtree(copy);
        return Edit::no_op(path.clone());
    };
    list.insert(slot.index + 1, copy);
    tree.touch();

    let Some(new_path) = path.with_last_index(slot.index + 1) else {
        return Edit::no_op(path.clone());
    };
    debug!(original = %path, copy = %new_path, "Duplicated node");
    Edit::applied(new_path)
}

/// Delete the addressed element and its subtree
pub fn remove(tree: &mut Tree, path: &Path) -> Edit {
    let Some(slot) = tree.locate_parent(path) else {
        return Edit::no_op(path.clone());
    };
    let Some(list) = tree.list_mut(slot.owner, &slot.key) else {
        return Edit::no_op(path.clone());
    };
    let id = list.remove(slot.index);
    tree.free_subtree(id);
    tree.touch();

    debug!(path = %path, "Removed node");
    Edit::applied(path.clone())
}

/// Set (or with `null`, clear) an attribute on the addressed node.
/// The `type` tag is not an attribute: kinds never change in place.
/// The root's `blocks` may only be replaced by a list of nodes.
pub fn set_attribute(
    tree: &mut Tree,
    path: &Path,
    name: &str,
    value: &serde_json::Value,
) -> Result<Edit, DocumentError> {
    if name == crate::kind::KIND_KEY || name.is_empty() {
        return Ok(Edit::no_op(path.clone()));
    }
    let Some(owner) = tree.resolve_node(path).map(|node| node.id()) else {
        return Ok(Edit::no_op(path.clone()));
    };
    if owner == tree.root() && name == BLOCKS_KEY && !is_node_list(value) {
        return Err(DocumentError::InvalidBlocks {
            found: json_type_name(value),
        });
    }

    let mut at = path.clone().field(name);
    if tree.replace_attribute(owner, name, value, &mut at)? {
        debug!(path = %path, attribute = name, "Set attribute");
        Ok(Edit::applied(path.clone()))
    } else {
        Ok(Edit::no_op(path.clone()))
    }
}

fn is_node_list(value: &serde_json::Value) -> bool {
    value
        .as_array()
        .map_or(false, |items| items.iter().all(serde_json::Value::is_object))
}

/// Make sure the addressed node has a `container` record, creating an
/// empty one when absent. Returns the config's path.
pub fn ensure_container(tree: &mut Tree, path: &Path) -> Edit {
    let config_path = path.clone().field(CONTAINER_KEY);
    let Some(node) = tree.resolve_node(path) else {
        return Edit::no_op(config_path);
    };
    if node.node_attr(CONTAINER_KEY).is_some() {
        return Edit::no_op(config_path);
    }

    let owner = node.id();
    let mut at = config_path.clone();
    let empty = serde_json::Value::Object(serde_json::Map::new());
    match tree.replace_attribute(owner, CONTAINER_KEY, &empty, &mut at) {
        Ok(true) => {
            debug!(path = %config_path, "Created container config");
            Edit::applied(config_path)
        }
        _ => Edit::no_op(config_path),
    }
}

/// Write one attribute on every element of a list, in order.
/// `values` must match the list length; otherwise nothing is written.
pub fn set_list_attribute(tree: &mut Tree, list_path: &Path, name: &str, values: &[Value]) -> Edit {
    let Some(items) = tree
        .resolve(list_path)
        .and_then(|resolved| match resolved {
            crate::tree::Resolved::Value(value) => value.as_list().map(<[_]>::to_vec),
            _ => None,
        })
    else {
        return Edit::no_op(list_path.clone());
    };
    if items.len() != values.len() || name == crate::kind::KIND_KEY {
        return Edit::no_op(list_path.clone());
    }

    let mut changed = false;
    for (id, value) in items.iter().zip(values) {
        let Some(data) = tree.data_mut(*id) else {
            continue;
        };
        let previous = data.attributes_mut().insert(name.to_string(), value.clone());
        changed |= previous.as_ref() != Some(value);
        tree.free_value(previous.filter(|p| p != value));
    }

    if changed {
        tree.touch();
        debug!(path = %list_path, attribute = name, count = values.len(), "Set list attribute");
        Edit::applied(list_path.clone())
    } else {
        Edit::no_op(list_path.clone())
    }
}
