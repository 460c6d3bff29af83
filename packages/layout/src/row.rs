//! # Row Resizing
//!
//! Connects the sizing engines to rows in a layout tree.
//!
//! A `Row` is sized in exactly one regime:
//!
//! - **Weighted** (default): children share the row width by `weight`
//! - **Scrollable** (`scrollable: true`): each child has its own `widthDp`
//!
//! The two are never mixed within one row.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tessera_document::{mutator, Edit, NodeKind, NodeRef, Path, Tree, Value};
use tracing::debug;

use crate::scroll::ScrollWidths;
use crate::weights::WeightVector;

pub const ROW_CHILDREN_KEY: &str = "children";
pub const WEIGHT_KEY: &str = "weight";
pub const WIDTH_KEY: &str = "widthDp";
pub const SCROLLABLE_KEY: &str = "scrollable";

/// One horizontal drag on a row child's trailing edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drag {
    pub delta_px: f64,
    pub row_width_px: f64,
    /// Pixels per dp
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "camelCase")]
pub enum RowSizing {
    Weighted(WeightVector),
    Scrollable(ScrollWidths),
}

impl RowSizing {
    /// Initial sizing for a `Row` node. `None` for any other kind.
    ///
    /// Explicit weights are used only when every child carries one;
    /// otherwise all children start with equal shares.
    pub fn from_row(row: NodeRef<'_>) -> Option<RowSizing> {
        if *row.kind() != NodeKind::Row {
            return None;
        }
        let children = row.list_attr(ROW_CHILDREN_KEY).unwrap_or_default();

        if row.bool_attr(SCROLLABLE_KEY).unwrap_or(false) {
            let widths = children.iter().map(|c| c.f64_attr(WIDTH_KEY)).collect();
            return Some(RowSizing::Scrollable(ScrollWidths::new(widths)));
        }

        let explicit: Option<Vec<f64>> = children.iter().map(|c| c.f64_attr(WEIGHT_KEY)).collect();
        let weights = match explicit {
            Some(weights) => WeightVector::from_weights(weights),
            None => WeightVector::equal(children.len()),
        };
        Some(RowSizing::Weighted(weights))
    }

    pub fn apply_drag(&self, index: usize, drag: &Drag) -> RowSizing {
        match self {
            RowSizing::Weighted(weights) => {
                RowSizing::Weighted(weights.apply_delta(index, drag.delta_px, drag.row_width_px))
            }
            RowSizing::Scrollable(widths) => {
                let density = if drag.density > 0.0 { drag.density } else { 1.0 };
                RowSizing::Scrollable(widths.apply_delta(index, drag.delta_px / density))
            }
        }
    }

    /// Attribute name and per-child values this sizing persists as
    pub fn attribute_values(&self) -> (&'static str, Vec<Value>) {
        match self {
            RowSizing::Weighted(weights) => (
                WEIGHT_KEY,
                weights.weights().iter().map(|w| Value::number(*w)).collect(),
            ),
            RowSizing::Scrollable(widths) => (
                WIDTH_KEY,
                widths.widths_dp().iter().map(|w| Value::number(*w)).collect(),
            ),
        }
    }

    /// Whether `self` still describes `other`'s regime and child count
    pub fn matches(&self, other: &RowSizing) -> bool {
        match (self, other) {
            (RowSizing::Weighted(a), RowSizing::Weighted(b)) => a.len() == b.len(),
            (RowSizing::Scrollable(a), RowSizing::Scrollable(b)) => a.len() == b.len(),
            _ => false,
        }
    }

    /// Write the sizing back as per-child attributes of the row at `row_path`.
    ///
    /// A no-op when the row there is now in the other regime or has a
    /// different number of children.
    pub fn commit(&self, tree: &mut Tree, row_path: &Path) -> Edit {
        let current = tree.resolve_node(row_path).and_then(RowSizing::from_row);
        if !current.map_or(false, |current| self.matches(&current)) {
            debug!(path = %row_path, "Row changed since resize began, not committing");
            return Edit::no_op(row_path.clone());
        }
        let (name, values) = self.attribute_values();
        let list_path = row_path.clone().field(ROW_CHILDREN_KEY);
        mutator::set_list_attribute(tree, &list_path, name, &values)
    }
}

/// In-progress sizing per row, keyed by the row's current path.
///
/// Paths shift on structural edits, so the table must be cleared after
/// any insert, move, duplicate or remove.
#[derive(Debug, Default)]
pub struct RowResizeTable {
    rows: HashMap<Path, RowSizing>,
}

impl RowResizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking the row at `path`, initialising from the tree
    pub fn begin(&mut self, tree: &Tree, path: &Path) -> Option<&RowSizing> {
        if !self.rows.contains_key(path) {
            let sizing = RowSizing::from_row(tree.resolve_node(path)?)?;
            debug!(path = %path, "Tracking row sizing");
            self.rows.insert(path.clone(), sizing);
        }
        self.rows.get(path)
    }

    pub fn drag(&mut self, path: &Path, index: usize, drag: &Drag) -> Option<&RowSizing> {
        let sizing = self.rows.get_mut(path)?;
        *sizing = sizing.apply_drag(index, drag);
        Some(sizing)
    }

    pub fn get(&self, path: &Path) -> Option<&RowSizing> {
        self.rows.get(path)
    }

    /// Stop tracking and hand back the final sizing for commit
    pub fn finish(&mut self, path: &Path) -> Option<RowSizing> {
        self.rows.remove(path)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row_tree(row: serde_json::Value) -> Tree {
        Tree::from_json(&json!({ "blocks": [row] })).unwrap()
    }

    #[test]
    fn test_explicit_weights_used_when_all_present() {
        let tree = row_tree(json!({
            "type": "Row",
            "children": [ { "type": "Card", "weight": 2 }, { "type": "Card", "weight": 1 } ]
        }));
        let sizing = RowSizing::from_row(tree.blocks()[0]).unwrap();
        assert_eq!(sizing, RowSizing::Weighted(WeightVector::from_weights(vec![2.0, 1.0])));
    }

    #[test]
    fn test_partial_weights_fall_back_to_equal() {
        let tree = row_tree(json!({
            "type": "Row",
            "children": [ { "type": "Card", "weight": 2 }, { "type": "Card" }, { "type": "Card" } ]
        }));
        let sizing = RowSizing::from_row(tree.blocks()[0]).unwrap();
        assert_eq!(sizing, RowSizing::Weighted(WeightVector::equal(3)));
    }

    #[test]
    fn test_scrollable_row_uses_widths() {
        let tree = row_tree(json!({
            "type": "Row",
            "scrollable": true,
            "children": [ { "type": "Card", "widthDp": 120, "weight": 3 }, { "type": "Card" } ]
        }));
        let sizing = RowSizing::from_row(tree.blocks()[0]).unwrap();
        let RowSizing::Scrollable(widths) = &sizing else {
            panic!("expected scrollable sizing");
        };
        assert_eq!(widths.widths_dp(), &[120.0, 160.0]);

        let drag = Drag { delta_px: 60.0, row_width_px: 1000.0, density: 2.0 };
        let RowSizing::Scrollable(next) = sizing.apply_drag(0, &drag) else {
            panic!("regime must not change");
        };
        assert_eq!(next.widths_dp(), &[150.0, 160.0]);
    }

    #[test]
    fn test_non_row_has_no_sizing() {
        let tree = row_tree(json!({ "type": "ButtonRow", "buttons": [] }));
        assert!(RowSizing::from_row(tree.blocks()[0]).is_none());
    }

    #[test]
    fn test_commit_writes_weights() {
        let mut tree = row_tree(json!({
            "type": "Row",
            "children": [ { "type": "Card" }, { "type": "Card" } ]
        }));
        let path = Path::block(0);
        let sizing = RowSizing::Weighted(WeightVector::from_weights(vec![1.5, 0.5]));
        assert!(sizing.commit(&mut tree, &path).is_applied());

        let children = tree.blocks()[0].list_attr(ROW_CHILDREN_KEY).unwrap();
        assert_eq!(children[0].f64_attr(WEIGHT_KEY), Some(1.5));
        assert_eq!(children[1].f64_attr(WEIGHT_KEY), Some(0.5));
    }

    #[test]
    fn test_commit_refuses_other_regime() {
        let mut tree = row_tree(json!({
            "type": "Row",
            "scrollable": true,
            "children": [ { "type": "Card" }, { "type": "Card" } ]
        }));
        let before = tree.to_json();
        let sizing = RowSizing::Weighted(WeightVector::from_weights(vec![1.5, 0.5]));
        assert!(!sizing.commit(&mut tree, &Path::block(0)).is_applied());
        assert_eq!(tree.to_json(), before);

        let widths = RowSizing::Scrollable(ScrollWidths::new(vec![Some(100.0)]));
        assert!(!widths.commit(&mut tree, &Path::block(0)).is_applied());
        assert!(!sizing.commit(&mut tree, &Path::block(3)).is_applied());
    }

    #[test]
    fn test_table_tracks_rows_by_path() {
        let tree = row_tree(json!({
            "type": "Row",
            "children": [ { "type": "Card" }, { "type": "Card" }, { "type": "Card" } ]
        }));
        let path = Path::block(0);
        let mut table = RowResizeTable::new();
        assert!(table.begin(&tree, &path).is_some());
        assert!(table.begin(&tree, &Path::block(4)).is_none());

        let drag = Drag { delta_px: 100.0, row_width_px: 300.0, density: 1.0 };
        table.drag(&path, 0, &drag);
        let RowSizing::Weighted(weights) = table.finish(&path).unwrap() else {
            panic!("expected weights");
        };
        assert!(weights.weights()[0] > 1.0);
        assert!(table.is_empty());
    }
}
