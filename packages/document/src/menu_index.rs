//! # Menu Index
//!
//! Lookup from menu id to its items, rebuilt wholesale from a single
//! depth-first pass after every structural change. Layouts hold tens to
//! low hundreds of nodes, so there is no incremental update.
//!
//! When two menus share an id, the first one visited keeps it. The walk
//! visits a node's attributes in key order (not source order) and list
//! elements by index, so a menu under `blocks` wins over one under
//! `topBar`.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::kind::NodeKind;
use crate::path::Path;
use crate::tree::{NodeRef, Tree, Value};
use crate::visitor::{walk_node, Visitor};

/// One entry of a menu
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub enabled: bool,
    /// Address of the item in the tree (the menu's path for plain-string items)
    pub path: Path,
}

/// Menu id → items
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MenuIndex {
    menus: BTreeMap<String, Vec<MenuItem>>,
}

impl MenuIndex {
    pub fn build(tree: &Tree) -> Self {
        let mut builder = MenuCollector::default();
        builder.visit_tree(tree);
        debug!(menus = builder.index.menus.len(), "Built menu index");
        builder.index
    }

    pub fn get(&self, id: &str) -> Option<&[MenuItem]> {
        self.menus.get(id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.menus.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

#[derive(Default)]
struct MenuCollector {
    index: MenuIndex,
}

impl Visitor for MenuCollector {
    fn visit_node(&mut self, node: NodeRef<'_>, path: &mut Path) {
        if *node.kind() == NodeKind::Menu {
            let id = node.str_attr("id").map(str::trim).unwrap_or_default();
            if id.is_empty() {
                debug!(path = %path, "Skipping menu without id");
            } else if self.index.menus.contains_key(id) {
                // First menu visited keeps the id
                debug!(path = %path, id, "Duplicate menu id");
            } else {
                let items = collect_items(node, path);
                self.index.menus.insert(id.to_string(), items);
            }
        }
        walk_node(self, node, path);
    }
}

fn collect_items(menu: NodeRef<'_>, path: &Path) -> Vec<MenuItem> {
    let items_path = path.clone().field("items");
    match menu.get("items") {
        Some(Value::List(ids)) => ids
            .iter()
            .enumerate()
            .filter_map(|(i, id)| {
                let item = menu.tree().node(*id)?;
                Some(MenuItem {
                    label: item
                        .str_attr("label")
                        .or_else(|| item.str_attr("title"))
                        .unwrap_or_default()
                        .to_string(),
                    action_id: item
                        .str_attr("actionId")
                        .or_else(|| item.str_attr("action"))
                        .map(str::to_string),
                    icon: item.str_attr("icon").map(str::to_string),
                    enabled: item.bool_attr("enabled").unwrap_or(true),
                    path: items_path.clone().index(i),
                })
            })
            .collect(),
        Some(Value::Raw(serde_json::Value::Array(labels))) => labels
            .iter()
            .filter_map(|label| label.as_str())
            .map(|label| MenuItem {
                label: label.to_string(),
                action_id: None,
                icon: None,
                enabled: true,
                path: path.clone(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
