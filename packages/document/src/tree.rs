//! # Document Tree
//!
//! In-memory representation of a screen layout.
//!
//! Nodes live in an arena of reference-counted slots. Node-valued attributes
//! and ordered lists hold [`NodeId`] handles rather than owned children, so
//! cloning a [`Tree`] copies the slot table but shares every node. Writes go
//! through `Arc::make_mut`, which means a clone taken before an edit keeps
//! seeing the old nodes.
//!
//! ```text
//! root (Record) ── blocks: [n1, n2]
//!                   │    └── Card ── blocks: [n3]
//!                   └── SectionHeader
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number};

use crate::error::DocumentError;
use crate::kind::{NodeKind, KIND_KEY};
use crate::path::{Path, Step};

/// Name of the root's top-level block list
pub const BLOCKS_KEY: &str = "blocks";

/// Handle to a node slot in a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Nested object (typed node or untyped record)
    Node(NodeId),
    /// Ordered list of nodes
    List(Vec<NodeId>),
    /// Array that is not a list of objects, kept verbatim
    Raw(serde_json::Value),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[NodeId]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Number value; non-finite input becomes `Null` since JSON cannot hold it
    pub fn number(n: f64) -> Value {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Node(_) => "object",
            Value::List(_) => "list",
            Value::Raw(_) => "array",
        }
    }
}

/// A node's kind and attributes
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    kind: NodeKind,
    attributes: BTreeMap<String, Value>,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.attributes
    }
}

/// Outcome of [`Tree::resolve`]
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Node(NodeRef<'a>),
    Value(&'a Value),
    Raw(&'a serde_json::Value),
}

impl<'a> Resolved<'a> {
    pub fn as_node(self) -> Option<NodeRef<'a>> {
        match self {
            Resolved::Node(node) => Some(node),
            _ => None,
        }
    }
}

fn node_value_to_json(tree: &Tree, value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Value::Number(n.clone()),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Raw(raw) => raw.clone(),
        Value::Node(id) => tree.node_to_json(*id),
        Value::List(items) => {
            serde_json::Value::Array(items.iter().map(|id| tree.node_to_json(*id)).collect())
        }
    }
}

/// A list slot: the list attribute `key` on `owner`, position `index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSlot {
    pub owner: NodeId,
    pub key: String,
    pub index: usize,
    pub len: usize,
}

/// Borrowed view of one node with typed attribute accessors
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
    data: &'a NodeData,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.data.kind
    }

    pub fn data(&self) -> &'a NodeData {
        self.data
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.data.attributes.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| !v.is_null())
    }

    pub fn str_attr(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Numeric attribute. Numeric strings are accepted, as hand-written
    /// layouts often quote their numbers.
    pub fn f64_attr(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn bool_attr(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn node_attr(&self, key: &str) -> Option<NodeRef<'a>> {
        match self.get(key)? {
            Value::Node(id) => self.tree.node(*id),
            _ => None,
        }
    }

    pub fn list_attr(&self, key: &str) -> Option<Vec<NodeRef<'a>>> {
        let items = self.get(key)?.as_list()?;
        Some(items.iter().filter_map(|id| self.tree.node(*id)).collect())
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.tree.node_to_json(self.id)
    }
}

/// Arena-backed layout tree
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Option<Arc<NodeData>>>,
    free: Vec<NodeId>,
    root: NodeId,
    generation: u64,
}

impl Tree {
    /// Empty screen: a root record with an empty `blocks` list
    pub fn new() -> Self {
        let mut root = NodeData::new(NodeKind::Record);
        root.attributes
            .insert(BLOCKS_KEY.to_string(), Value::List(Vec::new()));
        Self {
            slots: vec![Some(Arc::new(root))],
            free: Vec::new(),
            root: NodeId(0),
            generation: 0,
        }
    }

    /// Import a layout. The root must be an object; a missing `blocks`
    /// list is created empty.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, DocumentError> {
        let mut tree = Self::fragment(json)?;
        let root = tree.root;
        if let Some(data) = tree.data_mut(root) {
            let blocks = data
                .attributes
                .entry(BLOCKS_KEY.to_string())
                .or_insert_with(|| Value::List(Vec::new()));
            if blocks.is_null() {
                *blocks = Value::List(Vec::new());
            } else if blocks.as_list().is_none() {
                return Err(DocumentError::InvalidBlocks {
                    found: blocks.type_name(),
                });
            }
        }
        Ok(tree)
    }

    /// Import a detached node (a template for insertion). Unlike
    /// [`Tree::from_json`], no `blocks` list is added.
    pub fn fragment(json: &serde_json::Value) -> Result<Self, DocumentError> {
        let mut tree = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId(0),
            generation: 0,
        };
        let mut at = Path::root();
        tree.root = tree.import_value_as_node(json, &mut at)?;
        Ok(tree)
    }

    pub fn from_json_str(source: &str) -> Result<Self, DocumentError> {
        let json: serde_json::Value = serde_json::from_str(source)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.node_to_json(self.root)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_ref(&self) -> NodeRef<'_> {
        match self.node(self.root) {
            Some(node) => node,
            // The root slot is never freed
            None => unreachable!("root slot is always occupied"),
        }
    }

    /// Increases on every effective change
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Move the generation past `floor`. Used when a tree taken from
    /// history replaces a newer one, so generations never repeat.
    pub fn advance_generation(&mut self, floor: u64) {
        self.generation = self.generation.max(floor) + 1;
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        let data = self.slots.get(id.index())?.as_deref()?;
        Some(NodeRef {
            tree: self,
            id,
            data,
        })
    }

    /// The root's top-level block list
    pub fn blocks(&self) -> Vec<NodeRef<'_>> {
        self.root_ref().list_attr(BLOCKS_KEY).unwrap_or_default()
    }

    /// Read an auxiliary top-level singleton (`page`, `topBar`, ...)
    pub fn top_level(&self, key: &str) -> Option<serde_json::Value> {
        let value = self.root_ref().get(key)?;
        Some(node_value_to_json(self, value))
    }

    /// Replace an auxiliary top-level singleton. `null` removes it.
    /// The `blocks` list is not a singleton and cannot be replaced here.
    pub fn set_top_level(
        &mut self,
        key: &str,
        json: &serde_json::Value,
    ) -> Result<bool, DocumentError> {
        if key == BLOCKS_KEY || key == KIND_KEY {
            return Ok(false);
        }
        let root = self.root;
        let mut at = Path::root().field(key);
        self.replace_attribute(root, key, json, &mut at)
    }

    /// Walk `path` from the root. Misses of any kind yield `None`.
    pub fn resolve(&self, path: &Path) -> Option<Resolved<'_>> {
        let mut cursor = Resolved::Node(self.root_ref());

        for step in path.steps() {
            cursor = match (cursor, step) {
                (Resolved::Node(node), Step::Field(key)) => match node.get(key)? {
                    Value::Node(id) => Resolved::Node(self.node(*id)?),
                    Value::Raw(raw) => Resolved::Raw(raw),
                    value => Resolved::Value(value),
                },
                (Resolved::Value(Value::List(items)), Step::Index(i)) => {
                    Resolved::Node(self.node(*items.get(*i)?)?)
                }
                (Resolved::Raw(raw), Step::Field(key)) => Resolved::Raw(raw.as_object()?.get(key)?),
                (Resolved::Raw(raw), Step::Index(i)) => Resolved::Raw(raw.as_array()?.get(*i)?),
                _ => return None,
            };
        }

        Some(cursor)
    }

    /// Resolve and export whatever `path` addresses as JSON
    pub fn resolve_json(&self, path: &Path) -> Option<serde_json::Value> {
        Some(match self.resolve(path)? {
            Resolved::Node(node) => node.to_json(),
            Resolved::Value(value) => node_value_to_json(self, value),
            Resolved::Raw(raw) => raw.clone(),
        })
    }

    pub fn resolve_node(&self, path: &Path) -> Option<NodeRef<'_>> {
        self.resolve(path)?.as_node()
    }

    /// Resolution stopped one step early: the list that holds the element
    /// addressed by `path`, and its position. The index must be in range.
    pub fn locate_parent(&self, path: &Path) -> Option<ListSlot> {
        let slot = self.locate_list(path)?;
        (slot.index < slot.len).then_some(slot)
    }

    /// Like [`Tree::locate_parent`] but accepts any index, for insertion
    pub(crate) fn locate_list(&self, path: &Path) -> Option<ListSlot> {
        let steps = path.steps();
        if steps.len() < 2 {
            return None;
        }
        let index = steps[steps.len() - 1].as_index()?;
        let key = steps[steps.len() - 2].as_field()?;
        let owner_path = Path::from_steps(steps[..steps.len() - 2].to_vec());
        let owner = self.resolve_node(&owner_path)?;
        let len = owner.get(key)?.as_list()?.len();

        Some(ListSlot {
            owner: owner.id(),
            key: key.to_string(),
            index,
            len,
        })
    }

    /// Deep-copy the subtree rooted at `src_id` of `src` into this arena.
    /// The copy shares nothing mutable with the source.
    pub fn graft(&mut self, src: &Tree, src_id: NodeId) -> Option<NodeId> {
        let data = src.slots.get(src_id.index())?.as_deref()?.clone();
        let mut copy = NodeData::new(data.kind.clone());
        for (key, value) in data.attributes {
            let value = match value {
                Value::Node(child) => Value::Node(self.graft(src, child)?),
                Value::List(items) => {
                    let mut copied = Vec::with_capacity(items.len());
                    for child in items {
                        copied.push(self.graft(src, child)?);
                    }
                    Value::List(copied)
                }
                other => other,
            };
            copy.attributes.insert(key, value);
        }
        Some(self.alloc(copy))
    }

    /// Copy the root of a fragment tree into this arena
    pub fn graft_fragment(&mut self, fragment: &Tree) -> Option<NodeId> {
        self.graft(fragment, fragment.root)
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let slot = self.slots.get_mut(id.index())?.as_mut()?;
        Some(Arc::make_mut(slot))
    }

    pub(crate) fn list_mut(&mut self, owner: NodeId, key: &str) -> Option<&mut Vec<NodeId>> {
        match self.data_mut(owner)?.attributes.get_mut(key)? {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.generation += 1;
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let data = Some(Arc::new(data));
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = data;
            id
        } else {
            self.slots.push(data);
            NodeId((self.slots.len() - 1) as u32)
        }
    }

    /// Release the slots of a detached subtree
    pub(crate) fn free_subtree(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        let Some(data) = self.slots.get_mut(id.index()).and_then(Option::take) else {
            return;
        };
        self.free.push(id);
        for value in data.attributes.values() {
            match value {
                Value::Node(child) => self.free_subtree(*child),
                Value::List(items) => {
                    for child in items {
                        self.free_subtree(*child);
                    }
                }
                _ => {}
            }
        }
    }

    /// Set `key` on `owner` from JSON, freeing whatever it replaces.
    /// `null` removes the attribute. Returns whether anything changed.
    pub(crate) fn replace_attribute(
        &mut self,
        owner: NodeId,
        key: &str,
        json: &serde_json::Value,
        at: &mut Path,
    ) -> Result<bool, DocumentError> {
        if self.node(owner).is_none() {
            return Ok(false);
        }
        let current = self.node(owner).and_then(|n| n.get(key)).map(|v| node_value_to_json(self, v));
        if current.as_ref() == Some(json) || (current.is_none() && json.is_null()) {
            return Ok(false);
        }

        let value = if json.is_null() {
            None
        } else {
            Some(self.import_value(json, at)?)
        };

        let Some(data) = self.data_mut(owner) else {
            return Ok(false);
        };
        let previous = match value {
            Some(value) => data.attributes.insert(key.to_string(), value),
            None => data.attributes.remove(key),
        };
        self.free_value(previous);
        self.touch();
        Ok(true)
    }

    pub(crate) fn free_value(&mut self, value: Option<Value>) {
        match value {
            Some(Value::Node(id)) => self.free_subtree(id),
            Some(Value::List(items)) => {
                for id in items {
                    self.free_subtree(id);
                }
            }
            _ => {}
        }
    }

    fn import_value_as_node(
        &mut self,
        json: &serde_json::Value,
        at: &mut Path,
    ) -> Result<NodeId, DocumentError> {
        let map = json.as_object().ok_or_else(|| DocumentError::NotAnObject {
            at: at.encode(),
            found: json_type_name(json),
        })?;
        self.import_object(map, at)
    }

    fn import_object(
        &mut self,
        map: &Map<String, serde_json::Value>,
        at: &mut Path,
    ) -> Result<NodeId, DocumentError> {
        let tag = match map.get(KIND_KEY) {
            None => None,
            Some(serde_json::Value::String(tag)) => Some(tag.as_str()),
            Some(_) => return Err(DocumentError::InvalidKind { at: at.encode() }),
        };

        let mut data = NodeData::new(NodeKind::from_tag(tag));
        for (key, json) in map {
            if key == KIND_KEY {
                continue;
            }
            at.push(Step::Field(key.clone()));
            let value = self.import_value(json, at);
            at.pop();
            match value {
                Ok(value) => {
                    data.attributes.insert(key.clone(), value);
                }
                Err(e) => {
                    // Release siblings imported before the failure
                    for value in std::mem::take(&mut data.attributes).into_values() {
                        self.free_value(Some(value));
                    }
                    return Err(e);
                }
            }
        }

        Ok(self.alloc(data))
    }

    pub(crate) fn import_value(
        &mut self,
        json: &serde_json::Value,
        at: &mut Path,
    ) -> Result<Value, DocumentError> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.clone()),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Object(map) => Value::Node(self.import_object(map, at)?),
            serde_json::Value::Array(items) if items.iter().all(|item| item.is_object()) => {
                let mut ids = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    at.push(Step::Index(i));
                    let id = self.import_value_as_node(item, at);
                    at.pop();
                    match id {
                        Ok(id) => ids.push(id),
                        Err(e) => {
                            for id in ids {
                                self.free_subtree(id);
                            }
                            return Err(e);
                        }
                    }
                }
                Value::List(ids)
            }
            serde_json::Value::Array(_) => Value::Raw(json.clone()),
        })
    }

    fn node_to_json(&self, id: NodeId) -> serde_json::Value {
        let Some(node) = self.node(id) else {
            return serde_json::Value::Null;
        };
        let mut map = Map::new();
        if let Some(tag) = node.kind().tag() {
            map.insert(KIND_KEY.to_string(), serde_json::Value::String(tag.to_string()));
        }
        for (key, value) in node.data.attributes() {
            map.insert(key.clone(), node_value_to_json(self, value));
        }
        serde_json::Value::Object(map)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality: same shape and values, regardless of slot layout
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.to_json() == other.to_json()
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Tree::from_json(&json).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            other => f.write_str(other.type_name()),
        }
    }
}
