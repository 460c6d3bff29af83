//! # Tessera Document
//!
//! Path-addressable layout tree for JSON-described screens.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ path: "/blocks/1/tabs/0" ⇄ [Field, Index..] │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree: arena of Arc<NodeData>, copy-on-write │
//! │  - resolve / locate_parent                  │
//! │  - JSON import/export                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutator: insert / move / duplicate / remove │
//! │ menu_index: id → items, rebuilt per change  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use tessera_document::{mutator, Path, Position, Tree};
//!
//! let mut tree = Tree::new();
//! let header = Tree::fragment(&json!({ "type": "SectionHeader", "title": "A" })).unwrap();
//! let edit = mutator::insert(&mut tree, None, &header, Position::After);
//! assert_eq!(edit.path, Path::block(0));
//! ```

mod error;
mod kind;
pub mod menu_index;
pub mod mutator;
mod path;
mod tree;
pub mod visitor;

pub use error::{DocumentError, PathError};
pub use kind::{NodeKind, KIND_KEY};
pub use menu_index::{MenuIndex, MenuItem};
pub use mutator::{Edit, Effect, Position, CONTAINER_KEY};
pub use path::{Path, Step};
pub use tree::{ListSlot, NodeData, NodeId, NodeRef, Resolved, Tree, Value, BLOCKS_KEY};
pub use visitor::Visitor;
