//! # Tessera Editor
//!
//! Live layout designer engine: edits a screen's layout tree and keeps the
//! presentation derived from it up to date.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: load / save draft / publish           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: one writer per screen              │
//! │  - Apply mutations, record undo history     │
//! │  - Selection and row-resize gestures        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ pipeline: tree → menus + styles → snapshot  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: styles and menus are derived views
//! 2. **Forward only**: derivation never writes back into the tree
//! 3. **Snapshots for readers**: subscribers never see a half-applied edit
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use tessera_editor::{DesignerSession, MemoryLayoutHost, Mutation, SessionOptions};
//!
//! let mut session =
//!     DesignerSession::open(MemoryLayoutHost::new(), "home", SessionOptions::default()).unwrap();
//! let edit = session
//!     .apply(Mutation::Insert {
//!         anchor: None,
//!         node: json!({ "type": "Card", "blocks": [] }),
//!         position: Default::default(),
//!     })
//!     .unwrap();
//! assert!(edit.is_applied());
//! assert!(session.save_draft().unwrap());
//! ```

mod document;
mod errors;
mod host;
mod mutations;
mod pipeline;
mod session;
mod undo_stack;

pub use document::LayoutDocument;
pub use errors::{EditorError, HostError};
pub use host::{
    validate_screen_id, FileLayoutHost, LayoutHost, MemoryLayoutHost, DRAFTS_DIR, PUBLISHED_DIR,
};
pub use mutations::{Mutation, MutationError};
pub use pipeline::{Observer, Pipeline, Presentation, Snapshot, SubscriptionId};
pub use session::{DesignerSession, SessionOptions};
pub use undo_stack::{HistoryEntry, UndoStack};

// Re-export common types for convenience
pub use tessera_document::{Edit, Effect, Path, Position, Tree};
pub use tessera_layout::{Drag, RowSizing};
pub use tessera_style::{ResolveContext, ResolvedStyle};
