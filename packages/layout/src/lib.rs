//! # Tessera Layout
//!
//! Horizontal sizing for rows: converts pixel drags on a row child's edge
//! into new proportional weights (or explicit widths for scrollable rows).
//!
//! ```text
//! drag(px) ─→ RowResizeTable[path] ─→ RowSizing::apply_drag ─→ commit(tree)
//!                                        │
//!                          Weighted(WeightVector) | Scrollable(ScrollWidths)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use tessera_layout::WeightVector;
//!
//! let weights = WeightVector::equal(3).apply_delta(0, 300.0, 900.0);
//! assert!((weights.sum() - 3.0).abs() < 1e-4);
//! ```

mod row;
mod scroll;
mod weights;

pub use row::{
    Drag, RowResizeTable, RowSizing, ROW_CHILDREN_KEY, SCROLLABLE_KEY, WEIGHT_KEY, WIDTH_KEY,
};
pub use scroll::{ScrollWidths, DEFAULT_CHILD_WIDTH_DP, MIN_CHILD_WIDTH_DP};
pub use weights::{WeightVector, MIN_WEIGHT};
