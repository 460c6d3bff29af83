//! # Tessera Style
//!
//! Container style resolution: a versioned config record in, a fully
//! defaulted [`ResolvedStyle`] out. No rendering happens here; a paint
//! adapter consumes the result.
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use tessera_document::Tree;
//! use tessera_style::{resolve, Fill, ResolveContext};
//!
//! let config = Tree::fragment(&json!({ "style": "text", "customColor": "#FF0000" })).unwrap();
//! let style = resolve(Some(config.root_ref()), &ResolveContext::light());
//! assert_eq!(style.fill, Fill::None);
//! ```

mod color;
mod context;
mod resolved;
pub mod resolver;

pub use color::Color;
pub use context::ResolveContext;
pub use resolved::{
    Alignment, BackgroundImage, Border, BorderMode, ContentScale, Fill, GradientOrientation,
    HeightSizing, HorizontalAlignment, ResolvedStyle, Shape, StyleFamily, VerticalAlignment,
    WidthSizing,
};
pub use resolver::{resolve, resolve_node};
