//! Error types for the document model

use thiserror::Error;

/// Path decoding failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Malformed path '{input}': {reason}")]
    Malformed { input: String, reason: String },
}

/// Failure importing a JSON layout into a tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Expected a JSON object at {at}, found {found}")]
    NotAnObject { at: String, found: &'static str },

    #[error("Node type at {at} must be a string")]
    InvalidKind { at: String },

    #[error("Top-level blocks must be a list of objects, found {found}")]
    InvalidBlocks { found: &'static str },

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Json(e.to_string())
    }
}
