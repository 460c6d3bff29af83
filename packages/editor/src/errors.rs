//! Error types for the editor

use tessera_document::{DocumentError, PathError};
use thiserror::Error;

use crate::mutations::MutationError;

/// Failures of a [`crate::LayoutHost`]
#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid layout for screen '{screen}': {source}")]
    Layout {
        screen: String,
        #[source]
        source: DocumentError,
    },

    #[error("Invalid screen id: {0:?}")]
    InvalidScreenId(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
