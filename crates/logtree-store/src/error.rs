//! Error types for logtree-store

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or loading trees
#[derive(Error, Debug)]
pub enum Error {
    /// File read/write failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encode/decode failure
    #[error("JSON error on {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Structural violation in a deserialized tree
    #[error("Malformed tree: {0}")]
    MalformedTree(String),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, Error>;
