//! Error types for logtree-types

use thiserror::Error;

/// Errors that can occur in logtree-types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid encoding (wrong length or characters)
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for logtree-types operations
pub type Result<T> = std::result::Result<T, Error>;
