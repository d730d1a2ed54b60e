//! Error types for logtree-merkle

use thiserror::Error;

/// Errors that can occur in Merkle tree operations
#[derive(Error, Debug)]
pub enum Error {
    /// Tree construction requested over zero leaves
    #[error("Cannot build a Merkle tree over zero leaves")]
    EmptyTree,

    /// Inclusion proof requested for an index past the last leaf
    #[error("Leaf index {index} out of range for tree of size {tree_size}")]
    IndexOutOfRange { index: u64, tree_size: u64 },

    /// Invalid tree size
    #[error("Invalid tree size: {0}")]
    InvalidTreeSize(String),

    /// The old leaf sequence is not a prefix of the new leaf sequence
    #[error("Old leaf sequence is not a prefix of the new leaf sequence")]
    PrefixMismatch,

    /// Structurally invalid proof
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// Recomputed digest does not match the expected digest
    #[error("Root mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    /// Proof verification failed
    #[error("Proof verification failed: {0}")]
    VerificationFailed(String),
}

/// Result type for Merkle tree operations
pub type Result<T> = std::result::Result<T, Error>;
