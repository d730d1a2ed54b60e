//! Core types for logtree
//!
//! This crate provides the digest newtype shared by the tree, proof, and
//! storage layers. Digests are opaque 32-byte values in memory and
//! hex-encoded only at serialization boundaries.

pub mod digest;
pub mod error;

pub use digest::{Digest, DIGEST_SIZE};
pub use error::{Error, Result};
