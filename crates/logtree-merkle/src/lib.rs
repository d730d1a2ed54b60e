//! RFC 6962 style Merkle trees for logtree
//!
//! This crate implements the Merkle tree core: domain-separated hashing,
//! deterministic tree construction over an ordered leaf sequence, and
//! generation and verification of inclusion and consistency proofs.

pub mod error;
pub mod hasher;
pub mod proof;
pub mod tree;

pub use error::{Error, Result};
pub use hasher::{hash_children, hash_leaf, HASH_SIZE, LEAF_HASH_PREFIX, NODE_HASH_PREFIX};
pub use proof::{
    prove_consistency, prove_inclusion, verify_consistency, verify_inclusion, ConsistencyProof,
    InclusionProof, ProofEntry, Side,
};
pub use tree::{split_point, subtree_root, LeafRecord, MerkleTree, Node};
