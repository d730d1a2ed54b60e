//! Domain-separated Merkle tree hashing
//!
//! RFC 6962 hashing with distinct prefixes (0x00 for leaf content, 0x01 for
//! child digests), so a leaf digest can never collide with or be mistaken
//! for an internal-node digest.

use logtree_types::Digest;
use sha2::{Digest as _, Sha256};

/// Prefix for leaf hashing
pub const LEAF_HASH_PREFIX: u8 = 0x00;

/// Prefix for internal-node hashing
pub const NODE_HASH_PREFIX: u8 = 0x01;

/// Hash size in bytes (SHA-256)
pub const HASH_SIZE: usize = 32;

/// Hash a leaf item
///
/// Returns: SHA256(0x00 || data)
pub fn hash_leaf(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_HASH_PREFIX]);
    hasher.update(data);
    Digest::from_bytes(hasher.finalize().into())
}

/// Hash two child digests into their parent digest
///
/// Returns: SHA256(0x01 || left || right)
pub fn hash_children(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update([NODE_HASH_PREFIX]);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Digest::from_bytes(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_sha256(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    #[test]
    fn test_hash_leaf_uses_prefix() {
        let data = b"test data";
        let hash = hash_leaf(data);

        // Differs from the unprefixed hash
        assert_ne!(hash.as_bytes(), &raw_sha256(data));

        // Matches SHA256(0x00 || data)
        let mut prefixed = vec![LEAF_HASH_PREFIX];
        prefixed.extend_from_slice(data);
        assert_eq!(hash.as_bytes(), &raw_sha256(&prefixed));
    }

    #[test]
    fn test_hash_children_uses_prefix() {
        let left = hash_leaf(b"left");
        let right = hash_leaf(b"right");
        let hash = hash_children(&left, &right);

        let mut prefixed = vec![NODE_HASH_PREFIX];
        prefixed.extend_from_slice(left.as_bytes());
        prefixed.extend_from_slice(right.as_bytes());
        assert_eq!(hash.as_bytes(), &raw_sha256(&prefixed));
    }

    #[test]
    fn test_hash_children_order_matters() {
        let left = Digest::from_bytes([0u8; 32]);
        let right = Digest::from_bytes([1u8; 32]);
        assert_ne!(hash_children(&left, &right), hash_children(&right, &left));
    }

    #[test]
    fn test_leaf_and_node_domains_disjoint() {
        // A 64-byte leaf that spells out two digests must not hash like the
        // internal node over those digests.
        let left = Digest::from_bytes([2u8; 32]);
        let right = Digest::from_bytes([3u8; 32]);
        let mut as_leaf_data = Vec::new();
        as_leaf_data.extend_from_slice(left.as_bytes());
        as_leaf_data.extend_from_slice(right.as_bytes());
        assert_ne!(hash_leaf(&as_leaf_data), hash_children(&left, &right));
    }
}
