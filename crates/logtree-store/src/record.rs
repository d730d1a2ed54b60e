//! Nested tree record format
//!
//! `{ "hash": <hex>, "isLeaf": bool, "left": <record>|null, "right": <record>|null }`.
//! A leaf has both children null and carries the item's digest; the
//! explicit `isLeaf` flag keeps leaves distinguishable without inspecting
//! children. Decoding revalidates arity, the canonical split, and every
//! internal digest, so a tampered file can never yield a tree that
//! disagrees with its own hashes.

use crate::error::{Error, Result};
use logtree_merkle::{hash_children, split_point, LeafRecord, MerkleTree, Node};
use logtree_types::Digest;
use serde::{Deserialize, Serialize};

/// One node of a persisted tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeRecord {
    pub hash: Digest,
    pub is_leaf: bool,
    pub left: Option<Box<TreeRecord>>,
    pub right: Option<Box<TreeRecord>>,
}

/// A persisted old/new tree pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreePairRecord {
    pub old_tree: TreeRecord,
    pub new_tree: TreeRecord,
}

impl TreeRecord {
    /// Encode a tree into its record form
    pub fn from_tree(tree: &MerkleTree) -> Self {
        Self::from_node(tree.root())
    }

    fn from_node(node: &Node) -> Self {
        match node {
            Node::Leaf(leaf) => TreeRecord {
                hash: leaf.digest,
                is_leaf: true,
                left: None,
                right: None,
            },
            Node::Internal {
                digest,
                left,
                right,
                ..
            } => TreeRecord {
                hash: *digest,
                is_leaf: false,
                left: Some(Box::new(Self::from_node(left))),
                right: Some(Box::new(Self::from_node(right))),
            },
        }
    }

    /// Rebuild the tree, revalidating structure and digests
    pub fn to_tree(&self) -> Result<MerkleTree> {
        let mut next_index = 0;
        let root = self.to_node(&mut next_index)?;
        Ok(MerkleTree::from_root(root))
    }

    fn to_node(&self, next_index: &mut u64) -> Result<Node> {
        if self.is_leaf {
            if self.left.is_some() || self.right.is_some() {
                return Err(Error::MalformedTree(
                    "leaf record carries children".to_string(),
                ));
            }
            let leaf = LeafRecord::from_digest(*next_index, self.hash);
            *next_index += 1;
            return Ok(Node::Leaf(leaf));
        }

        let (left, right) = match (&self.left, &self.right) {
            (Some(left), Some(right)) => (left, right),
            _ => {
                return Err(Error::MalformedTree(
                    "internal record missing a child".to_string(),
                ))
            }
        };
        let left = left.to_node(next_index)?;
        let right = right.to_node(next_index)?;

        let expected = hash_children(&left.digest(), &right.digest());
        if expected != self.hash {
            return Err(Error::MalformedTree(format!(
                "internal digest {} does not recompute from its children",
                self.hash.to_hex()
            )));
        }

        let size = left.leaf_count() + right.leaf_count();
        if left.leaf_count() != split_point(size) {
            return Err(Error::MalformedTree(format!(
                "non-canonical split: left subtree holds {} of {} leaves",
                left.leaf_count(),
                size
            )));
        }

        Ok(Node::Internal {
            digest: self.hash,
            size,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}
