//! Inclusion and consistency proofs
//!
//! Proof generation and verification retrace the recursive split the
//! builder uses: at every level the left subtree covers `split_point(n)`
//! leaves. Verifiers rebuild candidate roots from index/size arithmetic
//! alone, never from the original tree, so proof order falls out of the
//! algorithm and promoted odd nodes need no special combine rule (their
//! paths are simply shorter).

use crate::error::{Error, Result};
use crate::hasher::hash_children;
use crate::tree::{split_point, subtree_root, MerkleTree, Node};
use logtree_types::Digest;
use serde::{Deserialize, Serialize};

/// Which operand position a sibling digest takes when combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One step of an inclusion proof: a sibling digest and its side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofEntry {
    pub digest: Digest,
    pub side: Side,
}

/// Sibling path from a leaf up to the root, ordered leaf-to-root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InclusionProof {
    pub entries: Vec<ProofEntry>,
}

/// Digest sequence proving an old tree's leaves are a prefix of a new
/// tree's leaves, interpreted together with the two tree sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsistencyProof {
    pub hashes: Vec<Digest>,
}

/// Generate the inclusion proof for `leaf_index` in `tree`
///
/// Descends from the root, recording at each internal node the digest of
/// the sibling subtree not containing the target, tagged with the side it
/// combines on.
pub fn prove_inclusion(tree: &MerkleTree, leaf_index: u64) -> Result<InclusionProof> {
    if leaf_index >= tree.leaf_count() {
        return Err(Error::IndexOutOfRange {
            index: leaf_index,
            tree_size: tree.leaf_count(),
        });
    }

    let mut entries = Vec::new();
    let mut node = tree.root();
    let mut index = leaf_index;
    while let Node::Internal { left, right, .. } = node {
        let k = left.leaf_count();
        if index < k {
            entries.push(ProofEntry {
                digest: right.digest(),
                side: Side::Right,
            });
            node = left;
        } else {
            entries.push(ProofEntry {
                digest: left.digest(),
                side: Side::Left,
            });
            index -= k;
            node = right;
        }
    }
    entries.reverse();
    Ok(InclusionProof { entries })
}

/// Verify an inclusion proof against an expected root
///
/// Replays the builder's split purely from `leaf_index`/`tree_size`
/// arithmetic; the side tags must agree with that arithmetic. Fails with
/// [`Error::MalformedProof`] on structural violations and
/// [`Error::HashMismatch`] when the recomputed root disagrees.
pub fn verify_inclusion(
    leaf_digest: &Digest,
    leaf_index: u64,
    tree_size: u64,
    proof: &InclusionProof,
    expected_root: &Digest,
) -> Result<()> {
    if tree_size == 0 {
        return Err(Error::InvalidTreeSize("tree size cannot be zero".to_string()));
    }
    if leaf_index >= tree_size {
        return Err(Error::IndexOutOfRange {
            index: leaf_index,
            tree_size,
        });
    }

    let root = leaf_to_root(leaf_digest, leaf_index, tree_size, &proof.entries)?;
    if &root != expected_root {
        return Err(Error::HashMismatch {
            expected: expected_root.to_hex(),
            actual: root.to_hex(),
        });
    }
    Ok(())
}

/// Recompute the root for a leaf within a span of `size` leaves
///
/// The proof is consumed from the root end: the last entry belongs to the
/// top split of the span.
fn leaf_to_root(
    leaf_digest: &Digest,
    index: u64,
    size: u64,
    entries: &[ProofEntry],
) -> Result<Digest> {
    if size == 1 {
        if !entries.is_empty() {
            return Err(Error::MalformedProof(format!(
                "{} unconsumed proof entries",
                entries.len()
            )));
        }
        return Ok(*leaf_digest);
    }

    let (top, rest) = entries
        .split_last()
        .ok_or_else(|| Error::MalformedProof("proof too short for tree size".to_string()))?;
    let k = split_point(size);
    if index < k {
        if top.side != Side::Right {
            return Err(Error::MalformedProof(format!(
                "entry {} tagged left, expected right",
                rest.len()
            )));
        }
        let below = leaf_to_root(leaf_digest, index, k, rest)?;
        Ok(hash_children(&below, &top.digest))
    } else {
        if top.side != Side::Left {
            return Err(Error::MalformedProof(format!(
                "entry {} tagged right, expected left",
                rest.len()
            )));
        }
        let below = leaf_to_root(leaf_digest, index - k, size - k, rest)?;
        Ok(hash_children(&top.digest, &below))
    }
}

/// Generate a consistency proof showing `old_leaves` is a prefix of
/// `new_leaves`
///
/// Fails with [`Error::PrefixMismatch`] when the prefix relation does not
/// hold — a definitive negative outcome; no proof is ever fabricated for
/// mismatched histories. Identical sequences yield an empty proof.
pub fn prove_consistency(
    old_leaves: &[Digest],
    new_leaves: &[Digest],
) -> Result<ConsistencyProof> {
    if old_leaves.is_empty() || new_leaves.is_empty() {
        return Err(Error::InvalidTreeSize(
            "consistency is defined only between non-empty trees".to_string(),
        ));
    }
    let m = old_leaves.len();
    let n = new_leaves.len();
    if m > n || old_leaves != &new_leaves[..m] {
        return Err(Error::PrefixMismatch);
    }

    let mut hashes = Vec::new();
    if m < n {
        subproof(m, new_leaves, true, &mut hashes)?;
    }
    Ok(ConsistencyProof { hashes })
}

/// RFC 6962 SUBPROOF over the new leaf digests
///
/// `old_root_known` stays set while the old tree's root is a node the
/// verifier seeds directly; it is cleared on the first right descent, after
/// which the old-side subtree root must travel in the proof.
fn subproof(m: usize, leaves: &[Digest], old_root_known: bool, out: &mut Vec<Digest>) -> Result<()> {
    let n = leaves.len();
    if m == n {
        if !old_root_known {
            out.push(subtree_root(leaves)?);
        }
        return Ok(());
    }

    let k = split_point(n as u64) as usize;
    if m <= k {
        subproof(m, &leaves[..k], old_root_known, out)?;
        out.push(subtree_root(&leaves[k..])?);
    } else {
        subproof(m - k, &leaves[k..], false, out)?;
        out.push(subtree_root(&leaves[..k])?);
    }
    Ok(())
}

/// Verify a consistency proof between two tree states
///
/// Retraces the same split decisions as proof generation, producing two
/// candidate roots — one seeded toward the old root, one toward the new —
/// that must independently match `old_root` and `new_root`. Consistency is
/// defined only between non-empty trees.
pub fn verify_consistency(
    old_size: u64,
    new_size: u64,
    proof: &ConsistencyProof,
    old_root: &Digest,
    new_root: &Digest,
) -> Result<()> {
    if old_size == 0 || new_size == 0 {
        return Err(Error::InvalidTreeSize(
            "consistency is defined only between non-empty trees".to_string(),
        ));
    }
    if old_size > new_size {
        return Err(Error::InvalidTreeSize(format!(
            "old size {} > new size {}",
            old_size, new_size
        )));
    }
    if old_size == new_size {
        if !proof.hashes.is_empty() {
            return Err(Error::MalformedProof(
                "proof must be empty for equal tree sizes".to_string(),
            ));
        }
        if old_root != new_root {
            return Err(Error::HashMismatch {
                expected: old_root.to_hex(),
                actual: new_root.to_hex(),
            });
        }
        return Ok(());
    }

    let (calc_old, calc_new) =
        recompute_roots(old_size, new_size, true, &proof.hashes, old_root)?;
    if &calc_old != old_root {
        return Err(Error::VerificationFailed(format!(
            "old root mismatch: expected {}, got {}",
            old_root.to_hex(),
            calc_old.to_hex()
        )));
    }
    if &calc_new != new_root {
        return Err(Error::VerificationFailed(format!(
            "new root mismatch: expected {}, got {}",
            new_root.to_hex(),
            calc_new.to_hex()
        )));
    }
    Ok(())
}

/// Retrace the split decisions over a span of `n` leaves whose first `m`
/// are old, returning the candidate (old, new) roots for the span
///
/// Mirrors `subproof` in reverse: the proof is consumed from the root end.
/// When the old span coincides with a whole subtree and the flag is set,
/// the claimed old root seeds the computation; once cleared, the subtree
/// root must come out of the proof itself.
fn recompute_roots(
    m: u64,
    n: u64,
    old_root_known: bool,
    proof: &[Digest],
    old_root: &Digest,
) -> Result<(Digest, Digest)> {
    if m == n {
        return if old_root_known {
            if proof.is_empty() {
                Ok((*old_root, *old_root))
            } else {
                Err(Error::MalformedProof(format!(
                    "{} unconsumed proof hashes",
                    proof.len()
                )))
            }
        } else {
            match proof {
                [root] => Ok((*root, *root)),
                _ => Err(Error::MalformedProof(format!(
                    "expected exactly one hash for a completed subtree, got {}",
                    proof.len()
                ))),
            }
        };
    }

    let (sibling, rest) = proof
        .split_last()
        .ok_or_else(|| Error::MalformedProof("proof too short for the claimed sizes".to_string()))?;
    let k = split_point(n);
    if m <= k {
        let (old, new_left) = recompute_roots(m, k, old_root_known, rest, old_root)?;
        Ok((old, hash_children(&new_left, sibling)))
    } else {
        let (old_right, new_right) = recompute_roots(m - k, n - k, false, rest, old_root)?;
        Ok((
            hash_children(sibling, &old_right),
            hash_children(sibling, &new_right),
        ))
    }
}
