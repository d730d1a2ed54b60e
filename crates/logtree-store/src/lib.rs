//! JSON persistence for Merkle trees
//!
//! The storage collaborator around the core: nested tree records with hex
//! digests and an explicit `isLeaf` flag, plus load/save helpers whose
//! errors name the file an operation failed on.

pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::{TreePairRecord, TreeRecord};

use std::fs;
use std::path::Path;

use logtree_merkle::MerkleTree;

/// Persist a tree to `path` as pretty-printed JSON
pub fn save_tree(path: impl AsRef<Path>, tree: &MerkleTree) -> Result<()> {
    let path = path.as_ref();
    let record = TreeRecord::from_tree(tree);
    write_json(path, &record)?;
    tracing::debug!(path = %path.display(), leaves = tree.leaf_count(), "tree written");
    Ok(())
}

/// Load a tree from `path`, revalidating its structure and digests
pub fn load_tree(path: impl AsRef<Path>) -> Result<MerkleTree> {
    let path = path.as_ref();
    let record: TreeRecord = read_json(path)?;
    let tree = record.to_tree()?;
    tracing::debug!(path = %path.display(), leaves = tree.leaf_count(), "tree loaded");
    Ok(tree)
}

/// Persist an old/new tree pair to `path`
pub fn save_tree_pair(path: impl AsRef<Path>, old: &MerkleTree, new: &MerkleTree) -> Result<()> {
    let path = path.as_ref();
    let record = TreePairRecord {
        old_tree: TreeRecord::from_tree(old),
        new_tree: TreeRecord::from_tree(new),
    };
    write_json(path, &record)?;
    tracing::debug!(path = %path.display(), "tree pair written");
    Ok(())
}

/// Load an old/new tree pair from `path`
pub fn load_tree_pair(path: impl AsRef<Path>) -> Result<(MerkleTree, MerkleTree)> {
    let path = path.as_ref();
    let record: TreePairRecord = read_json(path)?;
    let old = record.old_tree.to_tree()?;
    let new = record.new_tree.to_tree()?;
    tracing::debug!(path = %path.display(), "tree pair loaded");
    Ok((old, new))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use logtree_merkle::{prove_inclusion, verify_inclusion, hash_leaf};

    #[test]
    fn test_tree_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merkle.tree");

        let items: Vec<Vec<u8>> = (0..5u8).map(|i| vec![i]).collect();
        let tree = MerkleTree::from_items(&items).unwrap();
        save_tree(&path, &tree).unwrap();

        let loaded = load_tree(&path).unwrap();
        assert_eq!(loaded.root_digest(), tree.root_digest());
        assert_eq!(loaded.leaf_count(), tree.leaf_count());

        // Proofs generated from the reloaded tree still verify.
        let proof = prove_inclusion(&loaded, 4).unwrap();
        verify_inclusion(&hash_leaf(&items[4]), 4, 5, &proof, &loaded.root_digest()).unwrap();
    }

    #[test]
    fn test_pair_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merkle.trees");

        let items: Vec<Vec<u8>> = (0..6u8).map(|i| vec![i]).collect();
        let old = MerkleTree::from_items(&items[..4]).unwrap();
        let new = MerkleTree::from_items(&items).unwrap();
        save_tree_pair(&path, &old, &new).unwrap();

        let (old_loaded, new_loaded) = load_tree_pair(&path).unwrap();
        assert_eq!(old_loaded.root_digest(), old.root_digest());
        assert_eq!(new_loaded.root_digest(), new.root_digest());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.tree");

        let err = load_tree(&path).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("does-not-exist.tree"));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.tree");
        fs::write(&path, "not json").unwrap();

        let err = load_tree(&path).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().contains("garbage.tree"));
    }
}
