//! logtree command-line interface
//!
//! Three commands over the Merkle core: `build` persists a tree for a list
//! of items, `inclusion` checks membership of one item against a persisted
//! tree, `consistency` checks that one item list is an append-only prefix
//! of another. Negative determinations print `no` and exit 0; usage and
//! file errors exit 1.

use logtree_merkle::{
    hash_leaf, prove_consistency, prove_inclusion, verify_consistency, verify_inclusion,
    MerkleTree,
};
use logtree_store::{load_tree, save_tree, save_tree_pair};

use std::env;
use std::process;

const DEFAULT_TREE_FILE: &str = "merkle.tree";
const DEFAULT_PAIR_FILE: &str = "merkle.trees";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let command = &args[1];
    let result = match command.as_str() {
        "build" => build(&args[2..]),
        "inclusion" => inclusion(&args[2..]),
        "consistency" => consistency(&args[2..]),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} build ITEMS [--out FILE]", program);
    eprintln!("  {} inclusion DATA [--tree FILE]", program);
    eprintln!("  {} consistency OLD_ITEMS NEW_ITEMS [--out FILE]", program);
    eprintln!();
    eprintln!("ITEMS lists use the form \"[alice, bob, carol]\".");
}

/// Parse an items list of the form "[alice, bob, carol]"
///
/// Brackets are optional; entries are comma-separated, trimmed, and empty
/// entries dropped.
fn parse_items(arg: &str) -> Vec<String> {
    let arg = arg.trim();
    let arg = arg.strip_prefix('[').unwrap_or(arg);
    let arg = arg.strip_suffix(']').unwrap_or(arg);
    arg.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn build(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut items_arg: Option<String> = None;
    let mut out = DEFAULT_TREE_FILE.to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --out".into());
                }
                out = args[i].clone();
            }
            arg if !arg.starts_with("--") => {
                items_arg = Some(arg.to_string());
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown).into());
            }
        }
        i += 1;
    }

    let items_arg = items_arg.ok_or("Missing items list")?;
    let items = parse_items(&items_arg);
    if items.is_empty() {
        return Err("No valid data items provided".into());
    }

    let tree = MerkleTree::from_items(&items)?;
    save_tree(&out, &tree)?;
    println!(
        "Merkle tree with {} leaves written to {} (root {})",
        tree.leaf_count(),
        out,
        tree.root_digest().to_hex()
    );
    Ok(())
}

fn inclusion(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut data: Option<String> = None;
    let mut tree_file = DEFAULT_TREE_FILE.to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--tree" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --tree".into());
                }
                tree_file = args[i].clone();
            }
            arg if !arg.starts_with("--") => {
                data = Some(arg.to_string());
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown).into());
            }
        }
        i += 1;
    }

    let data = data.ok_or("Missing data to check")?;
    let tree = load_tree(&tree_file)?;

    let target = hash_leaf(data.as_bytes());
    let index = tree.leaves().iter().position(|leaf| leaf.digest == target);

    match index {
        None => println!("no"),
        Some(index) => {
            let proof = prove_inclusion(&tree, index as u64)?;
            verify_inclusion(
                &target,
                index as u64,
                tree.leaf_count(),
                &proof,
                &tree.root_digest(),
            )?;
            println!("yes {}", serde_json::to_string(&proof)?);
        }
    }
    Ok(())
}

fn consistency(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut lists: Vec<String> = Vec::new();
    let mut out = DEFAULT_PAIR_FILE.to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --out".into());
                }
                out = args[i].clone();
            }
            arg if !arg.starts_with("--") => {
                lists.push(arg.to_string());
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown).into());
            }
        }
        i += 1;
    }

    if lists.len() != 2 {
        return Err("Expected exactly an old items list and a new items list".into());
    }
    let old_items = parse_items(&lists[0]);
    let new_items = parse_items(&lists[1]);
    if old_items.is_empty() || new_items.is_empty() {
        return Err("No valid data items provided".into());
    }

    let old_tree = MerkleTree::from_items(&old_items)?;
    let new_tree = MerkleTree::from_items(&new_items)?;
    save_tree_pair(&out, &old_tree, &new_tree)?;

    match prove_consistency(&old_tree.leaf_digests(), &new_tree.leaf_digests()) {
        Ok(proof) => {
            verify_consistency(
                old_tree.leaf_count(),
                new_tree.leaf_count(),
                &proof,
                &old_tree.root_digest(),
                &new_tree.root_digest(),
            )?;
            println!("yes {}", serde_json::to_string(&proof)?);
        }
        Err(logtree_merkle::Error::PrefixMismatch) => println!("no"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
