//! # Whitelist Merkle Tree
//!
//! A binary Merkle tree over whitelisted addresses, plus the pure verifier
//! a contract runs against a published root.
//!
//! ## Encoding
//!
//! - **Leaf**: `keccak256(address)` over the 20 raw address bytes. This is
//!   byte-for-byte `keccak256(abi.encodePacked(addr))` in Solidity.
//! - **Node**: [`hash_pair`] of the two children, sorted first. Sorting makes
//!   the parent independent of child order, so a proof is just the ordered
//!   list of siblings from leaf to root.
//! - **Odd node out**: promoted to the next level unchanged (no duplication).
//!   Promoted nodes contribute no sibling to the proof.
//! - **Single leaf**: the root is the leaf itself, the proof is empty.
//! - **Empty tree**: the root is 32 zero bytes and nothing verifies against it.
//!
//! Building happens off-chain (operator tooling); verification is logarithmic
//! in the set size and needs nothing but the candidate, the proof and the root.

use std::collections::HashMap;
use thiserror::Error;

use super::hash::{hash_pair, keccak256};
use crate::types::{Address, Hash32};

/// Errors produced while building a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// The same address appears twice in the input set.
    #[error("duplicate whitelist entry: {0}")]
    DuplicateLeaf(Address),
}

/// Leaf digest for a whitelisted address.
pub fn leaf_hash(address: &Address) -> Hash32 {
    keccak256(address.as_bytes())
}

/// Checks that `leaf` is committed to by `root`.
///
/// Folds `proof` over the leaf in order with [`hash_pair`] and compares the
/// accumulated digest with `root`. Pure: no state, no allocation.
pub fn verify_proof(leaf: &Hash32, proof: &[Hash32], root: &Hash32) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |acc, sibling| hash_pair(&acc, sibling));
    computed == *root
}

/// A fully materialized whitelist tree.
///
/// Holds every level so proofs can be generated for any member.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `levels[0]` are the leaves, the last level holds the root.
    levels: Vec<Vec<Hash32>>,
    /// Leaf position by address, for proof lookups.
    index: HashMap<Address, usize>,
}

impl MerkleTree {
    /// Builds a tree from whitelisted addresses, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::DuplicateLeaf`] if an address repeats.
    pub fn from_addresses(addresses: &[Address]) -> Result<Self, MerkleError> {
        let mut index = HashMap::with_capacity(addresses.len());
        for (i, address) in addresses.iter().enumerate() {
            if index.insert(*address, i).is_some() {
                return Err(MerkleError::DuplicateLeaf(*address));
            }
        }
        let leaves: Vec<Hash32> = addresses.iter().map(leaf_hash).collect();
        let mut tree = Self::from_leaves(leaves);
        tree.index = index;
        Ok(tree)
    }

    /// Builds a tree from precomputed leaf digests.
    ///
    /// Trees built this way cannot answer [`proof_for`](Self::proof_for);
    /// use [`proof`](Self::proof) with the leaf position instead.
    pub fn from_leaves(leaves: Vec<Hash32>) -> Self {
        let mut levels = vec![leaves];

        while levels.last().map_or(0, Vec::len) > 1 {
            let current = &levels[levels.len() - 1];
            let next: Vec<Hash32> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [lone] => *lone,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(next);
        }

        Self {
            levels,
            index: HashMap::new(),
        }
    }

    /// The commitment to publish. All zeros for an empty tree.
    pub fn root(&self) -> Hash32 {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or([0u8; 32])
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// `true` if the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leaf digests in insertion order.
    pub fn leaves(&self) -> &[Hash32] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sibling path for the leaf at `position`, ordered leaf to root.
    /// `None` if the position is out of range.
    pub fn proof(&self, position: usize) -> Option<Vec<Hash32>> {
        if position >= self.len() {
            return None;
        }

        let mut proof = Vec::with_capacity(self.levels.len());
        let mut idx = position;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = idx ^ 1;
            // A promoted odd node has no sibling at this level.
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            idx /= 2;
        }
        Some(proof)
    }

    /// Sibling path for a whitelisted address. `None` if not a member.
    pub fn proof_for(&self, address: &Address) -> Option<Vec<Hash32>> {
        let position = *self.index.get(address)?;
        self.proof(position)
    }

    /// `true` if the address was part of the input set.
    pub fn contains(&self, address: &Address) -> bool {
        self.index.contains_key(address)
    }
}
