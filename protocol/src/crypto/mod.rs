//! # Cryptographic Primitives
//!
//! Hashing and the whitelist Merkle tree. Both are thin, type-safe wrappers:
//! the Keccak implementation comes from the `sha3` crate, and the tree is
//! plain iteration over it. If you're tempted to optimize these functions,
//! please reconsider.

pub mod hash;
pub mod merkle;

pub use hash::{hash_pair, keccak256, keccak256_multi};
pub use merkle::{leaf_hash, verify_proof, MerkleError, MerkleTree};
