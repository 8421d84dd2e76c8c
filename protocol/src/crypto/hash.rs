//! # Hashing Utilities
//!
//! Keccak-256, and nothing else. The launchpad's whitelist commitments are
//! checked by EVM contracts and produced by the same scripts that feed them,
//! so we speak the hash the EVM speaks.
//!
//! Note that Keccak-256 is *not* NIST SHA3-256: the padding differs, and the
//! outputs differ. `sha3::Keccak256` is the pre-standard variant Ethereum
//! froze in 2015, which is the one we want.

use sha3::{Digest, Keccak256};

use crate::types::Hash32;

/// Compute the Keccak-256 digest of `data`.
///
/// # Example
///
/// ```
/// use launchpad_protocol::crypto::keccak256;
///
/// let hash = keccak256(b"launchpad");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn keccak256(data: &[u8]) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    finish(hasher)
}

/// Hash multiple byte slices as if they were concatenated, without
/// allocating the concatenation.
pub fn keccak256_multi(parts: &[&[u8]]) -> Hash32 {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    finish(hasher)
}

/// Hash two tree nodes into their parent.
///
/// The pair is sorted before hashing, so `hash_pair(a, b) == hash_pair(b, a)`.
/// This is what lets a proof be a plain list of siblings with no left/right
/// flags: the verifier never needs to know which side it was on.
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    if a <= b {
        keccak256_multi(&[a.as_slice(), b.as_slice()])
    } else {
        keccak256_multi(&[b.as_slice(), a.as_slice()])
    }
}

fn finish(hasher: Keccak256) -> Hash32 {
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
