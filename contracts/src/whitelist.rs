//! Whitelist authorization.
//!
//! Stateless: membership is decided entirely by the candidate, the proof it
//! brings, and the root the owner published. The tree itself never exists
//! inside the collection.

use launchpad_protocol::crypto::{leaf_hash, verify_proof};
use launchpad_protocol::{Address, Hash32};

use crate::error::AuthorizationError;

pub struct WhitelistAuthorizer;

impl WhitelistAuthorizer {
    /// `true` if `proof` reconstructs `root` from the candidate's leaf.
    pub fn verify(candidate: &Address, proof: &[Hash32], root: &Hash32) -> bool {
        verify_proof(&leaf_hash(candidate), proof, root)
    }

    /// [`verify`](Self::verify), as a `Result` for `?` chains.
    pub fn authorize(
        candidate: &Address,
        proof: &[Hash32],
        root: &Hash32,
    ) -> Result<(), AuthorizationError> {
        if Self::verify(candidate, proof, root) {
            Ok(())
        } else {
            Err(AuthorizationError::NotWhitelisted)
        }
    }
}
