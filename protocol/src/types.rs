//! # Core Types
//!
//! Account identities, amounts, token ids and digests.
//!
//! An [`Address`] is 20 raw bytes, rendered as `0x`-prefixed lowercase hex.
//! The byte layout is the one an EVM contract sees for `msg.sender`, which is
//! what makes whitelist leaves computed here match leaves computed on-chain.

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::config::{ADDRESS_LENGTH, HASH_OUTPUT_LENGTH};
use crate::crypto::hash::keccak256;

/// An amount of native currency in its smallest unit (1 CRO = 10^18).
pub type Amount = u128;

/// Sequential identity of a minted collectible.
pub type TokenId = u64;

/// A 32-byte digest. Merkle roots, leaves and proof siblings are all this.
pub type Hash32 = [u8; HASH_OUTPUT_LENGTH];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while parsing addresses or digests from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded input had the wrong number of bytes.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Bytes required.
        expected: usize,
        /// Bytes found.
        actual: usize,
    },
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The all-zero address. Nobody holds its key; sending there burns.
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Wraps raw bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// `true` for [`Address::ZERO`].
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// A fresh random address. Handy for tests and throwaway accounts.
    pub fn random() -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Deterministically derives an address from arbitrary seed bytes.
    ///
    /// Takes the last 20 bytes of `keccak256(seed)`, the same truncation EVM
    /// chains apply to public-key hashes. Equal seeds always give equal
    /// addresses, so tests can name their actors (`derive(b"treasury")`).
    pub fn derive(seed: &[u8]) -> Self {
        let digest = keccak256(seed);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[HASH_OUTPUT_LENGTH - ADDRESS_LENGTH..]);
        Self(bytes)
    }

    /// Lowercase `0x`-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses 40 hex digits, with or without a `0x` prefix, any case.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let stripped = strip_hex_prefix(s.trim());
        let bytes = hex::decode(stripped).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Digest helpers
// ---------------------------------------------------------------------------

/// Lowercase `0x`-prefixed hex of a 32-byte digest.
pub fn hash_to_hex(hash: &Hash32) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parses a 32-byte digest from hex, with or without `0x`.
pub fn hash_from_hex(s: &str) -> Result<Hash32, AddressError> {
    let bytes = hex::decode(strip_hex_prefix(s.trim()))
        .map_err(|e| AddressError::InvalidHex(e.to_string()))?;
    if bytes.len() != HASH_OUTPUT_LENGTH {
        return Err(AddressError::InvalidLength {
            expected: HASH_OUTPUT_LENGTH,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; HASH_OUTPUT_LENGTH];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
