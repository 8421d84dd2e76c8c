// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NOVA Launchpad Protocol Primitives
//!
//! The small set of chain-level building blocks that the launchpad contract
//! and its operator tooling agree on. Nothing in here knows what a sale phase
//! or a mint cap is; that lives in `launchpad-contracts`.
//!
//! ## Modules
//!
//! - **types**: `Address`, `Amount`, `TokenId`, 32-byte digests.
//! - **crypto**: Keccak-256 hashing and the whitelist Merkle tree. The
//!   encoding matches what an EVM verifier computes, so roots produced here
//!   can be published anywhere.
//! - **units**: converting between human CRO amounts and the smallest unit.
//! - **config**: protocol constants.
//!
//! ## Design Philosophy
//!
//! 1. Pure functions wherever possible. Proof verification touches no state.
//! 2. Every text encoding round-trips and rejects garbage loudly.
//! 3. If it touches money, it has tests. Plural.

pub mod config;
pub mod crypto;
pub mod types;
pub mod units;

pub use types::{Address, AddressError, Amount, Hash32, TokenId};
