// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NOVA Launchpad Collection Contract
//!
//! The allocation and settlement core of an NFT launchpad. A collection sells
//! a fixed supply of sequentially numbered tokens in two owner-controlled
//! phases (whitelist and public), enforces a per-wallet cap and exact
//! payment, lets the owner airdrop, and splits the proceeds between
//! treasury, platform and community wallets on withdraw.
//!
//! ## Components
//!
//! - **SupplyAllocator**: the one place supply and wallet caps are enforced.
//! - **PaymentValidator**: exact `price × quantity` check.
//! - **WhitelistAuthorizer**: stateless Merkle proof check.
//! - **RevenueSplitter**: basis-point split with documented rounding.
//! - **LaunchpadCollection**: the entry points, ownership and queries.
//! - **TokenLedger / ValueBank**: the external registries the collection
//!   mints into and pays out of, with in-memory implementations.
//!
//! ## Design Principles
//!
//! 1. Check everything, then interact, then commit. A rejected call changes
//!    nothing.
//! 2. Owner checks take an explicit [`CallContext`], never ambient identity.
//! 3. Every mutating operation is non-reentrant.
//! 4. Money arithmetic is checked; overflow is a rejection, not a wrap.

mod admin;
mod airdrop;
pub mod allocator;
pub mod bank;
pub mod collection;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod ledger;
mod mint;
pub mod payment;
pub mod splitter;
pub mod state;
pub mod whitelist;

#[cfg(test)]
mod testing;

pub use allocator::{Allocation, SupplyAllocator};
pub use bank::{BankError, BankHook, InMemoryBank, ValueBank};
pub use collection::{CollectionInfo, LaunchpadCollection};
pub use config::{AirdropAccounting, CollectionConfig, CollectionParams, RevenueShare, RevenueShares};
pub use context::CallContext;
pub use error::{
    AuthorizationError, ConfigurationError, LaunchpadError, PaymentError, StateError, SupplyError,
};
pub use ledger::{InMemoryTokenLedger, Issuance, LedgerError, ReceiveHook, TokenLedger};
pub use payment::PaymentValidator;
pub use splitter::{Payout, PayoutLine, RevenueSplitter};
pub use state::{MintLedger, MintTerms, SaleState};
pub use whitelist::WhitelistAuthorizer;
