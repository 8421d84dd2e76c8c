//! # Collection State
//!
//! The three pieces of mutable state a collection owns: the owner-controlled
//! sale switches, the owner-adjustable mint terms, and the mint ledger
//! (supply counter plus per-wallet tally).

use std::collections::HashMap;

use launchpad_protocol::{Address, Amount, Hash32};
use serde::{Deserialize, Serialize};

use crate::allocator::Allocation;

/// Phase flags and the whitelist commitment. Only the owner changes these.
///
/// The two flags are independent: both phases may run at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleState {
    pub sale_active: bool,
    pub whitelist_sale_active: bool,
    pub whitelist_root: Hash32,
    pub base_uri: String,
}

/// Price and wallet cap. Adjustable by the owner at any time; changes apply
/// to the next call and are never re-checked against past mints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintTerms {
    pub mint_price: Amount,
    pub max_per_wallet: u64,
}

/// Supply counter and per-wallet paid-mint tally.
///
/// Mutated only through [`MintLedger::apply`], which takes allocations the
/// [`SupplyAllocator`](crate::allocator::SupplyAllocator) has already
/// authorized.
#[derive(Debug, Clone, Default)]
pub struct MintLedger {
    total_supply: u64,
    mints_by_wallet: HashMap<Address, u64>,
}

impl MintLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units minted so far. Also the highest token id in existence.
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Units this wallet has obtained through counted mint paths.
    pub fn mints_by_wallet(&self, wallet: &Address) -> u64 {
        self.mints_by_wallet.get(wallet).copied().unwrap_or(0)
    }

    /// Commits authorized allocations, in order.
    ///
    /// Allocations are produced from the ledger's current view, so the
    /// additions cannot overflow; saturating arithmetic keeps this path free
    /// of panics regardless.
    pub fn apply(&mut self, allocations: &[Allocation]) {
        for allocation in allocations {
            self.total_supply = self.total_supply.saturating_add(allocation.quantity);
            if allocation.counted {
                let tally = self.mints_by_wallet.entry(allocation.recipient).or_insert(0);
                *tally = tally.saturating_add(allocation.quantity);
            }
        }
    }
}
