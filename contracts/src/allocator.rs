//! # Supply Allocator
//!
//! The single place where the supply ceiling and the per-wallet cap are
//! enforced. Every path that creates tokens (public mint, whitelist mint,
//! airdrop) goes through here, so the two invariants hold everywhere:
//!
//! - `total_supply <= max_supply`, always.
//! - `mints_by_wallet[a] <= max_per_wallet` as of the moment of each paid mint.
//!
//! Authorization is pure. It reads a [`MintLedger`] and returns
//! [`Allocation`]s describing what *would* happen; the collection commits
//! them with [`MintLedger::apply`] only after payment and token issuance have
//! succeeded. Nobody ever sees a half-applied allocation.

use launchpad_protocol::config::FIRST_TOKEN_ID;
use launchpad_protocol::{Address, TokenId};

use crate::error::SupplyError;
use crate::ledger::Issuance;
use crate::state::MintLedger;

/// A reserved run of sequential token ids for one recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub recipient: Address,
    pub first_token_id: TokenId,
    pub quantity: u64,
    /// Whether the units are added to the recipient's `mints_by_wallet`.
    pub counted: bool,
}

impl Allocation {
    pub fn last_token_id(&self) -> TokenId {
        self.first_token_id.saturating_add(self.quantity.saturating_sub(1))
    }

    /// The ledger instruction that delivers this allocation.
    pub fn issuance(&self) -> Issuance {
        Issuance {
            to: self.recipient,
            first_token_id: self.first_token_id,
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyAllocator {
    pub max_supply: u64,
    pub max_per_wallet: u64,
}

impl SupplyAllocator {
    pub fn new(max_supply: u64, max_per_wallet: u64) -> Self {
        Self {
            max_supply,
            max_per_wallet,
        }
    }

    /// Reserves `quantity` ids for `recipient`, starting at `total_supply + 1`.
    ///
    /// With `enforce_wallet_cap`, the recipient's paid-mint tally plus
    /// `quantity` must stay within `max_per_wallet`, and the allocation is
    /// counted toward that tally.
    ///
    /// # Errors
    ///
    /// - [`SupplyError::ZeroQuantity`] for `quantity == 0`.
    /// - [`SupplyError::ExceedsMaxSupply`] if the ceiling would be crossed.
    /// - [`SupplyError::ExceedsWalletLimit`] if the wallet cap would be crossed.
    pub fn authorize(
        &self,
        ledger: &MintLedger,
        recipient: Address,
        quantity: u64,
        enforce_wallet_cap: bool,
    ) -> Result<Allocation, SupplyError> {
        self.reserve(ledger.total_supply(), ledger, recipient, quantity, enforce_wallet_cap)
    }

    /// Reserves `quantity_each` ids for every recipient, in order, as if the
    /// allocations were applied one after another. Fails as a whole if any
    /// single reservation would fail.
    ///
    /// `counted` controls whether the batch lands in `mints_by_wallet`; the
    /// wallet cap is never enforced on a batch.
    pub fn authorize_batch(
        &self,
        ledger: &MintLedger,
        recipients: &[Address],
        quantity_each: u64,
        counted: bool,
    ) -> Result<Vec<Allocation>, SupplyError> {
        let mut supply = ledger.total_supply();
        let mut allocations = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let mut allocation = self.reserve(supply, ledger, *recipient, quantity_each, false)?;
            allocation.counted = counted;
            supply += allocation.quantity;
            allocations.push(allocation);
        }
        Ok(allocations)
    }

    fn reserve(
        &self,
        supply: u64,
        ledger: &MintLedger,
        recipient: Address,
        quantity: u64,
        enforce_wallet_cap: bool,
    ) -> Result<Allocation, SupplyError> {
        if quantity == 0 {
            return Err(SupplyError::ZeroQuantity);
        }

        let new_supply = supply
            .checked_add(quantity)
            .filter(|s| *s <= self.max_supply)
            .ok_or(SupplyError::ExceedsMaxSupply)?;
        debug_assert!(new_supply <= self.max_supply);

        if enforce_wallet_cap {
            let minted = ledger.mints_by_wallet(&recipient);
            minted
                .checked_add(quantity)
                .filter(|m| *m <= self.max_per_wallet)
                .ok_or(SupplyError::ExceedsWalletLimit)?;
        }

        Ok(Allocation {
            recipient,
            first_token_id: supply + FIRST_TOKEN_ID,
            quantity,
            counted: enforce_wallet_cap,
        })
    }
}
