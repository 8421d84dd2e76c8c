//! # Errors
//!
//! One enum per failure class, wrapped by [`LaunchpadError`]. Every rejection
//! aborts the whole operation with no partial state change, and callers may
//! retry with corrected input. Nothing here is "more fatal" than anything
//! else, except [`ConfigurationError`], which can only happen at deployment.
//!
//! `Display` strings are part of the public contract. The ones operators and
//! frontends match on ("Public sale is not active", "Exceeds wallet limit",
//! ...) must never change.

use launchpad_protocol::{Address, TokenId};
use thiserror::Error;

use crate::bank::BankError;
use crate::ledger::LedgerError;

/// Invalid deployment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Treasury, platform and community weights must add up to 10000.
    #[error("Basis points must sum to 10000 (got {0})")]
    InvalidBasisPoints(u64),

    /// A collection needs at least one mintable token.
    #[error("Max supply must be greater than zero")]
    ZeroMaxSupply,

    /// A zero wallet cap would make the paid mint paths unusable.
    #[error("Max per wallet must be greater than zero")]
    ZeroMaxPerWallet,

    /// The bank could not open an account for the collection.
    #[error("Cannot open collection account: {0}")]
    Account(BankError),
}

/// The caller is not allowed to do this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// Owner-only operation called by someone else.
    #[error("OwnableUnauthorizedAccount({0})")]
    Unauthorized(Address),

    /// Ownership cannot be handed to the zero address.
    #[error("OwnableInvalidOwner({0})")]
    InvalidOwner(Address),

    /// The whitelist proof does not reconstruct the published root.
    #[error("Invalid merkle proof")]
    NotWhitelisted,
}

/// The collection is not in a state that allows this operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// `mint_public` while the public sale flag is off.
    #[error("Public sale is not active")]
    SaleNotActive,

    /// `mint_whitelist` while the whitelist sale flag is off.
    #[error("Whitelist sale is not active")]
    WhitelistSaleNotActive,

    /// A state-mutating operation was entered while another is still running.
    #[error("ReentrancyGuardReentrantCall")]
    ReentrantCall,
}

/// The request would break a supply ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupplyError {
    /// Mint or airdrop of zero units.
    #[error("Quantity must be greater than 0")]
    ZeroQuantity,

    /// `total_supply + quantity > max_supply`.
    #[error("Exceeds max supply")]
    ExceedsMaxSupply,

    /// `mints_by_wallet + quantity > max_per_wallet` on a paid mint path.
    #[error("Exceeds wallet limit")]
    ExceedsWalletLimit,
}

/// The money does not add up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Attached value differs from `price × quantity`, in either direction.
    #[error("Incorrect CRO amount sent")]
    IncorrectAmount,

    /// `price × quantity` does not fit in an amount.
    #[error("Payment amount overflow")]
    Overflow,

    /// `withdraw` with an empty contract balance.
    #[error("No funds to withdraw")]
    NoFunds,

    /// The value bank refused a transfer.
    #[error("Transfer failed: {0}")]
    Transfer(#[from] BankError),
}

/// Any rejection the collection can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchpadError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Supply(#[from] SupplyError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl LaunchpadError {
    /// Shorthand for the ERC-721 "unknown token" rejection.
    pub fn nonexistent_token(token_id: TokenId) -> Self {
        LaunchpadError::Ledger(LedgerError::NonexistentToken(token_id))
    }
}
