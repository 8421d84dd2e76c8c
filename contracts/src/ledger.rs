//! # Token Ledger
//!
//! The non-fungible token registry the collection mints into. The collection
//! decides *which* ids go to *whom*; the ledger records ownership and runs
//! whatever receiver logic a recipient has (the `onERC721Received` analogue).
//!
//! ## Atomicity
//!
//! [`TokenLedger::mint`] takes a whole batch of issuances and either records
//! all of them or none. The collection relies on this for all-or-nothing
//! airdrops.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use launchpad_protocol::{Address, TokenId};
use parking_lot::RwLock;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by a token ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Query or metadata request for an id that was never minted.
    #[error("ERC721NonexistentToken({0})")]
    NonexistentToken(TokenId),

    /// The id is already owned.
    #[error("ERC721InvalidSender: token {0} already minted")]
    TokenAlreadyMinted(TokenId),

    /// Tokens cannot be minted to the zero address.
    #[error("ERC721InvalidReceiver({0})")]
    InvalidReceiver(Address),

    /// The recipient's receive hook refused the tokens.
    #[error("ERC721InvalidReceiver({receiver}): {reason}")]
    Rejected {
        /// Address whose hook rejected.
        receiver: Address,
        /// Reason given by the hook.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A contiguous run of ids for one recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Issuance {
    pub to: Address,
    pub first_token_id: TokenId,
    pub quantity: u64,
}

impl Issuance {
    /// The ids covered.
    pub fn token_ids(&self) -> std::ops::Range<TokenId> {
        self.first_token_id..self.first_token_id.saturating_add(self.quantity)
    }
}

/// Ownership registry for a single collection.
pub trait TokenLedger: Send + Sync {
    /// Records every issuance in `batch`, or none of them.
    fn mint(&self, batch: &[Issuance]) -> Result<(), LedgerError>;

    /// Number of tokens held by `owner`.
    fn balance_of(&self, owner: &Address) -> u64;

    /// Current holder of `token_id`.
    fn owner_of(&self, token_id: TokenId) -> Result<Address, LedgerError>;

    fn exists(&self, token_id: TokenId) -> bool {
        self.owner_of(token_id).is_ok()
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// Receiver logic run after tokens land on an address. Returning an error
/// rejects the whole batch. Hooks run with no ledger lock held, so they may
/// call back into the ledger or the collection.
pub type ReceiveHook = Arc<dyn Fn(&Issuance) -> Result<(), String> + Send + Sync>;

#[derive(Debug, Default)]
struct Registry {
    owners: HashMap<TokenId, Address>,
    balances: HashMap<Address, u64>,
}

/// In-process token ledger with optional per-address receive hooks.
#[derive(Default)]
pub struct InMemoryTokenLedger {
    registry: RwLock<Registry>,
    hooks: RwLock<HashMap<Address, ReceiveHook>>,
}

impl fmt::Debug for InMemoryTokenLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("InMemoryTokenLedger")
            .field("tokens", &registry.owners.len())
            .field("holders", &registry.balances.len())
            .field("hooks", &self.hooks.read().len())
            .finish()
    }
}

impl InMemoryTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs receiver logic for `address`, replacing any previous hook.
    pub fn set_receive_hook(&self, address: Address, hook: ReceiveHook) {
        self.hooks.write().insert(address, hook);
    }

    pub fn clear_receive_hook(&self, address: &Address) {
        self.hooks.write().remove(address);
    }

    /// Total number of tokens recorded.
    pub fn token_count(&self) -> usize {
        self.registry.read().owners.len()
    }

    /// Records the batch, undoing any partial progress on failure.
    fn record(registry: &mut Registry, batch: &[Issuance]) -> Result<(), LedgerError> {
        for (done, issuance) in batch.iter().enumerate() {
            if let Err(e) = Self::check(registry, issuance) {
                Self::erase(registry, &batch[..done]);
                return Err(e);
            }
            for token_id in issuance.token_ids() {
                registry.owners.insert(token_id, issuance.to);
            }
            *registry.balances.entry(issuance.to).or_insert(0) += issuance.quantity;
        }
        Ok(())
    }

    fn check(registry: &Registry, issuance: &Issuance) -> Result<(), LedgerError> {
        if issuance.to.is_zero() {
            return Err(LedgerError::InvalidReceiver(issuance.to));
        }
        match issuance.token_ids().find(|id| registry.owners.contains_key(id)) {
            Some(taken) => Err(LedgerError::TokenAlreadyMinted(taken)),
            None => Ok(()),
        }
    }

    /// Reverses issuances that [`record`](Self::record) applied.
    fn erase(registry: &mut Registry, issued: &[Issuance]) {
        for issuance in issued {
            for token_id in issuance.token_ids() {
                registry.owners.remove(&token_id);
            }
            if let Some(balance) = registry.balances.get_mut(&issuance.to) {
                *balance -= issuance.quantity;
                if *balance == 0 {
                    registry.balances.remove(&issuance.to);
                }
            }
        }
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn mint(&self, batch: &[Issuance]) -> Result<(), LedgerError> {
        Self::record(&mut self.registry.write(), batch)?;

        for issuance in batch {
            let hook = self.hooks.read().get(&issuance.to).cloned();
            if let Some(hook) = hook {
                if let Err(reason) = hook(issuance) {
                    Self::erase(&mut self.registry.write(), batch);
                    return Err(LedgerError::Rejected {
                        receiver: issuance.to,
                        reason,
                    });
                }
            }
        }
        Ok(())
    }

    fn balance_of(&self, owner: &Address) -> u64 {
        self.registry.read().balances.get(owner).copied().unwrap_or(0)
    }

    fn owner_of(&self, token_id: TokenId) -> Result<Address, LedgerError> {
        self.registry
            .read()
            .owners
            .get(&token_id)
            .copied()
            .ok_or(LedgerError::NonexistentToken(token_id))
    }
}
