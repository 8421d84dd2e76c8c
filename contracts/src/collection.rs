//! # Launchpad Collection
//!
//! A single NFT collection: fixed identity and revenue split, owner-controlled
//! sale phases, sequentially numbered tokens, and a native-value balance that
//! only the owner can distribute.
//!
//! The entry points are spread across modules by concern:
//!
//! | Module      | Operations                                              |
//! |-------------|---------------------------------------------------------|
//! | `mint`      | `mint_public`, `mint_whitelist`                         |
//! | `airdrop`   | `airdrop`                                               |
//! | `splitter`  | `withdraw`                                              |
//! | `admin`     | sale switches, whitelist root, price, cap, base URI     |
//! | here        | deployment, ownership, every read-only query            |
//!
//! ## Concurrency
//!
//! Collection state sits behind one `RwLock`, and every mutating operation
//! first enters the [`ReentrancyGuard`]. The state lock is never held while
//! the token ledger or the bank runs, so receive hooks may freely call the
//! read-only queries. Calling a mutating operation from a hook fails with
//! `ReentrancyGuardReentrantCall`.

use std::sync::Arc;

use launchpad_protocol::types::hash_to_hex;
use launchpad_protocol::{Address, Amount, Hash32, TokenId};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::allocator::SupplyAllocator;
use crate::bank::{InMemoryBank, ValueBank};
use crate::config::{AirdropAccounting, CollectionConfig, CollectionParams, RevenueShare};
use crate::context::CallContext;
use crate::error::{AuthorizationError, ConfigurationError, LaunchpadError};
use crate::guard::ReentrancyGuard;
use crate::ledger::{InMemoryTokenLedger, TokenLedger};
use crate::state::{MintLedger, MintTerms, SaleState};

/// Everything the collection may change after deployment.
#[derive(Debug, Clone)]
pub(crate) struct CollectionState {
    pub(crate) owner: Option<Address>,
    pub(crate) sale: SaleState,
    pub(crate) terms: MintTerms,
    pub(crate) ledger: MintLedger,
}

impl CollectionState {
    /// Fails unless `ctx.caller` is the current owner.
    pub(crate) fn require_owner(&self, ctx: &CallContext) -> Result<(), AuthorizationError> {
        match self.owner {
            Some(owner) if owner == ctx.caller => Ok(()),
            _ => Err(AuthorizationError::Unauthorized(ctx.caller)),
        }
    }

    pub(crate) fn allocator(&self, config: &CollectionConfig) -> SupplyAllocator {
        SupplyAllocator::new(config.max_supply, self.terms.max_per_wallet)
    }
}

/// A deployed collection, wired to its token ledger and value bank.
pub struct LaunchpadCollection<L = InMemoryTokenLedger, B = InMemoryBank>
where
    L: TokenLedger,
    B: ValueBank,
{
    pub(crate) address: Address,
    pub(crate) config: CollectionConfig,
    pub(crate) state: RwLock<CollectionState>,
    pub(crate) guard: ReentrancyGuard,
    pub(crate) tokens: Arc<L>,
    pub(crate) bank: Arc<B>,
}

impl<L: TokenLedger, B: ValueBank> std::fmt::Debug for LaunchpadCollection<L, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchpadCollection")
            .field("address", &self.address)
            .field("symbol", &self.config.symbol)
            .field("total_supply", &self.total_supply())
            .finish()
    }
}

/// Serializable snapshot of every public field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionInfo {
    pub address: Address,
    pub owner: Option<Address>,
    pub name: String,
    pub symbol: String,
    pub max_supply: u64,
    pub total_supply: u64,
    pub mint_price: Amount,
    pub max_per_wallet: u64,
    pub sale_active: bool,
    pub whitelist_sale_active: bool,
    /// `0x`-prefixed hex.
    pub whitelist_root: String,
    pub base_uri: String,
    pub treasury: RevenueShare,
    pub platform: RevenueShare,
    pub community: RevenueShare,
    pub airdrop_accounting: AirdropAccounting,
    pub balance: Amount,
}

impl<L: TokenLedger, B: ValueBank> LaunchpadCollection<L, B> {
    // -----------------------------------------------------------------------
    // Deployment
    // -----------------------------------------------------------------------

    /// Validates `params` and deploys a collection owned by `deployer`.
    ///
    /// The collection gets a fresh account from `bank`, derived from the
    /// deployer and its deployment count, so redeploying the same name and
    /// symbol never shares a balance. Both sale phases start closed, the
    /// whitelist root is all zeros, and the base URI is empty.
    pub fn deploy(
        deployer: Address,
        params: CollectionParams,
        tokens: Arc<L>,
        bank: Arc<B>,
    ) -> Result<Self, ConfigurationError> {
        let config = CollectionConfig::new(params).map_err(|e| {
            debug!(deployer = %deployer, error = %e, "deployment rejected");
            e
        })?;

        let address = bank.create_account(&deployer).map_err(|e| {
            debug!(deployer = %deployer, error = %e, "collection account unavailable");
            ConfigurationError::Account(e)
        })?;

        let state = CollectionState {
            owner: Some(deployer),
            sale: SaleState::default(),
            terms: MintTerms {
                mint_price: config.initial_mint_price,
                max_per_wallet: config.initial_max_per_wallet,
            },
            ledger: MintLedger::new(),
        };

        info!(
            address = %address,
            owner = %deployer,
            name = %config.name,
            symbol = %config.symbol,
            max_supply = config.max_supply,
            "collection deployed"
        );

        Ok(Self {
            address,
            config,
            state: RwLock::new(state),
            guard: ReentrancyGuard::new(),
            tokens,
            bank,
        })
    }

    // -----------------------------------------------------------------------
    // Ownership
    // -----------------------------------------------------------------------

    /// Hands every owner privilege to `new_owner`.
    pub fn transfer_ownership(
        &self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> Result<(), LaunchpadError> {
        let _entered = self.guard.enter()?;
        let mut state = self.state.write();
        state.require_owner(ctx)?;
        if new_owner.is_zero() {
            return Err(AuthorizationError::InvalidOwner(new_owner).into());
        }
        state.owner = Some(new_owner);
        info!(previous = %ctx.caller, owner = %new_owner, "ownership transferred");
        Ok(())
    }

    /// Gives up ownership for good. Every owner-only path, withdraw
    /// included, is closed afterwards.
    pub fn renounce_ownership(&self, ctx: &CallContext) -> Result<(), LaunchpadError> {
        let _entered = self.guard.enter()?;
        let mut state = self.state.write();
        state.require_owner(ctx)?;
        state.owner = None;
        info!(previous = %ctx.caller, "ownership renounced");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Option<Address> {
        self.state.read().owner
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn max_supply(&self) -> u64 {
        self.config.max_supply
    }

    pub fn total_supply(&self) -> u64 {
        self.state.read().ledger.total_supply()
    }

    pub fn mint_price(&self) -> Amount {
        self.state.read().terms.mint_price
    }

    pub fn max_per_wallet(&self) -> u64 {
        self.state.read().terms.max_per_wallet
    }

    pub fn sale_active(&self) -> bool {
        self.state.read().sale.sale_active
    }

    pub fn whitelist_sale_active(&self) -> bool {
        self.state.read().sale.whitelist_sale_active
    }

    pub fn whitelist_root(&self) -> Hash32 {
        self.state.read().sale.whitelist_root
    }

    pub fn base_uri(&self) -> String {
        self.state.read().sale.base_uri.clone()
    }

    /// Units `wallet` obtained through the paid mint paths (plus airdrops
    /// under [`AirdropAccounting::Tracked`]).
    pub fn mints_by_wallet(&self, wallet: &Address) -> u64 {
        self.state.read().ledger.mints_by_wallet(wallet)
    }

    pub fn treasury_wallet(&self) -> Address {
        self.config.shares.treasury.wallet
    }

    pub fn platform_wallet(&self) -> Address {
        self.config.shares.platform.wallet
    }

    pub fn community_wallet(&self) -> Address {
        self.config.shares.community.wallet
    }

    pub fn treasury_basis_points(&self) -> u32 {
        self.config.shares.treasury.bps
    }

    pub fn platform_basis_points(&self) -> u32 {
        self.config.shares.platform.bps
    }

    pub fn community_basis_points(&self) -> u32 {
        self.config.shares.community.bps
    }

    pub fn airdrop_accounting(&self) -> AirdropAccounting {
        self.config.airdrop_accounting
    }

    /// Native value currently held by the collection's account.
    pub fn contract_balance(&self) -> Amount {
        self.bank.balance_of(&self.address)
    }

    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.tokens.balance_of(owner)
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, LaunchpadError> {
        Ok(self.tokens.owner_of(token_id)?)
    }

    /// Metadata location: base URI followed by the decimal token id.
    ///
    /// Empty while no base URI is set. Fails for ids that were never minted.
    pub fn token_uri(&self, token_id: TokenId) -> Result<String, LaunchpadError> {
        if !self.tokens.exists(token_id) {
            return Err(LaunchpadError::nonexistent_token(token_id));
        }
        let base = self.base_uri();
        if base.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{base}{token_id}"))
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// The backing token ledger, for queries and receive hooks. New ids are
    /// issued through the mint and airdrop paths only.
    pub fn tokens(&self) -> &Arc<L> {
        &self.tokens
    }

    pub fn bank(&self) -> &Arc<B> {
        &self.bank
    }

    /// Consistent snapshot of every public field.
    pub fn info(&self) -> CollectionInfo {
        let state = self.state.read();
        let shares = self.config.shares;
        CollectionInfo {
            address: self.address,
            owner: state.owner,
            name: self.config.name.clone(),
            symbol: self.config.symbol.clone(),
            max_supply: self.config.max_supply,
            total_supply: state.ledger.total_supply(),
            mint_price: state.terms.mint_price,
            max_per_wallet: state.terms.max_per_wallet,
            sale_active: state.sale.sale_active,
            whitelist_sale_active: state.sale.whitelist_sale_active,
            whitelist_root: hash_to_hex(&state.sale.whitelist_root),
            base_uri: state.sale.base_uri.clone(),
            treasury: shares.treasury,
            platform: shares.platform,
            community: shares.community,
            airdrop_accounting: self.config.airdrop_accounting,
            balance: self.bank.balance_of(&self.address),
        }
    }
}
