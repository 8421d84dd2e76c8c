//! # Collection Configuration
//!
//! Deployment parameters and their validation. The identity of a collection
//! (name, symbol, supply ceiling) and its revenue split are fixed for its
//! whole lifetime. Price and wallet cap start from these parameters but live
//! in [`MintTerms`](crate::state::MintTerms) because the owner can change them.

use launchpad_protocol::config::BASIS_POINTS_DENOMINATOR;
use launchpad_protocol::{Address, Amount};
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

// ---------------------------------------------------------------------------
// Airdrop policy
// ---------------------------------------------------------------------------

/// Whether airdropped units count toward a wallet's paid-mint tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirdropAccounting {
    /// Airdrops never touch `mints_by_wallet`. A recipient can still buy up
    /// to the full wallet cap afterwards.
    #[default]
    Untracked,
    /// Airdropped units are added to `mints_by_wallet`. The cap is not
    /// enforced on the airdrop itself, only on later paid mints.
    Tracked,
}

impl std::fmt::Display for AirdropAccounting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AirdropAccounting::Untracked => write!(f, "untracked"),
            AirdropAccounting::Tracked => write!(f, "tracked"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Raw deployment parameters, in deployment argument order.
///
/// Amounts are in smallest native units. This is also the JSON document
/// format the operator tooling reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionParams {
    pub name: String,
    pub symbol: String,
    pub max_supply: u64,
    pub mint_price: Amount,
    pub max_per_wallet: u64,
    pub treasury_wallet: Address,
    pub platform_wallet: Address,
    pub treasury_bps: u32,
    pub platform_bps: u32,
    pub community_wallet: Address,
    pub community_bps: u32,
    /// Defaults to [`AirdropAccounting::Untracked`] when omitted.
    #[serde(default)]
    pub airdrop_accounting: AirdropAccounting,
}

// ---------------------------------------------------------------------------
// Revenue split
// ---------------------------------------------------------------------------

/// One recipient of the withdraw split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueShare {
    pub wallet: Address,
    pub bps: u32,
}

/// The three-way split, guaranteed to sum to [`BASIS_POINTS_DENOMINATOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueShares {
    pub treasury: RevenueShare,
    pub platform: RevenueShare,
    pub community: RevenueShare,
}

impl RevenueShares {
    /// Validates and builds the split.
    ///
    /// The sum is computed in `u64`, so three `u32::MAX` weights cannot wrap
    /// around to 10000.
    pub fn new(
        treasury: RevenueShare,
        platform: RevenueShare,
        community: RevenueShare,
    ) -> Result<Self, ConfigurationError> {
        let total = u64::from(treasury.bps) + u64::from(platform.bps) + u64::from(community.bps);
        if total != u64::from(BASIS_POINTS_DENOMINATOR) {
            return Err(ConfigurationError::InvalidBasisPoints(total));
        }
        Ok(Self {
            treasury,
            platform,
            community,
        })
    }

    /// Shares in payout order: treasury, platform, community.
    pub fn as_array(&self) -> [RevenueShare; 3] {
        [self.treasury, self.platform, self.community]
    }
}

// ---------------------------------------------------------------------------
// Validated configuration
// ---------------------------------------------------------------------------

/// The immutable part of a deployed collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionConfig {
    pub name: String,
    pub symbol: String,
    pub max_supply: u64,
    pub shares: RevenueShares,
    pub airdrop_accounting: AirdropAccounting,
    /// Price at deployment. The live value is in `MintTerms`.
    pub initial_mint_price: Amount,
    /// Wallet cap at deployment. The live value is in `MintTerms`.
    pub initial_max_per_wallet: u64,
}

impl CollectionConfig {
    /// Validates deployment parameters.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidBasisPoints`] if the weights do not sum
    ///   to 10000.
    /// - [`ConfigurationError::ZeroMaxSupply`] / [`ConfigurationError::ZeroMaxPerWallet`]
    ///   for zero ceilings.
    pub fn new(params: CollectionParams) -> Result<Self, ConfigurationError> {
        let shares = RevenueShares::new(
            RevenueShare {
                wallet: params.treasury_wallet,
                bps: params.treasury_bps,
            },
            RevenueShare {
                wallet: params.platform_wallet,
                bps: params.platform_bps,
            },
            RevenueShare {
                wallet: params.community_wallet,
                bps: params.community_bps,
            },
        )?;

        if params.max_supply == 0 {
            return Err(ConfigurationError::ZeroMaxSupply);
        }
        if params.max_per_wallet == 0 {
            return Err(ConfigurationError::ZeroMaxPerWallet);
        }

        Ok(Self {
            name: params.name,
            symbol: params.symbol,
            max_supply: params.max_supply,
            shares,
            airdrop_accounting: params.airdrop_accounting,
            initial_mint_price: params.mint_price,
            initial_max_per_wallet: params.max_per_wallet,
        })
    }
}
