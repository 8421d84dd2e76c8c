//! Shared fixtures for unit tests.

use std::sync::Arc;

use launchpad_protocol::{Address, Amount};

use crate::bank::InMemoryBank;
use crate::collection::LaunchpadCollection;
use crate::config::{AirdropAccounting, CollectionParams};
use crate::ledger::{InMemoryTokenLedger, Issuance, ReceiveHook};

pub fn deployer() -> Address {
    Address::derive(b"deployer")
}

/// 100 supply, price 10, cap 5, 90/10/0 split.
pub fn params() -> CollectionParams {
    CollectionParams {
        name: "Cronos Cats".into(),
        symbol: "CCAT".into(),
        max_supply: 100,
        mint_price: 10,
        max_per_wallet: 5,
        treasury_wallet: Address::derive(b"treasury"),
        platform_wallet: Address::derive(b"platform"),
        treasury_bps: 9000,
        platform_bps: 1000,
        community_wallet: Address::derive(b"community"),
        community_bps: 0,
        airdrop_accounting: AirdropAccounting::Untracked,
    }
}

pub fn collection_with(params: CollectionParams) -> LaunchpadCollection {
    LaunchpadCollection::deploy(
        deployer(),
        params,
        Arc::new(InMemoryTokenLedger::new()),
        Arc::new(InMemoryBank::new()),
    )
    .expect("fixture params are valid")
}

pub fn collection() -> LaunchpadCollection {
    collection_with(params())
}

/// Derives an address from `seed` and credits it with `amount`.
pub fn funded(collection: &LaunchpadCollection, seed: &[u8], amount: Amount) -> Address {
    let address = Address::derive(seed);
    collection
        .bank()
        .deposit(&address, amount)
        .expect("faucet deposit");
    address
}

pub fn token_hook(
    f: impl Fn(&Issuance) -> Result<(), String> + Send + Sync + 'static,
) -> ReceiveHook {
    Arc::new(f)
}
