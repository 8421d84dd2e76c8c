//! Command handlers. Each returns the text to print so the binary stays a
//! thin dispatcher and the handlers can be tested without a process.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use launchpad_contracts::{
    CollectionConfig, CollectionParams, InMemoryBank, InMemoryTokenLedger, LaunchpadCollection,
    Payout, PayoutLine, RevenueSplitter,
};
use launchpad_protocol::config::{NATIVE_SYMBOL, PROTOCOL_VERSION};
use launchpad_protocol::crypto::{leaf_hash, verify_proof};
use launchpad_protocol::types::hash_from_hex;
use launchpad_protocol::units::{format_native, parse_native};
use launchpad_protocol::{Address, Hash32};
use tracing::info;

use crate::manifest::WhitelistManifest;

/// `12.50%` from basis points.
fn percent(bps: u32) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

pub fn check(params: CollectionParams, deployer: Option<Address>) -> Result<String> {
    let config = CollectionConfig::new(params.clone()).context("invalid collection parameters")?;

    let mut out = String::new();
    writeln!(out, "Collection:      {} ({})", config.name, config.symbol)?;
    writeln!(out, "Max supply:      {}", config.max_supply)?;
    writeln!(
        out,
        "Mint price:      {} {NATIVE_SYMBOL}",
        format_native(config.initial_mint_price)
    )?;
    writeln!(out, "Max per wallet:  {}", config.initial_max_per_wallet)?;
    writeln!(out, "Airdrops:        {}", config.airdrop_accounting)?;
    for (label, share) in ["Treasury", "Platform", "Community"]
        .iter()
        .zip(config.shares.as_array())
    {
        writeln!(
            out,
            "{:<16} {} {:>7}",
            format!("{label}:"),
            share.wallet,
            percent(share.bps)
        )?;
    }

    if let Some(deployer) = deployer {
        let collection = LaunchpadCollection::deploy(
            deployer,
            params,
            Arc::new(InMemoryTokenLedger::new()),
            Arc::new(InMemoryBank::new()),
        )?;
        writeln!(out, "Address:         {}", collection.address())?;
        writeln!(out, "Owner:           {deployer}")?;
    }

    info!(name = %config.name, symbol = %config.symbol, "parameters valid");
    Ok(out)
}

pub fn whitelist_build(addresses: &[Address]) -> Result<WhitelistManifest> {
    let manifest = WhitelistManifest::build(addresses)?;
    info!(
        addresses = addresses.len(),
        root = %manifest.root,
        "whitelist built"
    );
    Ok(manifest)
}

pub fn whitelist_verify(root: &str, address: &str, proof: &[String]) -> Result<bool> {
    let root = hash_from_hex(root).context("invalid root")?;
    let address: Address = address.parse().context("invalid address")?;
    let proof = proof
        .iter()
        .enumerate()
        .map(|(i, h)| hash_from_hex(h).with_context(|| format!("invalid proof element {i}")))
        .collect::<Result<Vec<Hash32>>>()?;

    Ok(verify_proof(&leaf_hash(&address), &proof, &root))
}

pub fn split(params: CollectionParams, balance: &str) -> Result<String> {
    let config = CollectionConfig::new(params).context("invalid collection parameters")?;
    let balance = parse_native(balance).context("invalid balance")?;
    Ok(render_payout(&RevenueSplitter::split(balance, &config.shares)))
}

fn render_payout(payout: &Payout) -> String {
    let line = |label: &str, l: &PayoutLine| {
        format!(
            "{:<11} {} {:>7}  {} {NATIVE_SYMBOL}\n",
            format!("{label}:"),
            l.wallet,
            percent(l.bps),
            format_native(l.amount)
        )
    };
    let mut out = format!(
        "Balance:    {} {NATIVE_SYMBOL}\n",
        format_native(payout.balance)
    );
    out.push_str(&line("Treasury", &payout.treasury));
    out.push_str(&line("Platform", &payout.platform));
    out.push_str(&line("Community", &payout.community));
    out.push_str(&format!(
        "Retained:   {} {NATIVE_SYMBOL}\n",
        format_native(payout.retained)
    ));
    out
}

pub fn version() -> String {
    format!(
        "launchpad {}\nprotocol {PROTOCOL_VERSION}",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_contracts::AirdropAccounting;
    use launchpad_protocol::types::hash_to_hex;

    fn addr(n: &str) -> Address {
        Address::derive(n.as_bytes())
    }

    fn params() -> CollectionParams {
        CollectionParams {
            name: "Cronos Cats".into(),
            symbol: "CCAT".into(),
            max_supply: 100,
            mint_price: 10_000_000_000_000_000_000,
            max_per_wallet: 5,
            treasury_wallet: addr("treasury"),
            platform_wallet: addr("platform"),
            treasury_bps: 8_750,
            platform_bps: 1_000,
            community_wallet: addr("community"),
            community_bps: 250,
            airdrop_accounting: AirdropAccounting::Untracked,
        }
    }

    #[test]
    fn check_summarizes_parameters() {
        let report = check(params(), None).unwrap();
        assert!(report.contains("Cronos Cats (CCAT)"));
        assert!(report.contains("10.0 CRO"));
        assert!(report.contains("87.50%"));
        assert!(report.contains("2.50%"));
        assert!(!report.contains("Address:"));
    }

    #[test]
    fn check_with_deployer_prints_derived_address() {
        let deployer = addr("deployer");
        let report = check(params(), Some(deployer)).unwrap();
        let expected = LaunchpadCollection::deploy(
            deployer,
            params(),
            Arc::new(InMemoryTokenLedger::new()),
            Arc::new(InMemoryBank::new()),
        )
        .unwrap()
        .address();
        assert!(report.contains(&expected.to_hex()));
    }

    #[test]
    fn check_rejects_bad_split() {
        let mut p = params();
        p.community_bps = 0;
        let err = check(p, None).unwrap_err();
        assert!(format!("{err:#}").contains("Basis points must sum to 10000 (got 9750)"));
    }

    #[test]
    fn split_preview_matches_withdraw() {
        let report = split(params(), "50").unwrap();
        assert!(report.contains("Balance:    50.0 CRO"));
        assert!(report.contains("43.75 CRO"));
        assert!(report.contains("5.0 CRO"));
        assert!(report.contains("1.25 CRO"));
        assert!(report.contains("Retained:   0.0 CRO"));
    }

    #[test]
    fn split_rejects_unparseable_balance() {
        assert!(split(params(), "fifty").is_err());
    }

    #[test]
    fn built_proofs_verify() {
        let list = [addr("a"), addr("b"), addr("c")];
        let manifest = whitelist_build(&list).unwrap();
        for a in &list {
            let proof = &manifest.proofs[&a.to_hex()];
            assert!(whitelist_verify(&manifest.root, &a.to_hex(), proof).unwrap());
        }
        let stranger = addr("stranger").to_hex();
        let proof = &manifest.proofs[&addr("a").to_hex()];
        assert!(!whitelist_verify(&manifest.root, &stranger, proof).unwrap());
    }

    #[test]
    fn single_entry_whitelist_needs_no_proof() {
        let a = addr("solo");
        let root = hash_to_hex(&leaf_hash(&a));
        assert!(whitelist_verify(&root, &a.to_hex(), &[]).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_input() {
        let a = addr("a").to_hex();
        assert!(whitelist_verify("0x1234", &a, &[]).is_err());
        let root = hash_to_hex(&[7u8; 32]);
        assert!(whitelist_verify(&root, "nope", &[]).is_err());
        assert!(whitelist_verify(&root, &a, &["zz".to_string()]).is_err());
    }

    #[test]
    fn version_names_both_crates() {
        let v = version();
        assert!(v.contains(env!("CARGO_PKG_VERSION")));
        assert!(v.contains(PROTOCOL_VERSION));
    }
}
