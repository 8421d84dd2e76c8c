//! Input and output documents: collection parameter files, whitelist address
//! lists, and the whitelist proof manifest handed to the mint frontend.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use launchpad_contracts::CollectionParams;
use launchpad_protocol::crypto::MerkleTree;
use launchpad_protocol::types::hash_to_hex;
use launchpad_protocol::Address;
use serde::{Deserialize, Serialize};

/// Root plus one proof per whitelisted address, all hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistManifest {
    pub root: String,
    pub proofs: BTreeMap<String, Vec<String>>,
}

impl WhitelistManifest {
    /// Builds the tree over `addresses` in the given order.
    pub fn build(addresses: &[Address]) -> Result<Self> {
        let tree = MerkleTree::from_addresses(addresses).context("building whitelist tree")?;
        let mut proofs = BTreeMap::new();
        for address in addresses {
            let proof = tree
                .proof_for(address)
                .with_context(|| format!("no proof for {address}"))?;
            proofs.insert(address.to_hex(), proof.iter().map(hash_to_hex).collect());
        }
        Ok(Self {
            root: hash_to_hex(&tree.root()),
            proofs,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing whitelist manifest")
    }
}

pub fn load_params(path: &Path) -> Result<CollectionParams> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading parameter file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_addresses(path: &Path) -> Result<Vec<Address>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading address list {}", path.display()))?;
    parse_addresses(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Accepts a JSON array of hex strings, or one address per line with blank
/// lines and `#` comments ignored.
pub fn parse_addresses(raw: &str) -> Result<Vec<Address>> {
    let trimmed = raw.trim_start();
    let addresses: Vec<Address> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).context("invalid JSON address array")?
    } else {
        raw.lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(n, line)| {
                line.parse::<Address>()
                    .with_context(|| format!("line {n}: invalid address {line:?}"))
            })
            .collect::<Result<_>>()?
    };

    if addresses.is_empty() {
        bail!("address list is empty");
    }
    Ok(addresses)
}

pub fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(path) => fs::write(path, contents)
            .with_context(|| format!("writing {}", path.display())),
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_protocol::crypto::{leaf_hash, verify_proof};
    use launchpad_protocol::types::hash_from_hex;
    use std::io::Write;

    fn addr(n: &str) -> Address {
        Address::derive(n.as_bytes())
    }

    #[test]
    fn parses_line_list_with_comments() {
        let a = addr("a");
        let b = addr("b");
        let text = format!("# presale list\n\n{a}\n  {b}  # second\n");
        assert_eq!(parse_addresses(&text).unwrap(), vec![a, b]);
    }

    #[test]
    fn parses_json_array() {
        let a = addr("a");
        let b = addr("b");
        let text = format!("[\"{a}\", \"{b}\"]");
        assert_eq!(parse_addresses(&text).unwrap(), vec![a, b]);
    }

    #[test]
    fn reports_bad_line_number() {
        let text = format!("{}\nnot-an-address\n", addr("a"));
        let err = parse_addresses(&text).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(parse_addresses("# nobody\n\n").is_err());
        assert!(parse_addresses("[]").is_err());
    }

    #[test]
    fn manifest_proofs_verify_against_root() {
        let list: Vec<Address> = (0..5).map(|i| addr(&format!("w{i}"))).collect();
        let manifest = WhitelistManifest::build(&list).unwrap();
        let root = hash_from_hex(&manifest.root).unwrap();

        assert_eq!(manifest.proofs.len(), 5);
        for a in &list {
            let proof: Vec<_> = manifest.proofs[&a.to_hex()]
                .iter()
                .map(|h| hash_from_hex(h).unwrap())
                .collect();
            assert!(verify_proof(&leaf_hash(a), &proof, &root));
        }
    }

    #[test]
    fn manifest_rejects_duplicates() {
        assert!(WhitelistManifest::build(&[addr("a"), addr("a")]).is_err());
    }

    #[test]
    fn loads_params_file() {
        let params = CollectionParams {
            name: "Cronos Cats".into(),
            symbol: "CCAT".into(),
            max_supply: 100,
            mint_price: 10,
            max_per_wallet: 5,
            treasury_wallet: addr("treasury"),
            platform_wallet: addr("platform"),
            treasury_bps: 9_000,
            platform_bps: 1_000,
            community_wallet: addr("community"),
            community_bps: 0,
            airdrop_accounting: Default::default(),
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&params).unwrap().as_bytes())
            .unwrap();

        assert_eq!(load_params(file.path()).unwrap(), params);
    }

    #[test]
    fn params_without_airdrop_policy_default_to_untracked() {
        let json = format!(
            r#"{{"name":"X","symbol":"X","max_supply":1,"mint_price":0,"max_per_wallet":1,
                "treasury_wallet":"{t}","platform_wallet":"{t}","treasury_bps":10000,
                "platform_bps":0,"community_wallet":"{t}","community_bps":0}}"#,
            t = addr("t")
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, json).unwrap();

        let params = load_params(&path).unwrap();
        assert_eq!(
            params.airdrop_accounting,
            launchpad_contracts::AirdropAccounting::Untracked
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_params(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn writes_manifest_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whitelist.json");
        let manifest = WhitelistManifest::build(&[addr("a"), addr("b")]).unwrap();
        write_output(Some(&path), &manifest.to_json().unwrap()).unwrap();

        let back: WhitelistManifest =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, manifest);
    }
}
