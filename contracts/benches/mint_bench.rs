// Collection hot-path benchmarks.
//
// Public and whitelist mints end to end (guard, checks, payment, issuance,
// commit), airdrop batches, and the withdraw split arithmetic.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use launchpad_contracts::{
    AirdropAccounting, CallContext, CollectionParams, InMemoryBank, InMemoryTokenLedger,
    LaunchpadCollection, RevenueSplitter,
};
use launchpad_protocol::crypto::MerkleTree;
use launchpad_protocol::Address;

const BUYERS: usize = 1_000;

fn params() -> CollectionParams {
    CollectionParams {
        name: "Bench Bears".into(),
        symbol: "BEAR".into(),
        max_supply: u64::MAX,
        mint_price: 10,
        max_per_wallet: u64::MAX,
        treasury_wallet: Address::derive(b"treasury"),
        platform_wallet: Address::derive(b"platform"),
        treasury_bps: 8_500,
        platform_bps: 1_000,
        community_wallet: Address::derive(b"community"),
        community_bps: 500,
        airdrop_accounting: AirdropAccounting::Untracked,
    }
}

fn buyers() -> Vec<Address> {
    (0..BUYERS)
        .map(|i| Address::derive(format!("buyer-{i}").as_bytes()))
        .collect()
}

fn open_collection(buyers: &[Address]) -> LaunchpadCollection {
    let owner = Address::derive(b"owner");
    let c = LaunchpadCollection::deploy(
        owner,
        params(),
        Arc::new(InMemoryTokenLedger::new()),
        Arc::new(InMemoryBank::new()),
    )
    .unwrap();
    for b in buyers {
        c.bank().deposit(b, u64::MAX as u128).unwrap();
    }
    let tree = MerkleTree::from_addresses(buyers).unwrap();
    let ctx = CallContext::new(owner);
    c.set_whitelist_merkle_root(&ctx, tree.root()).unwrap();
    c.set_whitelist_sale_active(&ctx, true).unwrap();
    c.set_sale_active(&ctx, true).unwrap();
    c
}

fn bench_public_mint(c: &mut Criterion) {
    let buyers = buyers();
    let collection = open_collection(&buyers);
    let mut i = 0usize;

    c.bench_function("collection/mint_public", |b| {
        b.iter(|| {
            let buyer = buyers[i % BUYERS];
            i += 1;
            collection
                .mint_public(&CallContext::with_value(buyer, 10), 1)
                .unwrap()
        });
    });
}

fn bench_whitelist_mint(c: &mut Criterion) {
    let buyers = buyers();
    let collection = open_collection(&buyers);
    let tree = MerkleTree::from_addresses(&buyers).unwrap();
    let proofs: Vec<_> = buyers.iter().map(|b| tree.proof_for(b).unwrap()).collect();
    let mut i = 0usize;

    c.bench_function("collection/mint_whitelist", |b| {
        b.iter(|| {
            let n = i % BUYERS;
            i += 1;
            collection
                .mint_whitelist(&CallContext::with_value(buyers[n], 10), 1, &proofs[n])
                .unwrap()
        });
    });
}

fn bench_airdrop(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection/airdrop");
    let buyers = buyers();
    let owner = CallContext::new(Address::derive(b"owner"));

    for size in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || open_collection(&[]),
                |collection| collection.airdrop(&owner, &buyers[..size], 1).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let config = launchpad_contracts::CollectionConfig::new(params()).unwrap();
    c.bench_function("splitter/split", |b| {
        b.iter(|| RevenueSplitter::split(123_456_789_000_000_000_000, &config.shares));
    });
}

criterion_group!(
    benches,
    bench_public_mint,
    bench_whitelist_mint,
    bench_airdrop,
    bench_split
);
criterion_main!(benches);
