//! # Protocol Configuration & Constants
//!
//! Every magic number in the launchpad lives here. If you're hardcoding a
//! constant somewhere else, you're doing it wrong and you owe the team coffee.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Version of the launchpad protocol primitives.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Identity & Hashing
// ---------------------------------------------------------------------------

/// Account addresses are 20 bytes, same as every EVM chain. Cronos included.
pub const ADDRESS_LENGTH: usize = 20;

/// Keccak-256 output length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// The hash function used for whitelist leaves and tree nodes.
pub const WHITELIST_HASH_FUNCTION: &str = "Keccak-256";

// ---------------------------------------------------------------------------
// Native Currency
// ---------------------------------------------------------------------------

/// Ticker of the native currency that mints are paid in.
pub const NATIVE_SYMBOL: &str = "CRO";

/// Decimal places of the native currency. 18, like every EVM chain.
pub const NATIVE_DECIMALS: u32 = 18;

/// Smallest units per whole CRO (10^18).
pub const UNITS_PER_NATIVE: u128 = 1_000_000_000_000_000_000;

// ---------------------------------------------------------------------------
// Collection Parameters
// ---------------------------------------------------------------------------

/// Revenue split weights are expressed in basis points and must add up to
/// exactly this value. 100 bps = 1%.
pub const BASIS_POINTS_DENOMINATOR: u32 = 10_000;

/// Token ids are assigned sequentially starting here. Id 0 is never minted.
pub const FIRST_TOKEN_ID: u64 = 1;
