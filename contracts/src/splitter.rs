//! # Revenue Splitter
//!
//! Distributes the collection's entire balance to treasury, platform and
//! community in basis-point proportions.
//!
//! ## Rounding
//!
//! Each share is `⌊balance × bps / 10000⌋`, computed independently. The
//! floor-division dust (at most two smallest units across three shares) stays
//! in the collection and is picked up by the next withdraw. Shares are
//! computed as `(B / 10000) × bps + (B % 10000) × bps / 10000`, which is the
//! same value without ever forming the full product.
//!
//! ## Ordering
//!
//! Balance snapshot, all three amounts, then one atomic bank batch. The
//! reentrancy guard is held throughout, so a recipient whose receive hook
//! tries to withdraw again gets `ReentrancyGuardReentrantCall` and its own
//! payment is rolled back with the rest of the batch.

use launchpad_protocol::config::BASIS_POINTS_DENOMINATOR;
use launchpad_protocol::{Address, Amount};
use serde::Serialize;
use tracing::{debug, info};

use crate::bank::ValueBank;
use crate::collection::LaunchpadCollection;
use crate::config::RevenueShares;
use crate::context::CallContext;
use crate::error::{LaunchpadError, PaymentError};
use crate::ledger::TokenLedger;

/// One computed share of a withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayoutLine {
    pub wallet: Address,
    pub bps: u32,
    pub amount: Amount,
}

/// The full result of splitting a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payout {
    /// Balance the split was computed from.
    pub balance: Amount,
    pub treasury: PayoutLine,
    pub platform: PayoutLine,
    pub community: PayoutLine,
    /// Rounding dust left in the collection.
    pub retained: Amount,
}

impl Payout {
    pub fn lines(&self) -> [PayoutLine; 3] {
        [self.treasury, self.platform, self.community]
    }

    pub fn distributed(&self) -> Amount {
        self.treasury.amount + self.platform.amount + self.community.amount
    }

    /// Bank instructions for the non-zero shares.
    pub fn transfers(&self) -> Vec<(Address, Amount)> {
        self.lines()
            .iter()
            .filter(|line| line.amount > 0)
            .map(|line| (line.wallet, line.amount))
            .collect()
    }
}

pub struct RevenueSplitter;

impl RevenueSplitter {
    /// `⌊balance × bps / 10000⌋` without overflow for any `bps <= 10000`.
    pub fn share(balance: Amount, bps: u32) -> Amount {
        let denominator = Amount::from(BASIS_POINTS_DENOMINATOR);
        let bps = Amount::from(bps);
        (balance / denominator) * bps + (balance % denominator) * bps / denominator
    }

    /// Splits `balance` across `shares`.
    pub fn split(balance: Amount, shares: &RevenueShares) -> Payout {
        let line = |wallet: Address, bps: u32| PayoutLine {
            wallet,
            bps,
            amount: Self::share(balance, bps),
        };
        let treasury = line(shares.treasury.wallet, shares.treasury.bps);
        let platform = line(shares.platform.wallet, shares.platform.bps);
        let community = line(shares.community.wallet, shares.community.bps);
        let distributed = treasury.amount + platform.amount + community.amount;

        Payout {
            balance,
            treasury,
            platform,
            community,
            retained: balance - distributed,
        }
    }
}

impl<L: TokenLedger, B: ValueBank> LaunchpadCollection<L, B> {
    /// Pays out the collection's balance according to the revenue split.
    ///
    /// # Errors
    ///
    /// - Unauthorized caller.
    /// - [`PaymentError::NoFunds`] when the balance is zero.
    /// - [`PaymentError::Transfer`] if any recipient rejects; nothing is paid.
    pub fn withdraw(&self, ctx: &CallContext) -> Result<Payout, LaunchpadError> {
        let result = self.guard.enter().map_err(LaunchpadError::from).and_then(|_entered| {
            self.state.read().require_owner(ctx)?;

            let balance = self.bank.balance_of(&self.address);
            if balance == 0 {
                return Err(PaymentError::NoFunds.into());
            }
            let payout = RevenueSplitter::split(balance, &self.config.shares);

            self.bank
                .transfer_batch(&self.address, &payout.transfers())
                .map_err(PaymentError::from)?;
            Ok(payout)
        });

        match &result {
            Ok(payout) => info!(
                balance = payout.balance,
                treasury = payout.treasury.amount,
                platform = payout.platform.amount,
                community = payout.community.amount,
                retained = payout.retained,
                "revenue withdrawn"
            ),
            Err(e) => debug!(caller = %ctx.caller, error = %e, "withdraw rejected"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevenueShare;

    fn shares(t: u32, p: u32, c: u32) -> RevenueShares {
        RevenueShares::new(
            RevenueShare {
                wallet: Address::derive(b"treasury"),
                bps: t,
            },
            RevenueShare {
                wallet: Address::derive(b"platform"),
                bps: p,
            },
            RevenueShare {
                wallet: Address::derive(b"community"),
                bps: c,
            },
        )
        .unwrap()
    }

    #[test]
    fn ninety_ten_split_of_fifty() {
        let payout = RevenueSplitter::split(50, &shares(9000, 1000, 0));
        assert_eq!(payout.treasury.amount, 45);
        assert_eq!(payout.platform.amount, 5);
        assert_eq!(payout.community.amount, 0);
        assert_eq!(payout.retained, 0);
        assert_eq!(payout.transfers().len(), 2);
    }

    #[test]
    fn dust_is_retained() {
        let payout = RevenueSplitter::split(10, &shares(3333, 3333, 3334));
        assert_eq!(payout.treasury.amount, 3);
        assert_eq!(payout.platform.amount, 3);
        assert_eq!(payout.community.amount, 3);
        assert_eq!(payout.retained, 1);
        assert_eq!(payout.distributed() + payout.retained, 10);
    }

    #[test]
    fn share_matches_naive_formula() {
        for balance in [0u128, 1, 9_999, 10_000, 10_001, 123_456_789, 1_000_000_000_000_000_007] {
            for bps in [0u32, 1, 2_500, 3_333, 9_999, 10_000] {
                let naive = balance * Amount::from(bps) / 10_000;
                assert_eq!(RevenueSplitter::share(balance, bps), naive, "{balance} {bps}");
            }
        }
    }

    #[test]
    fn share_of_max_balance_does_not_overflow() {
        assert_eq!(RevenueSplitter::share(Amount::MAX, 10_000), Amount::MAX);
        let payout = RevenueSplitter::split(Amount::MAX, &shares(5000, 3000, 2000));
        assert!(payout.distributed() <= Amount::MAX);
        assert!(payout.retained <= 2);
    }

    #[test]
    fn everything_to_one_recipient() {
        let payout = RevenueSplitter::split(777, &shares(10_000, 0, 0));
        assert_eq!(payout.treasury.amount, 777);
        assert_eq!(
            payout.transfers(),
            vec![(Address::derive(b"treasury"), 777)]
        );
    }
}
