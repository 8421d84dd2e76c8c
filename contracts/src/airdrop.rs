//! Owner airdrops.
//!
//! Free issuance that ignores both sale phases and the wallet cap. The whole
//! batch is reserved up front and issued with a single ledger call, so either
//! every recipient gets their tokens or nobody does.
//!
//! Whether the units land in `mints_by_wallet` is the collection's
//! [`AirdropAccounting`](crate::config::AirdropAccounting) policy.

use launchpad_protocol::Address;
use tracing::{debug, info};

use crate::allocator::Allocation;
use crate::bank::ValueBank;
use crate::collection::LaunchpadCollection;
use crate::config::AirdropAccounting;
use crate::context::CallContext;
use crate::error::LaunchpadError;
use crate::ledger::TokenLedger;

impl<L: TokenLedger, B: ValueBank> LaunchpadCollection<L, B> {
    /// Issues `quantity_each` tokens to every recipient, in order.
    ///
    /// Returns one allocation per recipient. An empty recipient list is a
    /// no-op.
    pub fn airdrop(
        &self,
        ctx: &CallContext,
        recipients: &[Address],
        quantity_each: u64,
    ) -> Result<Vec<Allocation>, LaunchpadError> {
        let result = self.guard.enter().map_err(LaunchpadError::from).and_then(|_entered| {
            let allocations = {
                let state = self.state.read();
                state.require_owner(ctx)?;
                let counted = self.config.airdrop_accounting == AirdropAccounting::Tracked;
                state.allocator(&self.config).authorize_batch(
                    &state.ledger,
                    recipients,
                    quantity_each,
                    counted,
                )?
            };
            if !allocations.is_empty() {
                self.settle(ctx, &allocations, 0)?;
            }
            Ok(allocations)
        });

        match &result {
            Ok(allocations) => info!(
                recipients = recipients.len(),
                quantity_each,
                total = allocations.iter().map(|a| a.quantity).sum::<u64>(),
                accounting = %self.config.airdrop_accounting,
                "airdrop issued"
            ),
            Err(e) => debug!(
                caller = %ctx.caller,
                recipients = recipients.len(),
                quantity_each,
                error = %e,
                "airdrop rejected"
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use launchpad_protocol::Address;

    use crate::config::AirdropAccounting;
    use crate::context::CallContext;
    use crate::error::{AuthorizationError, LaunchpadError, SupplyError};
    use crate::ledger::{LedgerError, TokenLedger};
    use crate::testing::{collection, collection_with, deployer, params};

    #[test]
    fn airdrop_two_each() {
        let c = collection();
        let a = Address::derive(b"a");
        let b = Address::derive(b"b");

        let allocations = c.airdrop(&CallContext::new(deployer()), &[a, b], 2).unwrap();

        assert_eq!(allocations.len(), 2);
        assert_eq!(c.total_supply(), 4);
        assert_eq!(c.balance_of(&a), 2);
        assert_eq!(c.balance_of(&b), 2);
        assert_eq!(c.owner_of(3).unwrap(), b);
        assert_eq!(c.mints_by_wallet(&a), 0);
        assert_eq!(c.mints_by_wallet(&b), 0);
    }

    #[test]
    fn airdrop_ignores_sale_flags_and_cap() {
        let c = collection();
        let a = Address::derive(b"a");
        c.airdrop(&CallContext::new(deployer()), &[a], 20).unwrap();
        assert_eq!(c.balance_of(&a), 20);
        assert!(!c.sale_active());
    }

    #[test]
    fn over_supply_batch_issues_nothing() {
        let c = collection();
        let recipients: Vec<Address> = (0..11)
            .map(|i| Address::derive(format!("r{i}").as_bytes()))
            .collect();
        assert_eq!(
            c.airdrop(&CallContext::new(deployer()), &recipients, 10),
            Err(LaunchpadError::from(SupplyError::ExceedsMaxSupply))
        );
        assert_eq!(c.total_supply(), 0);
        assert_eq!(c.balance_of(&recipients[0]), 0);
    }

    #[test]
    fn zero_address_recipient_fails_whole_batch() {
        let c = collection();
        let a = Address::derive(b"a");
        assert_eq!(
            c.airdrop(&CallContext::new(deployer()), &[a, Address::ZERO], 1),
            Err(LaunchpadError::from(LedgerError::InvalidReceiver(Address::ZERO)))
        );
        assert_eq!(c.total_supply(), 0);
        assert!(!c.tokens().exists(1));
    }

    #[test]
    fn stranger_cannot_airdrop() {
        let c = collection();
        let stranger = Address::derive(b"stranger");
        assert_eq!(
            c.airdrop(&CallContext::new(stranger), &[stranger], 1),
            Err(LaunchpadError::from(AuthorizationError::Unauthorized(stranger)))
        );
        assert_eq!(c.total_supply(), 0);
    }

    #[test]
    fn zero_quantity_and_empty_list() {
        let c = collection();
        let owner = CallContext::new(deployer());
        assert_eq!(
            c.airdrop(&owner, &[Address::derive(b"a")], 0),
            Err(LaunchpadError::from(SupplyError::ZeroQuantity))
        );
        assert_eq!(c.airdrop(&owner, &[], 3), Ok(vec![]));
        assert_eq!(c.total_supply(), 0);
    }

    #[test]
    fn tracked_policy_counts_toward_wallet_cap() {
        let mut p = params();
        p.airdrop_accounting = AirdropAccounting::Tracked;
        let c = collection_with(p);
        let owner = CallContext::new(deployer());
        let a = Address::derive(b"a");

        c.airdrop(&owner, &[a], 4).unwrap();
        assert_eq!(c.mints_by_wallet(&a), 4);

        c.set_mint_price(&owner, 0).unwrap();
        c.set_sale_active(&owner, true).unwrap();
        c.mint_public(&CallContext::new(a), 1).unwrap();
        assert_eq!(
            c.mint_public(&CallContext::new(a), 1),
            Err(LaunchpadError::from(SupplyError::ExceedsWalletLimit))
        );
    }
}
