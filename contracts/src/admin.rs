//! Owner-gated setters.
//!
//! Plain assignments: each takes effect for the very next call and none is
//! validated against mint history. Lowering the wallet cap below what a
//! wallet already holds simply stops that wallet from buying more.

use launchpad_protocol::types::hash_to_hex;
use launchpad_protocol::{Amount, Hash32};
use tracing::{debug, info};

use crate::bank::ValueBank;
use crate::collection::{CollectionState, LaunchpadCollection};
use crate::context::CallContext;
use crate::error::LaunchpadError;
use crate::ledger::TokenLedger;

impl<L: TokenLedger, B: ValueBank> LaunchpadCollection<L, B> {
    /// Runs `update` on the state as the owner, inside the guard.
    fn owner_update<F>(
        &self,
        ctx: &CallContext,
        setting: &'static str,
        update: F,
    ) -> Result<(), LaunchpadError>
    where
        F: FnOnce(&mut CollectionState),
    {
        let result = self.guard.enter().map_err(LaunchpadError::from).and_then(|_entered| {
            let mut state = self.state.write();
            state.require_owner(ctx)?;
            update(&mut state);
            Ok(())
        });
        if let Err(e) = &result {
            debug!(caller = %ctx.caller, setting, error = %e, "admin change rejected");
        }
        result
    }

    /// Opens or closes the public sale.
    pub fn set_sale_active(&self, ctx: &CallContext, active: bool) -> Result<(), LaunchpadError> {
        self.owner_update(ctx, "sale_active", |state| state.sale.sale_active = active)?;
        info!(active, "public sale toggled");
        Ok(())
    }

    /// Opens or closes the whitelist sale. Independent of the public sale.
    pub fn set_whitelist_sale_active(
        &self,
        ctx: &CallContext,
        active: bool,
    ) -> Result<(), LaunchpadError> {
        self.owner_update(ctx, "whitelist_sale_active", |state| {
            state.sale.whitelist_sale_active = active
        })?;
        info!(active, "whitelist sale toggled");
        Ok(())
    }

    /// Publishes a new whitelist commitment. Proofs against the old root stop
    /// working immediately.
    pub fn set_whitelist_merkle_root(
        &self,
        ctx: &CallContext,
        root: Hash32,
    ) -> Result<(), LaunchpadError> {
        self.owner_update(ctx, "whitelist_root", |state| state.sale.whitelist_root = root)?;
        info!(root = %hash_to_hex(&root), "whitelist root updated");
        Ok(())
    }

    pub fn set_mint_price(&self, ctx: &CallContext, price: Amount) -> Result<(), LaunchpadError> {
        self.owner_update(ctx, "mint_price", |state| state.terms.mint_price = price)?;
        info!(price, "mint price updated");
        Ok(())
    }

    /// Zero is accepted and closes both paid mint paths.
    pub fn set_max_per_wallet(&self, ctx: &CallContext, max: u64) -> Result<(), LaunchpadError> {
        self.owner_update(ctx, "max_per_wallet", |state| state.terms.max_per_wallet = max)?;
        info!(max, "wallet cap updated");
        Ok(())
    }

    pub fn set_base_uri(&self, ctx: &CallContext, base_uri: String) -> Result<(), LaunchpadError> {
        self.owner_update(ctx, "base_uri", |state| state.sale.base_uri = base_uri)?;
        info!(base_uri = %self.base_uri(), "base URI updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::context::CallContext;
    use crate::error::{AuthorizationError, LaunchpadError, StateError};
    use crate::testing::{collection, deployer};
    use launchpad_protocol::Address;

    #[test]
    fn owner_can_set_everything() {
        let c = collection();
        let owner = CallContext::new(deployer());

        c.set_sale_active(&owner, true).unwrap();
        c.set_whitelist_sale_active(&owner, true).unwrap();
        c.set_whitelist_merkle_root(&owner, [7u8; 32]).unwrap();
        c.set_mint_price(&owner, 25).unwrap();
        c.set_max_per_wallet(&owner, 2).unwrap();
        c.set_base_uri(&owner, "https://meta.example/".into()).unwrap();

        assert!(c.sale_active());
        assert!(c.whitelist_sale_active());
        assert_eq!(c.whitelist_root(), [7u8; 32]);
        assert_eq!(c.mint_price(), 25);
        assert_eq!(c.max_per_wallet(), 2);
        assert_eq!(c.base_uri(), "https://meta.example/");

        c.set_sale_active(&owner, false).unwrap();
        assert!(!c.sale_active());
        assert!(c.whitelist_sale_active());
    }

    #[test]
    fn stranger_is_rejected_and_nothing_changes() {
        let c = collection();
        let stranger_addr = Address::derive(b"stranger");
        let stranger = CallContext::new(stranger_addr);
        let before = c.info();
        let unauthorized = LaunchpadError::from(AuthorizationError::Unauthorized(stranger_addr));

        assert_eq!(c.set_sale_active(&stranger, true), Err(unauthorized.clone()));
        assert_eq!(
            c.set_whitelist_sale_active(&stranger, true),
            Err(unauthorized.clone())
        );
        assert_eq!(
            c.set_whitelist_merkle_root(&stranger, [1u8; 32]),
            Err(unauthorized.clone())
        );
        assert_eq!(c.set_mint_price(&stranger, 0), Err(unauthorized.clone()));
        assert_eq!(c.set_max_per_wallet(&stranger, 100), Err(unauthorized.clone()));
        assert_eq!(c.set_base_uri(&stranger, "x".into()), Err(unauthorized.clone()));

        assert_eq!(c.info(), before);
        assert_eq!(
            unauthorized.to_string(),
            format!("OwnableUnauthorizedAccount({stranger_addr})")
        );
    }

    #[test]
    fn setters_are_guarded() {
        let c = collection();
        let _entered = c.guard.enter().unwrap();
        assert_eq!(
            c.set_mint_price(&CallContext::new(deployer()), 1),
            Err(LaunchpadError::from(StateError::ReentrantCall))
        );
    }
}
