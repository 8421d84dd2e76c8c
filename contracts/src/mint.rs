//! # Paid Mint Paths
//!
//! `mint_public` and `mint_whitelist` differ only in which phase flag they
//! require and in the whitelist proof. Both run the same pipeline:
//!
//! 1. **Checks** against a read view: phase flag, (proof), quantity, supply
//!    ceiling, wallet cap, exact payment. Nothing has changed yet.
//! 2. **Interactions**: pull the payment into the collection's account, then
//!    issue the tokens. If issuance fails the payment is sent back.
//! 3. **Commit**: apply the allocation to the mint ledger in one write.
//!
//! The whole pipeline runs inside the reentrancy guard, so no other mutating
//! operation can observe or interleave with steps 2 and 3.

use launchpad_protocol::{Amount, Hash32};
use tracing::{debug, info, warn};

use crate::allocator::Allocation;
use crate::bank::ValueBank;
use crate::collection::LaunchpadCollection;
use crate::context::CallContext;
use crate::error::{LaunchpadError, PaymentError, StateError};
use crate::ledger::{Issuance, TokenLedger};
use crate::payment::PaymentValidator;
use crate::whitelist::WhitelistAuthorizer;

/// Which paid path is minting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase<'a> {
    Public,
    Whitelist(&'a [Hash32]),
}

impl Phase<'_> {
    fn label(&self) -> &'static str {
        match self {
            Phase::Public => "public",
            Phase::Whitelist(_) => "whitelist",
        }
    }
}

impl<L: TokenLedger, B: ValueBank> LaunchpadCollection<L, B> {
    /// Mints `quantity` tokens to the caller during the public sale.
    ///
    /// `ctx.value` must be exactly `mint_price × quantity`.
    ///
    /// # Errors
    ///
    /// Checked in this order: [`StateError::SaleNotActive`], zero quantity,
    /// supply ceiling, wallet cap, payment. Any failure leaves every counter,
    /// balance and token untouched.
    pub fn mint_public(
        &self,
        ctx: &CallContext,
        quantity: u64,
    ) -> Result<Allocation, LaunchpadError> {
        self.paid_mint(ctx, quantity, Phase::Public)
    }

    /// Mints `quantity` tokens to a whitelisted caller.
    ///
    /// `proof` is the caller's sibling path in the published whitelist tree.
    /// Otherwise identical to [`mint_public`](Self::mint_public), including
    /// the shared wallet cap.
    pub fn mint_whitelist(
        &self,
        ctx: &CallContext,
        quantity: u64,
        proof: &[Hash32],
    ) -> Result<Allocation, LaunchpadError> {
        self.paid_mint(ctx, quantity, Phase::Whitelist(proof))
    }

    fn paid_mint(
        &self,
        ctx: &CallContext,
        quantity: u64,
        phase: Phase<'_>,
    ) -> Result<Allocation, LaunchpadError> {
        let result = self.guard.enter().map_err(LaunchpadError::from).and_then(|_entered| {
            let (allocation, payment) = self.check_paid_mint(ctx, quantity, phase)?;
            self.settle(ctx, &[allocation], payment)?;
            Ok(allocation)
        });

        match &result {
            Ok(allocation) => info!(
                phase = phase.label(),
                minter = %ctx.caller,
                quantity,
                first_token_id = allocation.first_token_id,
                last_token_id = allocation.last_token_id(),
                paid = ctx.value,
                "tokens minted"
            ),
            Err(e) => debug!(
                phase = phase.label(),
                minter = %ctx.caller,
                quantity,
                value = ctx.value,
                error = %e,
                "mint rejected"
            ),
        }
        result
    }

    /// Every check of a paid mint, against one consistent read view.
    fn check_paid_mint(
        &self,
        ctx: &CallContext,
        quantity: u64,
        phase: Phase<'_>,
    ) -> Result<(Allocation, Amount), LaunchpadError> {
        let state = self.state.read();

        match phase {
            Phase::Public if !state.sale.sale_active => {
                return Err(StateError::SaleNotActive.into());
            }
            Phase::Whitelist(_) if !state.sale.whitelist_sale_active => {
                return Err(StateError::WhitelistSaleNotActive.into());
            }
            Phase::Whitelist(proof) => {
                WhitelistAuthorizer::authorize(&ctx.caller, proof, &state.sale.whitelist_root)?;
            }
            Phase::Public => {}
        }

        let allocation = state
            .allocator(&self.config)
            .authorize(&state.ledger, ctx.caller, quantity, true)?;
        PaymentValidator::validate(ctx.value, quantity, state.terms.mint_price)?;

        Ok((allocation, ctx.value))
    }

    /// Runs the interactions for already-checked allocations and commits them.
    ///
    /// `payment` is pulled from the caller first (skipped when zero). Token
    /// issuance for the whole batch is a single ledger call; if it fails the
    /// payment goes back to the caller and nothing is committed.
    pub(crate) fn settle(
        &self,
        ctx: &CallContext,
        allocations: &[Allocation],
        payment: Amount,
    ) -> Result<(), LaunchpadError> {
        if payment > 0 {
            self.bank
                .transfer(&ctx.caller, &self.address, payment)
                .map_err(PaymentError::from)?;
        }

        let issuances: Vec<Issuance> = allocations.iter().map(Allocation::issuance).collect();
        if let Err(e) = self.tokens.mint(&issuances) {
            if payment > 0 {
                if let Err(refund) = self.bank.transfer(&self.address, &ctx.caller, payment) {
                    warn!(
                        minter = %ctx.caller,
                        amount = payment,
                        error = %refund,
                        "refund after failed issuance was rejected; value stays in collection"
                    );
                }
            }
            return Err(e.into());
        }

        self.state.write().ledger.apply(allocations);
        Ok(())
    }
}
