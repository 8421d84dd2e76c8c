//! # Value Bank
//!
//! Native-currency balances for every account, including the collection's own
//! account. The collection never keeps a shadow copy of what it holds: its
//! balance is whatever the bank says it is.
//!
//! ## Accounts
//!
//! Contract accounts are opened with [`ValueBank::create_account`], which
//! derives a fresh address from the creator and a per-creator nonce, the way
//! `CREATE` does. Two collections deployed by the same owner never share an
//! account, whatever their names.
//!
//! ## Receive hooks
//!
//! Paying an address may run code that address controls (a contract wallet's
//! fallback). [`InMemoryBank`] models this with per-address hooks that run
//! after balances have moved and with no bank lock held. A hook that returns
//! an error fails the transfer, and the batch is reversed by debiting each
//! recipient what it was credited. A hook may have moved that value on before
//! rejecting; the reversal then fails with [`BankError::RollbackFailed`] and
//! leaves the forwarded value where it went.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use launchpad_protocol::{Address, Amount};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::error;

/// Errors raised by a value bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// The sender does not hold enough.
    #[error("insufficient funds: {account} has {balance}, needs {required}")]
    InsufficientFunds {
        account: Address,
        balance: Amount,
        required: Amount,
    },

    /// The recipient refused the payment.
    #[error("transfer to {account} rejected: {reason}")]
    Rejected { account: Address, reason: String },

    /// A rejected transfer could not be reversed because the recipient no
    /// longer holds what it was paid.
    #[error("cannot reverse transfer to {account}: holds {balance}, owes {required}")]
    RollbackFailed {
        account: Address,
        balance: Amount,
        required: Amount,
    },

    /// A balance or nonce would exceed the representable range.
    #[error("balance overflow")]
    Overflow,
}

/// Native value movements between accounts.
pub trait ValueBank: Send + Sync {
    fn balance_of(&self, account: &Address) -> Amount;

    /// Opens a new account on behalf of `creator` and returns its address.
    /// The address is unused: it holds nothing and was never handed out.
    fn create_account(&self, creator: &Address) -> Result<Address, BankError>;

    /// Moves `amount` from `from` to `to`.
    fn transfer(&self, from: &Address, to: &Address, amount: Amount) -> Result<(), BankError> {
        self.transfer_batch(from, &[(*to, amount)])
    }

    /// Pays every `(recipient, amount)` pair out of `from`, or none of them.
    fn transfer_batch(
        &self,
        from: &Address,
        payouts: &[(Address, Amount)],
    ) -> Result<(), BankError>;
}

/// Code run when an address receives value. Sees the amount received.
pub type BankHook = Arc<dyn Fn(&Address, Amount) -> Result<(), String> + Send + Sync>;

/// Address of the `nonce`-th account opened by `creator`.
pub fn account_address(creator: &Address, nonce: u64) -> Address {
    let mut seed = Vec::with_capacity(28);
    seed.extend_from_slice(creator.as_bytes());
    seed.extend_from_slice(&nonce.to_be_bytes());
    Address::derive(&seed)
}

/// In-process bank with a faucet and optional receive hooks.
#[derive(Default)]
pub struct InMemoryBank {
    balances: RwLock<HashMap<Address, Amount>>,
    hooks: RwLock<HashMap<Address, BankHook>>,
    nonces: RwLock<HashMap<Address, u64>>,
}

impl fmt::Debug for InMemoryBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBank")
            .field("accounts", &self.balances.read().len())
            .field("hooks", &self.hooks.read().len())
            .field("creators", &self.nonces.read().len())
            .finish()
    }
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` out of thin air. Test and tooling faucet.
    pub fn deposit(&self, account: &Address, amount: Amount) -> Result<(), BankError> {
        let mut balances = self.balances.write();
        let balance = balances.entry(*account).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(BankError::Overflow)?;
        Ok(())
    }

    pub fn set_receive_hook(&self, account: Address, hook: BankHook) {
        self.hooks.write().insert(account, hook);
    }

    pub fn clear_receive_hook(&self, account: &Address) {
        self.hooks.write().remove(account);
    }

    /// Sum of every balance. Constant under transfers.
    pub fn total_value(&self) -> Amount {
        self.balances
            .read()
            .values()
            .fold(0, |acc: Amount, v| acc.saturating_add(*v))
    }

    /// Sum of a batch, checked.
    fn batch_total(payouts: &[(Address, Amount)]) -> Result<Amount, BankError> {
        payouts
            .iter()
            .try_fold(0 as Amount, |acc, (_, amount)| acc.checked_add(*amount))
            .ok_or(BankError::Overflow)
    }

    /// Debits `from` and credits every payout. Computes every new balance
    /// before writing any, so a failure leaves `balances` untouched.
    fn apply(
        balances: &mut HashMap<Address, Amount>,
        from: &Address,
        payouts: &[(Address, Amount)],
    ) -> Result<(), BankError> {
        let required = Self::batch_total(payouts)?;
        let mut staged: HashMap<Address, Amount> = HashMap::new();
        let current = |staged: &HashMap<Address, Amount>, account: &Address| {
            staged
                .get(account)
                .or_else(|| balances.get(account))
                .copied()
                .unwrap_or(0)
        };

        let balance = current(&staged, from);
        if balance < required {
            return Err(BankError::InsufficientFunds {
                account: *from,
                balance,
                required,
            });
        }
        staged.insert(*from, balance - required);

        for (to, amount) in payouts {
            let credited = current(&staged, to)
                .checked_add(*amount)
                .ok_or(BankError::Overflow)?;
            staged.insert(*to, credited);
        }

        balances.extend(staged);
        Ok(())
    }

    /// Inverse of [`apply`](Self::apply): credits `from` back first, then
    /// debits each recipient what it was paid. All or nothing.
    fn revert(
        balances: &mut HashMap<Address, Amount>,
        from: &Address,
        payouts: &[(Address, Amount)],
    ) -> Result<(), BankError> {
        let required = Self::batch_total(payouts)?;
        let mut staged: HashMap<Address, Amount> = HashMap::new();
        let current = |staged: &HashMap<Address, Amount>, account: &Address| {
            staged
                .get(account)
                .or_else(|| balances.get(account))
                .copied()
                .unwrap_or(0)
        };

        let refunded = current(&staged, from)
            .checked_add(required)
            .ok_or(BankError::Overflow)?;
        staged.insert(*from, refunded);

        for (to, amount) in payouts {
            let balance = current(&staged, to);
            let debited = balance
                .checked_sub(*amount)
                .ok_or(BankError::RollbackFailed {
                    account: *to,
                    balance,
                    required: *amount,
                })?;
            staged.insert(*to, debited);
        }

        balances.extend(staged);
        Ok(())
    }
}

impl ValueBank for InMemoryBank {
    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.read().get(account).copied().unwrap_or(0)
    }

    fn create_account(&self, creator: &Address) -> Result<Address, BankError> {
        let mut nonces = self.nonces.write();
        let nonce = nonces.entry(*creator).or_insert(0);
        loop {
            let address = account_address(creator, *nonce);
            *nonce = nonce.checked_add(1).ok_or(BankError::Overflow)?;
            // Skip addresses someone already paid into.
            if !self.balances.read().contains_key(&address) {
                return Ok(address);
            }
        }
    }

    fn transfer_batch(
        &self,
        from: &Address,
        payouts: &[(Address, Amount)],
    ) -> Result<(), BankError> {
        Self::apply(&mut self.balances.write(), from, payouts)?;

        for (to, amount) in payouts {
            let hook = self.hooks.read().get(to).cloned();
            if let Some(hook) = hook {
                if let Err(reason) = hook(to, *amount) {
                    if let Err(e) = Self::revert(&mut self.balances.write(), from, payouts) {
                        error!(
                            from = %from,
                            recipient = %to,
                            error = %e,
                            "rejected transfer could not be reversed"
                        );
                        return Err(e);
                    }
                    return Err(BankError::Rejected {
                        account: *to,
                        reason,
                    });
                }
            }
        }
        Ok(())
    }
}
