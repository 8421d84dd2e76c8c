//! Exact-payment check for the paid mint paths.

use launchpad_protocol::Amount;

use crate::error::PaymentError;

pub struct PaymentValidator;

impl PaymentValidator {
    /// `price × quantity`, or [`PaymentError::Overflow`].
    pub fn required(quantity: u64, price: Amount) -> Result<Amount, PaymentError> {
        price
            .checked_mul(Amount::from(quantity))
            .ok_or(PaymentError::Overflow)
    }

    /// Succeeds only if `attached == price × quantity`. Overpaying is as
    /// wrong as underpaying; there is no change given.
    pub fn validate(attached: Amount, quantity: u64, price: Amount) -> Result<(), PaymentError> {
        if attached == Self::required(quantity, price)? {
            Ok(())
        } else {
            Err(PaymentError::IncorrectAmount)
        }
    }
}
