//! # Call Context
//!
//! Who is calling, and how much native value they attached. Every
//! state-mutating collection operation takes one; owner checks compare
//! `caller` against the stored owner instead of relying on ambient identity.

use launchpad_protocol::{Address, Amount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: Address,
    pub value: Amount,
}

impl CallContext {
    /// A call with no value attached.
    pub fn new(caller: Address) -> Self {
        Self { caller, value: 0 }
    }

    /// A call that pays `value` to the collection.
    pub fn with_value(caller: Address, value: Amount) -> Self {
        Self { caller, value }
    }
}
