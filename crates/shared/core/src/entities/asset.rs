use serde::{Deserialize, Serialize};

use crate::values::{Currency, Quantity};

/// An account balance in one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub currency: Currency,
    pub balance: Quantity,
}

impl Asset {
    pub fn new(currency: impl Into<Currency>, balance: Quantity) -> Self {
        Self {
            currency: currency.into(),
            balance,
        }
    }
}
