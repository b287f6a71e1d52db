use std::fmt;

use serde::{Deserialize, Serialize};

use crate::values::Currency;

/// A tradable market: `base` priced in `quote` (e.g. BTC/USDT)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// Currency being bought or sold
    pub base: Currency,
    /// Currency used to price the base
    pub quote: Currency,
}

impl Symbol {
    pub fn new(base: impl Into<Currency>, quote: impl Into<Currency>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Exchange ticker name, base followed by quote (`BTCUSDT`)
    pub fn name(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }

    /// The other side of the market, if `currency` is part of it
    pub fn counter_currency(&self, currency: &Currency) -> Option<&Currency> {
        if &self.base == currency {
            Some(&self.quote)
        } else if &self.quote == currency {
            Some(&self.base)
        } else {
            None
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}
