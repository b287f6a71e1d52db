use serde::{Deserialize, Serialize};

use crate::values::{Price, Timestamp};

/// One interval of price history, reduced to its average price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candlestick {
    pub open_time: Timestamp,
    pub close_time: Timestamp,
    pub average_price: Price,
}

impl Candlestick {
    pub fn new(open_time: Timestamp, close_time: Timestamp, average_price: Price) -> Self {
        Self {
            open_time,
            close_time,
            average_price,
        }
    }

    /// Same interval, different price
    pub fn with_price(&self, average_price: Price) -> Self {
        Self {
            open_time: self.open_time,
            close_time: self.close_time,
            average_price,
        }
    }
}
