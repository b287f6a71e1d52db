use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

mod currency;

pub use currency::Currency;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
