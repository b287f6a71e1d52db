//! Error types for the gateway crate

use meridian_core::{Currency, Quantity, QuantizeError};
use meridian_ports::ProviderError;
use thiserror::Error;

/// Gateway-level errors (adapter operations)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Symbol {0} is not trading")]
    NotTrading(String),

    #[error("Quantity {quantity} is off the grid of {symbol}")]
    OffGrid { symbol: String, quantity: Quantity },

    #[error("Insufficient {currency}: need {required}, have {available}")]
    InsufficientBalance {
        currency: Currency,
        required: Quantity,
        available: Quantity,
    },

    #[error("Invalid market configuration: {0}")]
    InvalidMarket(#[from] QuantizeError),

    #[error("Exchange error: {0}")]
    Exchange(String),
}

impl From<GatewayError> for ProviderError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Exchange(reason) => ProviderError::Unavailable(reason),
            other => ProviderError::Rejected(other.to_string()),
        }
    }
}
