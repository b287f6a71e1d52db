use meridian_core::{Currency, Price, QuantizeError, Symbol};
use meridian_ports::ProviderError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("No trading path from {from} to {to}")]
    NoPath { from: Currency, to: Currency },

    #[error("Order quantity rejected by exchange grid: {0}")]
    OutOfRange(#[from] QuantizeError),

    #[error("Unusable price {price} for {symbol}")]
    InvalidPrice { symbol: Symbol, price: Price },

    #[error("No symbol info for {0}")]
    MissingSymbolInfo(Symbol),

    #[error("No current price for {0}")]
    MissingPrice(Symbol),

    #[error("Provider failure: {0}")]
    Provider(#[from] ProviderError),
}

impl RoutingError {
    /// Failures of the exchange collaborators rather than of the candidate
    /// being evaluated
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            RoutingError::MissingSymbolInfo(_) | RoutingError::MissingPrice(_) | RoutingError::Provider(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RoutingError>;
