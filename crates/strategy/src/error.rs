//! Error types for the strategy crate

use meridian_core::{Currency, Symbol};
use meridian_ports::ProviderError;
use meridian_routing::RoutingError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Not enough price history for {base}/{quote}: {candles} candles")]
    InsufficientHistory {
        base: Currency,
        quote: Currency,
        candles: usize,
    },

    #[error("Price history of {base}/{quote} has no time spread")]
    VerticalRegression { base: Currency, quote: Currency },

    #[error("Zero average price in history of {0}")]
    ZeroPrice(Symbol),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("Provider failure: {0}")]
    Provider(#[from] ProviderError),
}

impl StrategyError {
    /// Failures of the exchange collaborators; everything else only
    /// disqualifies the asset being evaluated
    pub fn is_provider_failure(&self) -> bool {
        match self {
            StrategyError::Provider(_) => true,
            StrategyError::Routing(e) => e.is_provider_failure(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StrategyError>;
