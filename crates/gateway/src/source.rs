//! Upstream exchange interface wrapped by the caches

use async_trait::async_trait;
use meridian_core::{Price, SymbolInfo};
use meridian_ports::ProviderResult;
use serde::{Deserialize, Serialize};

/// Trading status as published by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolStatus {
    #[default]
    Trading,
    Halt,
    Break,
}

/// A symbol from the exchange info endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedSymbol {
    pub info: SymbolInfo,
    pub status: SymbolStatus,
}

/// Latest trade price for a ticker name (`BTCUSDT`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerPrice {
    pub ticker: String,
    pub price: Price,
}

/// Raw exchange endpoints, one network round trip per call
#[async_trait]
pub trait ExchangeSource: Send + Sync {
    async fn fetch_symbols(&self) -> ProviderResult<Vec<ListedSymbol>>;

    async fn fetch_prices(&self) -> ProviderResult<Vec<TickerPrice>>;
}
