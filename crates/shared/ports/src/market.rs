use async_trait::async_trait;
use meridian_core::{Candlestick, Price, Symbol, SymbolInfo, Timestamp};

use crate::ProviderResult;

/// Tradable symbols and their grids
#[async_trait]
pub trait SymbolInfoProvider: Send + Sync {
    /// All currently tradable symbols
    async fn all_symbols(&self) -> ProviderResult<Vec<SymbolInfo>>;

    /// Grids for one symbol, `None` if it is not tradable
    async fn symbol_info(&self, symbol: &Symbol) -> ProviderResult<Option<SymbolInfo>>;

    /// Whether the symbol table changed after `since`.
    ///
    /// Returns true when no table has been loaded yet.
    async fn is_updated_since(&self, since: Timestamp) -> ProviderResult<bool>;
}

/// Latest traded prices
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Current price of one unit of base in quote, `None` if unknown
    async fn current_price(&self, symbol: &Symbol) -> ProviderResult<Option<Price>>;
}

/// Historical per-minute price series
#[async_trait]
pub trait CandlestickProvider: Send + Sync {
    /// Candles covering `[start, end]`, ascending by open time
    async fn history(
        &self,
        symbol: &Symbol,
        start: Timestamp,
        end: Timestamp,
    ) -> ProviderResult<Vec<Candlestick>>;
}
