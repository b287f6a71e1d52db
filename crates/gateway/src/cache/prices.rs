use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use meridian_core::{Price, Symbol};
use meridian_ports::{Clock, PriceProvider, ProviderResult};

use super::{CachedSymbolProvider, TtlCache};
use crate::source::ExchangeSource;

/// Ticker prices cached for a TTL, keyed by symbol
///
/// Tickers that do not name a tradable symbol are dropped.
pub struct CachedPriceProvider {
    source: Arc<dyn ExchangeSource>,
    symbols: Arc<CachedSymbolProvider>,
    cache: TtlCache<HashMap<Symbol, Price>>,
}

impl CachedPriceProvider {
    pub const DEFAULT_TTL_MS: u64 = 60 * 1000;

    pub fn new(
        source: Arc<dyn ExchangeSource>,
        symbols: Arc<CachedSymbolProvider>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            symbols,
            cache: TtlCache::new("PriceCache", ttl, clock),
        }
    }

    async fn prices(&self) -> ProviderResult<Arc<HashMap<Symbol, Price>>> {
        self.cache
            .get_or_refresh(|| async {
                let table = self.symbols.table().await?;
                let tickers = self.source.fetch_prices().await?;
                let prices: HashMap<Symbol, Price> = tickers
                    .into_iter()
                    .filter_map(|ticker| {
                        table
                            .by_ticker(&ticker.ticker)
                            .map(|symbol| (symbol.clone(), ticker.price))
                    })
                    .collect();
                log::debug!("[PriceCache] Loaded {} prices", prices.len());
                Ok(prices)
            })
            .await
    }
}

#[async_trait]
impl PriceProvider for CachedPriceProvider {
    async fn current_price(&self, symbol: &Symbol) -> ProviderResult<Option<Price>> {
        Ok(self.prices().await?.get(symbol).copied())
    }
}
