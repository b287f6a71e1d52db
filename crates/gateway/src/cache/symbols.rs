use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use meridian_core::{Symbol, SymbolInfo, Timestamp};
use meridian_ports::{Clock, ProviderResult, SymbolInfoProvider};
use parking_lot::Mutex;

use super::TtlCache;
use crate::source::{ExchangeSource, ListedSymbol, SymbolStatus};

/// Tradable symbols in exchange order, indexed by symbol and ticker name
#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    infos: Vec<SymbolInfo>,
    by_symbol: HashMap<Symbol, usize>,
    by_ticker: HashMap<String, usize>,
}

impl SymbolTable {
    fn from_listed(listed: Vec<ListedSymbol>) -> Self {
        let infos: Vec<SymbolInfo> = listed
            .into_iter()
            .filter(|listed| listed.status == SymbolStatus::Trading)
            .map(|listed| listed.info)
            .collect();
        let by_symbol = infos
            .iter()
            .enumerate()
            .map(|(i, info)| (info.symbol.clone(), i))
            .collect();
        let by_ticker = infos
            .iter()
            .enumerate()
            .map(|(i, info)| (info.symbol.name(), i))
            .collect();
        Self {
            infos,
            by_symbol,
            by_ticker,
        }
    }

    fn get(&self, symbol: &Symbol) -> Option<&SymbolInfo> {
        self.by_symbol.get(symbol).map(|&i| &self.infos[i])
    }

    pub(crate) fn by_ticker(&self, ticker: &str) -> Option<&Symbol> {
        self.by_ticker.get(ticker).map(|&i| &self.infos[i].symbol)
    }
}

impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.infos == other.infos
    }
}

/// Symbol universe cached for a TTL, with a version that only moves when
/// the tradable set or its grids actually change
pub struct CachedSymbolProvider {
    source: Arc<dyn ExchangeSource>,
    clock: Arc<dyn Clock>,
    cache: TtlCache<SymbolTable>,
    version: Mutex<Option<Timestamp>>,
}

impl CachedSymbolProvider {
    /// Exchange info rarely changes
    pub const DEFAULT_TTL_MS: u64 = 10 * 60 * 1000;

    pub fn new(source: Arc<dyn ExchangeSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            cache: TtlCache::new("SymbolCache", ttl, Arc::clone(&clock)),
            clock,
            version: Mutex::new(None),
        }
    }

    /// Time of the last observed change, `None` before the first load
    pub fn version(&self) -> Option<Timestamp> {
        *self.version.lock()
    }

    pub(crate) async fn table(&self) -> ProviderResult<Arc<SymbolTable>> {
        self.cache
            .get_or_refresh(|| async {
                let table = SymbolTable::from_listed(self.source.fetch_symbols().await?);
                let changed = self
                    .cache
                    .peek()
                    .is_none_or(|previous| *previous != table);
                if changed {
                    let now = self.clock.now();
                    *self.version.lock() = Some(now);
                    log::info!(
                        "[SymbolCache] Symbol table changed: {} tradable symbols",
                        table.infos.len()
                    );
                }
                Ok(table)
            })
            .await
    }
}

#[async_trait]
impl SymbolInfoProvider for CachedSymbolProvider {
    async fn all_symbols(&self) -> ProviderResult<Vec<SymbolInfo>> {
        Ok(self.table().await?.infos.clone())
    }

    async fn symbol_info(&self, symbol: &Symbol) -> ProviderResult<Option<SymbolInfo>> {
        Ok(self.table().await?.get(symbol).cloned())
    }

    async fn is_updated_since(&self, since: Timestamp) -> ProviderResult<bool> {
        self.table().await?;
        Ok(self.version().is_none_or(|version| version > since))
    }
}
