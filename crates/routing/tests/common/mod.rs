#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use meridian_core::{Price, Symbol, SymbolInfo, Timestamp};
use meridian_ports::{PriceProvider, ProviderResult, SymbolInfoProvider};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn start_time() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Symbol table and prices held in memory, versioned by a caller-set time
pub struct InMemoryMarket {
    symbols: RwLock<Vec<SymbolInfo>>,
    prices: RwLock<HashMap<Symbol, Price>>,
    version: RwLock<Option<Timestamp>>,
    pub full_loads: AtomicUsize,
}

impl InMemoryMarket {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            symbols: RwLock::new(Vec::new()),
            prices: RwLock::new(HashMap::new()),
            version: RwLock::new(None),
            full_loads: AtomicUsize::new(0),
        })
    }

    pub fn list(&self, info: SymbolInfo, price: Price, version: Timestamp) {
        self.prices.write().insert(info.symbol.clone(), price);
        self.symbols.write().push(info);
        *self.version.write() = Some(version);
    }

    pub fn set_price(&self, symbol: &Symbol, price: Price) {
        self.prices.write().insert(symbol.clone(), price);
    }

    pub fn loads(&self) -> usize {
        self.full_loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SymbolInfoProvider for InMemoryMarket {
    async fn all_symbols(&self) -> ProviderResult<Vec<SymbolInfo>> {
        self.full_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.symbols.read().clone())
    }

    async fn symbol_info(&self, symbol: &Symbol) -> ProviderResult<Option<SymbolInfo>> {
        Ok(self.symbols.read().iter().find(|i| &i.symbol == symbol).cloned())
    }

    async fn is_updated_since(&self, since: Timestamp) -> ProviderResult<bool> {
        Ok(self.version.read().is_none_or(|version| version > since))
    }
}

#[async_trait]
impl PriceProvider for InMemoryMarket {
    async fn current_price(&self, symbol: &Symbol) -> ProviderResult<Option<Price>> {
        Ok(self.prices.read().get(symbol).copied())
    }
}

/// Symbol info with a quantity step and a 0.00000001 price tick
pub fn info(base: &str, quote: &str, quantity_step: Decimal) -> SymbolInfo {
    SymbolInfo::from_filters(
        Symbol::new(base, quote),
        (quantity_step, dec!(9000000), quantity_step),
        (dec!(0.00000001), dec!(1000000), dec!(0.00000001)),
    )
    .unwrap()
}

/// USDT, BTC, ETH market: BTCUSDT at 30000, ETHBTC at 0.05
pub fn three_currency_market() -> Arc<InMemoryMarket> {
    let market = InMemoryMarket::new();
    market.list(info("BTC", "USDT", dec!(0.0001)), dec!(30000), start_time());
    market.list(info("ETH", "BTC", dec!(0.001)), dec!(0.05), start_time());
    market
}
