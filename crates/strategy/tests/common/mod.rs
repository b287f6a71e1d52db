#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use meridian_clock::ManualClock;
use meridian_core::{Asset, Candlestick, Currency, Price, Symbol, SymbolInfo, Timestamp};
use meridian_ports::{
    AssetProvider, CandlestickProvider, PriceProvider, ProviderError, ProviderResult,
    SymbolInfoProvider,
};
use meridian_routing::{PathCompiler, PriceConverter};
use meridian_strategy::{
    CandidateAssetProducer, CurrencyPriceHistory, PlanProducer, PricePredictor, TradingConfig,
};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Linear minute series: `start + per_minute * i`
#[derive(Clone, Copy)]
pub struct Trend {
    pub start: Decimal,
    pub per_minute: Decimal,
    pub max_candles: Option<usize>,
}

impl Trend {
    pub fn linear(start: Decimal, per_minute: Decimal) -> Self {
        Self {
            start,
            per_minute,
            max_candles: None,
        }
    }
}

#[derive(Default)]
pub struct FakeExchange {
    symbols: RwLock<Vec<SymbolInfo>>,
    prices: RwLock<HashMap<Symbol, Price>>,
    trends: RwLock<HashMap<Symbol, Trend>>,
    balances: RwLock<Vec<Asset>>,
    pub assets_down: AtomicBool,
}

impl FakeExchange {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn market(&self, base: &str, quote: &str, step: Decimal, price: Price, trend: Trend) {
        let symbol = Symbol::new(base, quote);
        let info = SymbolInfo::from_filters(
            symbol.clone(),
            (step, dec!(9000000), step),
            (dec!(0.00000001), dec!(1000000), dec!(0.00000001)),
        )
        .unwrap();
        self.symbols.write().push(info);
        self.prices.write().insert(symbol.clone(), price);
        self.trends.write().insert(symbol, trend);
    }

    pub fn balance(&self, currency: &str, balance: Decimal) {
        self.balances.write().push(Asset::new(currency, balance));
    }

    pub fn set_assets_down(&self, down: bool) {
        self.assets_down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl SymbolInfoProvider for FakeExchange {
    async fn all_symbols(&self) -> ProviderResult<Vec<SymbolInfo>> {
        Ok(self.symbols.read().clone())
    }

    async fn symbol_info(&self, symbol: &Symbol) -> ProviderResult<Option<SymbolInfo>> {
        Ok(self.symbols.read().iter().find(|i| &i.symbol == symbol).cloned())
    }

    async fn is_updated_since(&self, _since: Timestamp) -> ProviderResult<bool> {
        Ok(false)
    }
}

#[async_trait]
impl PriceProvider for FakeExchange {
    async fn current_price(&self, symbol: &Symbol) -> ProviderResult<Option<Price>> {
        Ok(self.prices.read().get(symbol).copied())
    }
}

#[async_trait]
impl CandlestickProvider for FakeExchange {
    async fn history(
        &self,
        symbol: &Symbol,
        start: Timestamp,
        end: Timestamp,
    ) -> ProviderResult<Vec<Candlestick>> {
        let Some(trend) = self.trends.read().get(symbol).copied() else {
            return Ok(Vec::new());
        };
        let mut candles = Vec::new();
        let mut open = start;
        let mut i = 0i64;
        while open < end && trend.max_candles.is_none_or(|max| candles.len() < max) {
            let close = open + Duration::minutes(1) - Duration::milliseconds(1);
            let price = trend.start + trend.per_minute * Decimal::from(i);
            candles.push(Candlestick::new(open, close, price));
            open += Duration::minutes(1);
            i += 1;
        }
        Ok(candles)
    }
}

#[async_trait]
impl AssetProvider for FakeExchange {
    async fn account_assets(&self) -> ProviderResult<Vec<Asset>> {
        if self.assets_down.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("account endpoint down".into()));
        }
        Ok(self.balances.read().clone())
    }
}

pub struct Engine {
    pub compiler: Arc<PathCompiler>,
    pub history: Arc<CurrencyPriceHistory>,
    pub predictor: Arc<PricePredictor>,
    pub clock: Arc<ManualClock>,
}

pub fn engine(exchange: &Arc<FakeExchange>, config: &TradingConfig) -> Engine {
    let clock = ManualClock::new(now());
    let compiler = Arc::new(PathCompiler::new(
        exchange.clone(),
        exchange.clone(),
        clock.clone(),
    ));
    let history = Arc::new(CurrencyPriceHistory::new(compiler.clone(), exchange.clone()));
    let predictor = Arc::new(PricePredictor::new(
        history.clone(),
        clock.clone(),
        config.prediction.clone(),
    ));
    Engine {
        compiler,
        history,
        predictor,
        clock,
    }
}

pub fn candidate_producer(
    exchange: &Arc<FakeExchange>,
    config: &Arc<TradingConfig>,
    engine: &Engine,
) -> CandidateAssetProducer {
    CandidateAssetProducer::new(
        config.clone(),
        exchange.clone(),
        engine.predictor.clone(),
        PriceConverter::new(engine.compiler.clone()),
    )
}

pub fn plan_producer(exchange: &Arc<FakeExchange>, config: TradingConfig) -> PlanProducer {
    let config = Arc::new(config);
    let engine = engine(exchange, &config);
    let candidates = candidate_producer(exchange, &config, &engine);
    PlanProducer::new(config, engine.compiler.clone(), candidates, engine.clock.clone())
}

pub fn currency(name: &str) -> Currency {
    Currency::from(name)
}
