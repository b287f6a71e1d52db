use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration};
use meridian_core::{
    Asset, Candlestick, Currency, OrderSide, Price, Quantity, Rounding, Symbol, SymbolInfo,
    Timestamp,
};
use meridian_ports::{
    AssetProvider, CandlestickProvider, Clock, OrderSink, ProviderError, ProviderResult,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use super::config::{SimulatedSymbol, SimulationConfig};
use crate::error::GatewayError;
use crate::source::{ExchangeSource, ListedSymbol, SymbolStatus, TickerPrice};

/// A market order the simulator executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    pub symbol: Symbol,
    pub side: OrderSide,
    pub quantity: Quantity,
    pub price: Price,
    pub filled_at: Timestamp,
}

struct Market {
    info: SymbolInfo,
    status: SymbolStatus,
    start_price: Price,
    drift_per_minute: Decimal,
}

impl Market {
    fn from_config(symbol: &SimulatedSymbol) -> Result<Self, GatewayError> {
        let listed = symbol.listed()?;
        Ok(Self {
            info: listed.info,
            status: listed.status,
            start_price: symbol.start_price,
            drift_per_minute: symbol.drift_per_minute,
        })
    }

    /// Price `minutes` after the epoch, snapped to the tick grid.
    ///
    /// `None` once the line leaves the grid or stops being positive.
    fn price_at(&self, minutes: i64) -> Option<Price> {
        let raw = self
            .drift_per_minute
            .checked_mul(Decimal::from(minutes))?
            .checked_add(self.start_price)?;
        self.info
            .price_quantizer
            .quantize(raw, Rounding::HalfUp)
            .ok()
            .filter(|price| *price > Decimal::ZERO)
    }
}

fn floor_to_minute(at: Timestamp) -> ProviderResult<Timestamp> {
    let secs = at.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(60), 0)
        .ok_or_else(|| ProviderError::MissingData(format!("timestamp out of range: {at}")))
}

/// In-process spot exchange with linear price lines
///
/// Markets are listed in configuration order. Balances start from the
/// configuration and move with every fill; every currency of a listed market
/// is reported, even at zero.
pub struct SimulatedExchange {
    clock: Arc<dyn Clock>,
    epoch: Timestamp,
    fee_rate: Decimal,
    markets: Vec<Market>,
    by_ticker: HashMap<String, usize>,
    balances: Mutex<BTreeMap<Currency, Quantity>>,
    fills: Mutex<Vec<Fill>>,
}

impl SimulatedExchange {
    pub fn new(config: &SimulationConfig, clock: Arc<dyn Clock>) -> Result<Self, GatewayError> {
        let markets = config
            .symbols
            .iter()
            .map(Market::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        let by_ticker = markets
            .iter()
            .enumerate()
            .map(|(i, market)| (market.info.symbol.name(), i))
            .collect();

        let mut balances = BTreeMap::new();
        for market in &markets {
            balances.insert(market.info.symbol.base.clone(), Decimal::ZERO);
            balances.insert(market.info.symbol.quote.clone(), Decimal::ZERO);
        }
        for entry in &config.balances {
            balances.insert(entry.currency.clone(), entry.balance);
        }

        let epoch = floor_to_minute(clock.now()).map_err(|e| GatewayError::Exchange(e.to_string()))?;
        log::info!(
            "[Simulator] {} markets listed, epoch {}",
            markets.len(),
            epoch
        );

        Ok(Self {
            clock,
            epoch,
            fee_rate: config.fee_rate,
            markets,
            by_ticker,
            balances: Mutex::new(balances),
            fills: Mutex::new(Vec::new()),
        })
    }

    pub fn epoch(&self) -> Timestamp {
        self.epoch
    }

    /// Executed orders, oldest first
    pub fn fills(&self) -> Vec<Fill> {
        self.fills.lock().clone()
    }

    pub fn balance(&self, currency: &Currency) -> Quantity {
        self.balances
            .lock()
            .get(currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn market(&self, symbol: &Symbol) -> Result<&Market, GatewayError> {
        self.by_ticker
            .get(&symbol.name())
            .map(|&i| &self.markets[i])
            .ok_or_else(|| GatewayError::UnknownSymbol(symbol.name()))
    }

    fn minutes_since_epoch(&self, at: Timestamp) -> i64 {
        (at - self.epoch).num_minutes()
    }

    fn current_price(&self, market: &Market) -> Option<Price> {
        market.price_at(self.minutes_since_epoch(self.clock.now()))
    }

    fn fill(
        &self,
        market: &Market,
        side: OrderSide,
        quantity: Quantity,
    ) -> Result<Fill, GatewayError> {
        let symbol = &market.info.symbol;
        if market.status != SymbolStatus::Trading {
            return Err(GatewayError::NotTrading(symbol.name()));
        }
        if !market.info.quantity_quantizer.is_on_grid(quantity) {
            return Err(GatewayError::OffGrid {
                symbol: symbol.name(),
                quantity,
            });
        }
        let price = self
            .current_price(market)
            .ok_or_else(|| GatewayError::Exchange(format!("no price for {symbol}")))?;
        let overflow = || GatewayError::Exchange(format!("notional overflow on {symbol}"));
        let notional = quantity.checked_mul(price).ok_or_else(overflow)?;

        let (spent, paid, received, gross) = match side {
            OrderSide::Buy => (&symbol.quote, notional, &symbol.base, quantity),
            OrderSide::Sell => (&symbol.base, quantity, &symbol.quote, notional),
        };
        let fee = gross.checked_mul(self.fee_rate).ok_or_else(overflow)?;

        let mut balances = self.balances.lock();
        let available = balances.get(spent).copied().unwrap_or(Decimal::ZERO);
        if available < paid {
            return Err(GatewayError::InsufficientBalance {
                currency: spent.clone(),
                required: paid,
                available,
            });
        }
        balances.insert(spent.clone(), available - paid);
        *balances.entry(received.clone()).or_insert(Decimal::ZERO) += gross - fee;

        Ok(Fill {
            symbol: symbol.clone(),
            side,
            quantity,
            price,
            filled_at: self.clock.now(),
        })
    }
}

#[async_trait]
impl ExchangeSource for SimulatedExchange {
    async fn fetch_symbols(&self) -> ProviderResult<Vec<ListedSymbol>> {
        Ok(self
            .markets
            .iter()
            .map(|market| ListedSymbol {
                info: market.info.clone(),
                status: market.status,
            })
            .collect())
    }

    async fn fetch_prices(&self) -> ProviderResult<Vec<TickerPrice>> {
        Ok(self
            .markets
            .iter()
            .filter_map(|market| {
                self.current_price(market).map(|price| TickerPrice {
                    ticker: market.info.symbol.name(),
                    price,
                })
            })
            .collect())
    }
}

#[async_trait]
impl CandlestickProvider for SimulatedExchange {
    async fn history(
        &self,
        symbol: &Symbol,
        start: Timestamp,
        end: Timestamp,
    ) -> ProviderResult<Vec<Candlestick>> {
        let market = self.market(symbol)?;
        let minute = Duration::minutes(1);
        let now = self.clock.now();

        let mut candles = Vec::new();
        let mut open = floor_to_minute(start)?;
        while open <= end && open + minute <= now {
            if let Some(price) = market.price_at(self.minutes_since_epoch(open)) {
                let close = open + minute - Duration::milliseconds(1);
                candles.push(Candlestick::new(open, close, price));
            }
            open += minute;
        }
        Ok(candles)
    }
}

#[async_trait]
impl AssetProvider for SimulatedExchange {
    async fn account_assets(&self) -> ProviderResult<Vec<Asset>> {
        Ok(self
            .balances
            .lock()
            .iter()
            .map(|(currency, balance)| Asset::new(currency.clone(), *balance))
            .collect())
    }
}

#[async_trait]
impl OrderSink for SimulatedExchange {
    async fn submit(
        &self,
        symbol: &Symbol,
        side: OrderSide,
        quantity: Quantity,
    ) -> ProviderResult<()> {
        let market = self.market(symbol)?;
        let fill = self.fill(market, side, quantity).inspect_err(|e| {
            log::warn!("[Simulator] Rejected {side} {quantity} {symbol}: {e}");
        })?;
        log::info!(
            "[Simulator] Filled {} {} {} @ {}",
            fill.side,
            fill.quantity,
            fill.symbol,
            fill.price
        );
        self.fills.lock().push(fill);
        Ok(())
    }

    fn name(&self) -> &str {
        "Simulator"
    }
}
