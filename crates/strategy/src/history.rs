//! Minute price history for arbitrary currency pairs
//!
//! Pairs without a direct market are priced by chaining the candles of
//! every hop on the conversion path. BUY hops trade the symbol in reverse,
//! so their prices are inverted before the series are multiplied.

use std::sync::Arc;

use meridian_core::{Candlestick, Currency, OrderSide, OrderSpec, Price, Timestamp};
use meridian_ports::CandlestickProvider;
use meridian_routing::PathCompiler;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{Result, StrategyError};

/// Extra decimal places kept when inverting a price
const INVERSION_EXTRA_SCALE: u32 = 6;

pub struct CurrencyPriceHistory {
    compiler: Arc<PathCompiler>,
    candles: Arc<dyn CandlestickProvider>,
}

impl CurrencyPriceHistory {
    pub fn new(compiler: Arc<PathCompiler>, candles: Arc<dyn CandlestickProvider>) -> Self {
        Self { compiler, candles }
    }

    /// Per-minute history of `base` priced in `quote` over `[start, end]`.
    ///
    /// Hop series of unequal length are cut to the shortest one; the result
    /// keeps the open and close times of the first hop.
    pub async fn price_history_per_minute(
        &self,
        base: &Currency,
        quote: &Currency,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Candlestick>> {
        let specs = self.compiler.find_order_specs(base, quote).await?;

        let mut series = Vec::with_capacity(specs.len());
        for spec in &specs {
            let candles = self.candles.history(&spec.symbol, start, end).await?;
            series.push(oriented(candles, spec)?);
        }

        let shortest = series.iter().map(Vec::len).min().unwrap_or(0);
        let mut hops = series.into_iter();
        let Some(first) = hops.next() else {
            return Ok(Vec::new());
        };

        let mut combined: Vec<Candlestick> = first.into_iter().take(shortest).collect();
        for hop in hops {
            for (acc, candle) in combined.iter_mut().zip(hop) {
                let price = acc
                    .average_price
                    .checked_mul(candle.average_price)
                    .ok_or_else(|| {
                        StrategyError::Overflow(format!("price history of {base}/{quote}"))
                    })?;
                *acc = acc.with_price(price);
            }
        }
        log::debug!(
            "[History] {} candles for {}/{} over {} hops",
            combined.len(),
            base,
            quote,
            specs.len()
        );
        Ok(combined)
    }
}

/// Prices of `candles` as seen when leaving through `spec`
fn oriented(candles: Vec<Candlestick>, spec: &OrderSpec) -> Result<Vec<Candlestick>> {
    match spec.side {
        OrderSide::Sell => Ok(candles),
        OrderSide::Buy => candles
            .into_iter()
            .map(|candle| {
                let inverted = invert(candle.average_price)
                    .ok_or_else(|| StrategyError::ZeroPrice(spec.symbol.clone()))?;
                Ok(candle.with_price(inverted))
            })
            .collect(),
    }
}

/// `1 / price`, keeping as many extra decimals as the price has integer digits
fn invert(price: Price) -> Option<Decimal> {
    let integer_digits = price.abs().trunc().normalize().to_string().len() as u32;
    Decimal::ONE
        .checked_div(price)
        .map(|inverse| {
            inverse.round_dp_with_strategy(
                integer_digits + INVERSION_EXTRA_SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            )
        })
}
