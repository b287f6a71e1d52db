use std::sync::Arc;

use chrono::Duration;
use meridian_core::{Candlestick, Currency, Timestamp};
use meridian_ports::Clock;
use meridian_stats::{LinearRegression, NumericContext, Point, RegressionLine, StatsError};
use rust_decimal::Decimal;

use crate::{CurrencyPriceHistory, PredictionConfig, Result, StrategyError};

/// Expected short-term behaviour of a currency priced in another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePrediction {
    pub profitable: bool,
    /// Price change per second (slope of the recent-half regression)
    pub growth_per_sec: Decimal,
}

impl PricePrediction {
    /// A currency measured against itself
    pub fn flat() -> Self {
        Self {
            profitable: true,
            growth_per_sec: Decimal::ZERO,
        }
    }
}

/// Fits the recent price history of a pair over the full window and over
/// its most recent half, and judges whether holding it pays off
pub struct PricePredictor {
    history: Arc<CurrencyPriceHistory>,
    clock: Arc<dyn Clock>,
    config: PredictionConfig,
    regression: LinearRegression,
}

impl PricePredictor {
    pub fn new(history: Arc<CurrencyPriceHistory>, clock: Arc<dyn Clock>, config: PredictionConfig) -> Self {
        let regression = LinearRegression::new(NumericContext::new(config.scale));
        Self {
            history,
            clock,
            config,
            regression,
        }
    }

    pub async fn prediction(&self, base: &Currency, quote: &Currency) -> Result<PricePrediction> {
        if base == quote {
            return Ok(PricePrediction::flat());
        }

        let end = self.clock.now();
        let start = end - Duration::seconds(self.config.history_period_sec as i64);
        let candles = self
            .history
            .price_history_per_minute(base, quote, start, end)
            .await?;
        if candles.len() < 2 {
            return Err(StrategyError::InsufficientHistory {
                base: base.clone(),
                quote: quote.clone(),
                candles: candles.len(),
            });
        }

        let points = to_points(&candles, start);
        self.evaluate(&points).map_err(|e| match e {
            StatsError::InsufficientData { actual, .. } => StrategyError::InsufficientHistory {
                base: base.clone(),
                quote: quote.clone(),
                candles: actual,
            },
            StatsError::VerticalRegression => StrategyError::VerticalRegression {
                base: base.clone(),
                quote: quote.clone(),
            },
            StatsError::Overflow => StrategyError::Overflow(format!("regression of {base}/{quote}")),
        })
    }

    /// Verdict for a price series, see [`judge`]
    pub fn evaluate(&self, points: &[Point]) -> std::result::Result<PricePrediction, StatsError> {
        judge(&self.regression, &self.config, points)
    }
}

/// Profitable iff neither the full window nor its recent half trends down
/// and neither volatility exceeds its ceiling. Growth is the recent slope.
fn judge(
    regression: &LinearRegression,
    config: &PredictionConfig,
    points: &[Point],
) -> std::result::Result<PricePrediction, StatsError> {
    let long_term = regression.fit(points)?;
    let short_term = regression.fit(&points[points.len() / 2..])?;

    let profitable = is_steady(&long_term, config.max_long_term_volatility)
        && is_steady(&short_term, config.max_short_term_volatility);
    log::debug!(
        "[Predictor] long slope {} vol {}, short slope {} vol {} -> profitable: {}",
        long_term.slope,
        long_term.volatility,
        short_term.slope,
        short_term.volatility,
        profitable
    );
    Ok(PricePrediction {
        profitable,
        growth_per_sec: short_term.slope,
    })
}

fn is_steady(line: &RegressionLine, max_volatility: Decimal) -> bool {
    line.slope >= Decimal::ZERO && line.volatility <= max_volatility
}

/// x: seconds since `start` (millisecond resolution), y: average price
fn to_points(candles: &[Candlestick], start: Timestamp) -> Vec<Point> {
    candles
        .iter()
        .map(|candle| {
            let offset_ms = (candle.open_time - start).num_milliseconds();
            Point::new(Decimal::new(offset_ms, 3), candle.average_price)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn evaluate(config: PredictionConfig, ys: &[Decimal]) -> PricePrediction {
        let points: Vec<Point> = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| Point::new(Decimal::from(i as i64 * 60), y))
            .collect();
        let regression = LinearRegression::new(NumericContext::new(config.scale));
        judge(&regression, &config, &points).unwrap()
    }

    #[test]
    fn test_steady_rise_is_profitable() {
        let ys: Vec<Decimal> = (0..10).map(|i| dec!(100) + Decimal::from(i * 6)).collect();
        let prediction = evaluate(PredictionConfig::default(), &ys);
        assert!(prediction.profitable);
        assert_eq!(prediction.growth_per_sec, dec!(0.1));
    }

    #[test]
    fn test_decline_is_not_profitable() {
        let ys: Vec<Decimal> = (0..10).map(|i| dec!(100) - Decimal::from(i)).collect();
        let prediction = evaluate(PredictionConfig::default(), &ys);
        assert!(!prediction.profitable);
        assert!(prediction.growth_per_sec < Decimal::ZERO);
    }

    #[test]
    fn test_recent_dip_is_not_profitable() {
        // long window rises, recent half falls
        let ys = [
            dec!(10),
            dec!(11),
            dec!(12),
            dec!(13),
            dec!(14),
            dec!(20),
            dec!(19.9),
            dec!(19.8),
            dec!(19.7),
            dec!(19.6),
        ];
        let prediction = evaluate(PredictionConfig::default(), &ys);
        assert!(!prediction.profitable);
    }

    #[test]
    fn test_choppy_series_exceeds_volatility_ceiling() {
        let ys: Vec<Decimal> = (0..20)
            .map(|i| if i % 2 == 0 { dec!(1) } else { dec!(3) })
            .collect();
        let prediction = evaluate(PredictionConfig::default(), &ys);
        assert!(!prediction.profitable);

        let tolerant = PredictionConfig {
            max_long_term_volatility: dec!(10),
            max_short_term_volatility: dec!(10),
            ..PredictionConfig::default()
        };
        assert!(evaluate(tolerant, &ys).profitable);
    }

    #[test]
    fn test_flat_prediction() {
        assert_eq!(
            PricePrediction::flat(),
            PricePrediction {
                profitable: true,
                growth_per_sec: Decimal::ZERO
            }
        );
    }
}
