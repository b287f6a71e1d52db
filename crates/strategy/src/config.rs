//! Trading configuration
//!
//! Decimal values are written as JSON strings (`"0.001"`) to keep them exact.

use meridian_core::{Currency, Quantity};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Reserve kept aside for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub currency: Currency,
    /// Quantity never traded away
    #[serde(default)]
    pub min_preferred_quantity: Quantity,
}

/// Price prediction parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Length of the history window fitted by the predictor
    pub history_period_sec: u64,
    /// Ceiling on the full-window volatility for a profitable verdict
    pub max_long_term_volatility: Decimal,
    /// Ceiling on the recent-half volatility for a profitable verdict
    pub max_short_term_volatility: Decimal,
    /// Decimal places kept on regression outputs
    pub scale: u32,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            history_period_sec: 3600,       // 1 hour of minute candles
            max_long_term_volatility: dec!(0.02),
            max_short_term_volatility: dec!(0.01),
            scale: 16,
        }
    }
}

/// What to trade, against what, and how conservatively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Currency all values are measured in
    pub quote_currency: Currency,
    /// Minimum free value (in quote) for an asset to be converted
    pub min_trading_value: Decimal,
    /// Fee charged per order, as a fraction of the traded value
    pub trading_fee_rate: Decimal,
    /// Horizon over which growth with and without conversion is compared
    pub measuring_period_sec: u64,
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
    #[serde(default)]
    pub prediction: PredictionConfig,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            quote_currency: Currency::from("USDT"),
            min_trading_value: dec!(10),
            trading_fee_rate: dec!(0.001), // 10 bps
            measuring_period_sec: 3600,
            assets: Vec::new(),
            prediction: PredictionConfig::default(),
        }
    }
}

impl TradingConfig {
    /// Reserve for `currency`, zero when it is not configured
    pub fn reserve_for(&self, currency: &Currency) -> Quantity {
        self.assets
            .iter()
            .find(|asset| &asset.currency == currency)
            .map(|asset| asset.min_preferred_quantity)
            .unwrap_or(Decimal::ZERO)
    }

    /// Measuring horizon in seconds
    pub fn horizon(&self) -> Decimal {
        Decimal::from(self.measuring_period_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let json = r#"{
            "quote_currency": "USDT",
            "min_trading_value": "20",
            "trading_fee_rate": "0.00075",
            "measuring_period_sec": 1800,
            "assets": [
                { "currency": "BNB", "min_preferred_quantity": "1.5" },
                { "currency": "BTC" }
            ]
        }"#;
        let config: TradingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.quote_currency, Currency::from("USDT"));
        assert_eq!(config.trading_fee_rate, dec!(0.00075));
        assert_eq!(config.horizon(), dec!(1800));
        assert_eq!(config.prediction, PredictionConfig::default());
        assert_eq!(config.reserve_for(&"BNB".into()), dec!(1.5));
        assert_eq!(config.reserve_for(&"BTC".into()), Decimal::ZERO);
        assert_eq!(config.reserve_for(&"ETH".into()), Decimal::ZERO);
    }

    #[test]
    fn test_partial_prediction_section() {
        let json = r#"{
            "quote_currency": "USDT",
            "min_trading_value": "10",
            "trading_fee_rate": "0.001",
            "measuring_period_sec": 3600,
            "prediction": { "max_short_term_volatility": "0.005" }
        }"#;
        let config: TradingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.prediction.max_short_term_volatility, dec!(0.005));
        assert_eq!(config.prediction.history_period_sec, 3600);
    }
}
