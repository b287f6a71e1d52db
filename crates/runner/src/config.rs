//! Configuration loading for the trader
//!
//! One JSON document configures every layer:
//! - Trading parameters (quote currency, fees, reserves, prediction)
//! - Planner cooldowns
//! - Worker retry delay, dry run and shutdown timeout
//! - Cache lifetimes
//! - The simulated exchange
//!
//! Only `trading` is required. Decimals are written as strings.

use std::path::Path;
use std::time::Duration;

use meridian_gateway::{CachedPriceProvider, CachedSymbolProvider, SimulationConfig};
use meridian_strategy::TradingConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderConfig {
    pub trading: TradingConfig,

    #[serde(default)]
    pub planner: PlannerConfig,

    #[serde(default)]
    pub worker: WorkerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default = "SimulationConfig::with_default_markets")]
    pub simulation: SimulationConfig,
}

impl TraderConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let trading = &self.trading;
        if trading.quote_currency.as_str().is_empty() {
            return Err(ConfigError::InvalidTrading("quote currency is empty".into()));
        }
        if trading.trading_fee_rate < Decimal::ZERO {
            return Err(ConfigError::InvalidTrading(format!(
                "negative trading fee rate {}",
                trading.trading_fee_rate
            )));
        }
        if trading.min_trading_value < Decimal::ZERO {
            return Err(ConfigError::InvalidTrading(format!(
                "negative minimum trading value {}",
                trading.min_trading_value
            )));
        }
        if trading.measuring_period_sec == 0 {
            return Err(ConfigError::InvalidTrading("measuring period must be positive".into()));
        }
        if let Some(asset) = trading
            .assets
            .iter()
            .find(|asset| asset.min_preferred_quantity < Decimal::ZERO)
        {
            return Err(ConfigError::InvalidTrading(format!(
                "negative reserve for {}",
                asset.currency
            )));
        }

        let prediction = &trading.prediction;
        if prediction.history_period_sec == 0 {
            return Err(ConfigError::InvalidPrediction("history period must be positive".into()));
        }
        if prediction.max_long_term_volatility < Decimal::ZERO
            || prediction.max_short_term_volatility < Decimal::ZERO
        {
            return Err(ConfigError::InvalidPrediction("negative volatility ceiling".into()));
        }
        if prediction.scale > Decimal::MAX_SCALE {
            return Err(ConfigError::InvalidPrediction(format!(
                "scale {} exceeds {}",
                prediction.scale,
                Decimal::MAX_SCALE
            )));
        }

        if self.simulation.fee_rate < Decimal::ZERO || self.simulation.fee_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidSimulation(format!(
                "fee rate {} outside [0, 1)",
                self.simulation.fee_rate
            )));
        }
        Ok(())
    }
}

/// Cooldowns between two plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Wait after a plan that executed fully
    pub success_cooldown_ms: u64,
    /// Wait after a plan with a failed order
    pub failure_cooldown_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            success_cooldown_ms: 600_000, // 10 minutes
            failure_cooldown_ms: 10_000,
        }
    }
}

impl PlannerConfig {
    pub fn success_cooldown(&self) -> chrono::Duration {
        millis(self.success_cooldown_ms)
    }

    pub fn failure_cooldown(&self) -> chrono::Duration {
        millis(self.failure_cooldown_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Pause before retrying after a failed production or execution
    pub failure_delay_ms: u64,
    /// Validate and log orders instead of placing them
    pub dry_run: bool,
    /// How long `stop` waits for the worker before aborting it
    pub shutdown_timeout_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            failure_delay_ms: 3_000,
            dry_run: false,
            shutdown_timeout_ms: 30_000,
        }
    }
}

impl WorkerConfig {
    pub fn failure_delay(&self) -> Duration {
        Duration::from_millis(self.failure_delay_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub symbols_ttl_ms: u64,
    pub prices_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            symbols_ttl_ms: CachedSymbolProvider::DEFAULT_TTL_MS,
            prices_ttl_ms: CachedPriceProvider::DEFAULT_TTL_MS,
        }
    }
}

impl CacheConfig {
    pub fn symbols_ttl(&self) -> chrono::Duration {
        millis(self.symbols_ttl_ms)
    }

    pub fn prices_ttl(&self) -> chrono::Duration {
        millis(self.prices_ttl_ms)
    }
}

/// Saturates instead of overflowing on absurd values
fn millis(ms: u64) -> chrono::Duration {
    i64::try_from(ms)
        .ok()
        .and_then(chrono::Duration::try_milliseconds)
        .unwrap_or(chrono::Duration::MAX)
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid trading config: {0}")]
    InvalidTrading(String),

    #[error("Invalid prediction config: {0}")]
    InvalidPrediction(String),

    #[error("Invalid simulation config: {0}")]
    InvalidSimulation(String),
}
