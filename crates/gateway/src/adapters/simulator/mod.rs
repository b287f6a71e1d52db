//! Deterministic spot exchange
//!
//! Every listed symbol follows a straight price line from the moment the
//! exchange is created, so candles, tickers and fills all agree with each
//! other for any given clock reading.

mod config;
mod exchange;

pub use config::{GridConfig, SimulatedBalance, SimulatedSymbol, SimulationConfig};
pub use exchange::{Fill, SimulatedExchange};
