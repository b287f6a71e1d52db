//! Meridian Gateway
//!
//! Gateway layer between the decision engine and an exchange. Provides:
//! - Shared TTL caches of the symbol universe and ticker prices
//! - Exchange adapters (a deterministic simulator, a dry-run order sink)
//!
//! ## Architecture
//!
//! ```text
//! External World (exchange REST API, Simulator)
//!         │  ExchangeSource: fetch_symbols, fetch_prices
//!    ┌────▼─────────────────────────┐
//!    │ CachedSymbolProvider (10 min) │──► SymbolInfoProvider
//!    │ CachedPriceProvider  (60 s)   │──► PriceProvider
//!    └──────────────────────────────┘
//!         ▲
//!         │ submit(symbol, side, quantity)
//!    OrderSink: SimulatedExchange | DryRunOrderSink
//! ```
//!
//! ## Caches
//!
//! Readers share the latest published snapshot (`Arc`) behind a short read
//! lock. Refreshing is serialized per cache: the staleness check, the fetch
//! and the swap run under one async gate, so a reader never observes a
//! half-built table.

pub mod adapters;
pub mod cache;
pub mod error;
pub mod source;

// Re-export commonly used types
pub use adapters::{
    DryRunOrderSink, GridConfig, SimulatedBalance, SimulatedExchange, SimulatedSymbol,
    SimulationConfig,
};
pub use cache::{CachedPriceProvider, CachedSymbolProvider, TtlCache, is_stale};
pub use error::GatewayError;
pub use source::{ExchangeSource, ListedSymbol, SymbolStatus, TickerPrice};
