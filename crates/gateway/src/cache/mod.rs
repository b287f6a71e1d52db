//! Shared TTL-refreshed views of the exchange

mod prices;
mod symbols;
mod ttl;

pub use prices::CachedPriceProvider;
pub use symbols::CachedSymbolProvider;
pub use ttl::{TtlCache, is_stale};
