//! Meridian Ports
//!
//! Port definitions (traits) for the Meridian conversion engine.
//! These define the boundaries between the decision engine and the
//! exchange, the account, and the passage of time.

mod clock;
mod error;
mod market;
mod trading;

pub use clock::{Clock, Sleeper};
pub use error::{ProviderError, ProviderResult};
pub use market::{CandlestickProvider, PriceProvider, SymbolInfoProvider};
pub use trading::{AssetProvider, OrderSink};
