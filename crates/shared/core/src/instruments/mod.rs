//! Tradable markets and their exchange grids
//!
//! - `Symbol`: a base/quote market (BTCUSDT)
//! - `SymbolInfo`: a symbol plus its quantity and price grids
//! - `DecimalQuantizer`: snaps values onto a min/max/step grid

mod quantizer;
mod symbol;
mod symbol_info;

pub use quantizer::{DecimalQuantizer, QuantizeError, Rounding};
pub use symbol::Symbol;
pub use symbol_info::SymbolInfo;
