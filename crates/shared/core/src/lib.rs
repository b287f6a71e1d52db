//! Meridian Core Domain
//!
//! Pure domain types for the Meridian conversion engine.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! ```text
//!   Currency ──┐
//!              ├── Symbol ── SymbolInfo (quantity grid, price grid)
//!   Currency ──┘      │
//!                     └── OrderSpec (side) ── Order (quantity) ── TradingPlan
//! ```

pub mod entities;
pub mod instruments;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Asset, Candlestick, Order, OrderSide, OrderSpec, PlanId, TradingPlan};
pub use instruments::{DecimalQuantizer, QuantizeError, Rounding, Symbol, SymbolInfo};
pub use values::{Currency, Price, Quantity, Timestamp};
