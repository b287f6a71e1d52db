//! Meridian Routing
//!
//! Turns the exchange's symbol universe into executable conversion chains.
//!
//! ```text
//!  SymbolInfoProvider ──► ShortestPathsResolver ──► TradingPaths (Arc snapshot)
//!                                                         │
//!  PriceProvider ─────────────────────► PathCompiler ◄────┘
//!                                          │   find_order_specs(src, tgt)
//!                                          │   compile(src, tgt, qty) ──► Vec<Order>
//!                                          ▼
//!                                    PriceConverter
//!                                      relative_value(base, quote, qty)
//! ```
//!
//! Symbols are undirected edges of weight 1 between their base and quote
//! currencies. The resolver computes all-pairs shortest paths once per
//! symbol-table version; the compiler walks the next-hop table and sizes
//! each order against the exchange grids, rounding prices pessimistically.

mod compiler;
mod converter;
mod error;
mod paths;
mod resolver;

pub use compiler::PathCompiler;
pub use converter::PriceConverter;
pub use error::{Result, RoutingError};
pub use paths::{PathStep, TradingPaths};
pub use resolver::ShortestPathsResolver;
