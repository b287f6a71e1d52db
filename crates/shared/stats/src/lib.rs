//! Decimal statistics for trading
//!
//! Statistical functions over `rust_decimal::Decimal` with an explicit
//! output precision.
//!
//! # Design
//!
//! - Intermediate sums keep the full 28-digit width of `Decimal`
//! - All arithmetic is checked; overflow surfaces as [`StatsError::Overflow`]
//! - Only returned values are rounded, to the [`NumericContext`] scale
//! - No floating-point operations

mod context;
mod descriptive;
mod error;
mod regression;

pub use context::NumericContext;
pub use descriptive::{mean, variance};
pub use error::{Result, StatsError};
pub use regression::{LinearRegression, Point, RegressionLine};
