//! Meridian Strategy
//!
//! Decides which held assets should be converted, and into what.
//!
//! ## Architecture
//!
//! ```text
//!  CandlestickProvider ──► CurrencyPriceHistory ──► PricePredictor
//!                          (multi-hop series)       (long/short regression)
//!                                                          │
//!  AssetProvider ──► CandidateAssetProducer ◄──────────────┘
//!                     free quantity, free value,           ▲
//!                     prediction, eligibility              │ PriceConverter
//!                             │
//!                             ▼
//!                       PlanProducer ──► TradingPlan
//!                  (greedy best target per source)
//! ```
//!
//! The search is greedy: each eligible source picks its single most
//! profitable target independently of the others, so two sources may both
//! pile into the same target within one cycle.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meridian_strategy::{PlanProducer, PlanSource};
//!
//! let producer = PlanProducer::new(config, compiler, candidates, clock);
//! let plan = producer.produce().await?;
//! for order in plan.orders() {
//!     println!("{order}");
//! }
//! ```

pub mod candidates;
pub mod config;
pub mod error;
pub mod history;
pub mod plan;
pub mod predictor;

// Re-export main types
pub use candidates::{CandidateAsset, CandidateAssetProducer};
pub use config::{AssetConfig, PredictionConfig, TradingConfig};
pub use error::{Result, StrategyError};
pub use history::CurrencyPriceHistory;
pub use plan::{PlanProducer, PlanSource};
pub use predictor::{PricePrediction, PricePredictor};
