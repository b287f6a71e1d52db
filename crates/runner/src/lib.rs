//! Meridian Runner - Conversion Trader
//!
//! Runs the decision engine against an exchange:
//!
//! - **Config**: JSON configuration for every layer
//! - **Planner**: single-slot gate with success and failure cooldowns
//! - **Worker**: background loop executing plans order by order
//! - **Consumer**: start/stop lifecycle of the worker task
//! - **Bootstrap**: wiring from configuration to a running trader
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────┐
//!   │                    PlanConsumer                      │
//!   │  ┌────────────────────────────────────────────────┐  │
//!   │  │ PlanWorker (tokio task)                        │  │
//!   │  │                                                │  │
//!   │  │   loop {                                       │  │
//!   │  │     TradingPlanner::next_plan ──► PlanSource   │  │
//!   │  │       (cooldown wait, cancellable)             │  │
//!   │  │     for order in plan ──► OrderSink::submit    │  │
//!   │  │     on failure: mark failed, wait, retry       │  │
//!   │  │   }                                            │  │
//!   │  └────────────────────────────────────────────────┘  │
//!   └───────────────────────────┬──────────────────────────┘
//!                               │ CancellationToken
//!                          stop(timeout)
//! ```

pub mod bootstrap;
pub mod config;
pub mod consumer;
pub mod error;
pub mod planner;
pub mod worker;

// Re-export main types
pub use bootstrap::Trader;
pub use config::{CacheConfig, ConfigError, PlannerConfig, TraderConfig, WorkerConfig};
pub use consumer::PlanConsumer;
pub use error::{PlannerError, Result, RunnerError};
pub use planner::{PlannerPhase, TradingPlanner};
pub use worker::PlanWorker;
