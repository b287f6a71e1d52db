//! Exchange adapters
//!
//! Concrete exchanges behind the gateway ports. The simulator stands in for
//! a live venue; the dry-run sink validates and logs orders without placing
//! them.

mod dry_run;
pub mod simulator;

pub use dry_run::DryRunOrderSink;
pub use simulator::{GridConfig, SimulatedBalance, SimulatedExchange, SimulatedSymbol, SimulationConfig};
