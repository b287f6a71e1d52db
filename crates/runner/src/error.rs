//! Error types for the runner crate

use meridian_gateway::GatewayError;
use meridian_strategy::StrategyError;
use thiserror::Error;

use crate::config::ConfigError;

/// Why the planner did not hand out a plan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Planning cancelled")]
    Cancelled,

    #[error("Plan production failed: {0}")]
    Production(#[from] StrategyError),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Plan consumer is already started")]
    AlreadyStarted,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Exchange setup failed: {0}")]
    Gateway(#[from] GatewayError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
