//! Trading planner - one plan at a time, spaced by a cooldown
//!
//! The planner is a single-slot gate in front of a [`PlanSource`]. Callers
//! queue on an async mutex holding the time of the last plan; the holder
//! waits out the remaining cooldown, produces, and records the new plan
//! time. Marking the last plan as failed shortens the next cooldown.

use std::sync::Arc;

use chrono::Duration;
use meridian_core::{Timestamp, TradingPlan};
use meridian_ports::{Clock, Sleeper};
use meridian_strategy::PlanSource;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::config::PlannerConfig;
use crate::error::PlannerError;

/// What the planner is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerPhase {
    Idle,
    CoolingDown,
    Producing,
}

struct Gate {
    last_plan_at: Option<Timestamp>,
    cooldown: Duration,
}

pub struct TradingPlanner {
    source: Arc<dyn PlanSource>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
    success_cooldown: Duration,
    failure_cooldown: Duration,
    gate: tokio::sync::Mutex<Gate>,
    phase: Mutex<PlannerPhase>,
}

impl TradingPlanner {
    pub fn new(
        source: Arc<dyn PlanSource>,
        clock: Arc<dyn Clock>,
        sleeper: Arc<dyn Sleeper>,
        config: &PlannerConfig,
    ) -> Self {
        let success_cooldown = config.success_cooldown();
        Self {
            source,
            clock,
            sleeper,
            success_cooldown,
            failure_cooldown: config.failure_cooldown(),
            gate: tokio::sync::Mutex::new(Gate {
                last_plan_at: None,
                cooldown: success_cooldown,
            }),
            phase: Mutex::new(PlannerPhase::Idle),
        }
    }

    pub fn phase(&self) -> PlannerPhase {
        *self.phase.lock()
    }

    fn set_phase(&self, phase: PlannerPhase) {
        *self.phase.lock() = phase;
    }

    /// Next plan, once the cooldown since the previous one has elapsed.
    ///
    /// Concurrent callers are served one after the other. Cancelling the
    /// token aborts the wait for the gate, the cooldown and the production.
    pub async fn next_plan(&self, cancel: &CancellationToken) -> Result<TradingPlan, PlannerError> {
        let mut gate = tokio::select! {
            _ = cancel.cancelled() => return Err(PlannerError::Cancelled),
            gate = self.gate.lock() => gate,
        };

        let now = self.clock.now();
        let remaining = gate
            .last_plan_at
            .and_then(|last| last.checked_add_signed(gate.cooldown))
            .map(|ready| ready - now)
            .filter(|remaining| *remaining > Duration::zero());
        if let Some(remaining) = remaining {
            self.set_phase(PlannerPhase::CoolingDown);
            log::info!(
                "[Planner] Waiting {}s before the next plan",
                remaining.num_seconds()
            );
            let wait = remaining.to_std().unwrap_or_default();
            tokio::select! {
                _ = cancel.cancelled() => {
                    self.set_phase(PlannerPhase::Idle);
                    return Err(PlannerError::Cancelled);
                }
                _ = self.sleeper.sleep(wait) => {}
            }
        }

        self.set_phase(PlannerPhase::Producing);
        let produced = tokio::select! {
            _ = cancel.cancelled() => Err(PlannerError::Cancelled),
            produced = self.source.produce() => produced.map_err(PlannerError::from),
        };
        self.set_phase(PlannerPhase::Idle);

        let plan = produced.inspect_err(|e| {
            if *e != PlannerError::Cancelled {
                log::error!("[Planner] Failed to produce a plan: {e}");
            }
        })?;
        gate.last_plan_at = Some(self.clock.now());
        gate.cooldown = self.success_cooldown;
        Ok(plan)
    }

    /// Use the failure cooldown before the next plan
    pub async fn mark_last_plan_as_failed(&self) {
        let mut gate = self.gate.lock().await;
        gate.cooldown = self.failure_cooldown;
        log::warn!(
            "[Planner] Last plan failed, next cooldown {}s",
            self.failure_cooldown.num_seconds()
        );
    }
}
