//! Plan worker - executes plans until cancelled
//!
//! Each iteration asks the planner for a plan and submits its orders in
//! sequence. A failed production or a rejected order is logged, followed by
//! a pause, and the loop carries on. Only cancellation ends it.

use std::sync::Arc;
use std::time::Duration;

use meridian_core::TradingPlan;
use meridian_ports::{OrderSink, ProviderError, Sleeper};
use tokio_util::sync::CancellationToken;

use crate::error::PlannerError;
use crate::planner::TradingPlanner;

pub struct PlanWorker {
    planner: Arc<TradingPlanner>,
    sink: Arc<dyn OrderSink>,
    sleeper: Arc<dyn Sleeper>,
    failure_delay: Duration,
    cancel: CancellationToken,
}

impl PlanWorker {
    pub fn new(
        planner: Arc<TradingPlanner>,
        sink: Arc<dyn OrderSink>,
        sleeper: Arc<dyn Sleeper>,
        failure_delay: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            planner,
            sink,
            sleeper,
            failure_delay,
            cancel,
        }
    }

    pub async fn run(self) {
        log::info!("[Worker] Started, submitting to {}", self.sink.name());

        while !self.cancel.is_cancelled() {
            let plan = match self.planner.next_plan(&self.cancel).await {
                Ok(plan) => plan,
                Err(PlannerError::Cancelled) => break,
                Err(e) => {
                    log::error!("[Worker] No plan this round: {e}");
                    self.pause().await;
                    continue;
                }
            };

            if let Err(e) = self.execute(&plan).await {
                self.planner.mark_last_plan_as_failed().await;
                log::error!("[Worker] Plan {} failed: {e}", plan.id);
                self.pause().await;
            }
        }

        log::info!("[Worker] Stopped");
    }

    /// Submit the plan's orders in order, stopping at the first rejection
    /// or when cancelled
    async fn execute(&self, plan: &TradingPlan) -> Result<(), ProviderError> {
        if plan.is_empty() {
            log::info!("[Worker] Plan {} has nothing to do", plan.id);
            return Ok(());
        }

        for (i, order) in plan.orders().iter().enumerate() {
            if self.cancel.is_cancelled() {
                log::warn!(
                    "[Worker] Cancelled with {} orders of plan {} left",
                    plan.len() - i,
                    plan.id
                );
                return Ok(());
            }
            self.sink
                .submit(order.symbol(), order.side(), order.quantity)
                .await?;
            log::info!("[Worker] Placed {order}");
        }
        log::info!("[Worker] Plan {} executed ({} orders)", plan.id, plan.len());
        Ok(())
    }

    async fn pause(&self) {
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = self.sleeper.sleep(self.failure_delay) => {}
        }
    }
}
