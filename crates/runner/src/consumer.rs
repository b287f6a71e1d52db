//! Lifecycle of the background plan worker

use std::sync::Arc;
use std::time::Duration;

use meridian_ports::{OrderSink, Sleeper};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, RunnerError};
use crate::planner::TradingPlanner;
use crate::worker::PlanWorker;

struct Running {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns at most one [`PlanWorker`] task
pub struct PlanConsumer {
    planner: Arc<TradingPlanner>,
    sink: Arc<dyn OrderSink>,
    sleeper: Arc<dyn Sleeper>,
    failure_delay: Duration,
    running: Mutex<Option<Running>>,
}

impl PlanConsumer {
    pub fn new(
        planner: Arc<TradingPlanner>,
        sink: Arc<dyn OrderSink>,
        sleeper: Arc<dyn Sleeper>,
        failure_delay: Duration,
    ) -> Self {
        Self {
            planner,
            sink,
            sleeper,
            failure_delay,
            running: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Spawn the worker on the current runtime
    pub fn start(&self) -> Result<()> {
        let mut running = self.running.lock();
        if running.is_some() {
            return Err(RunnerError::AlreadyStarted);
        }

        let cancel = CancellationToken::new();
        let worker = PlanWorker::new(
            Arc::clone(&self.planner),
            Arc::clone(&self.sink),
            Arc::clone(&self.sleeper),
            self.failure_delay,
            cancel.clone(),
        );
        let handle = tokio::spawn(worker.run());
        *running = Some(Running { cancel, handle });
        log::info!("[Consumer] Plan worker started");
        Ok(())
    }

    /// Cancel the worker and wait up to `timeout` for it to finish.
    ///
    /// Returns false when the worker had to be aborted. Stopping a consumer
    /// that is not running is a no-op.
    pub async fn stop(&self, timeout: Duration) -> bool {
        let Some(Running { cancel, mut handle }) = self.running.lock().take() else {
            return true;
        };

        cancel.cancel();
        match tokio::time::timeout(timeout, &mut handle).await {
            Ok(Ok(())) => {
                log::info!("[Consumer] Plan worker stopped");
                true
            }
            Ok(Err(e)) => {
                log::error!("[Consumer] Plan worker ended abnormally: {e}");
                true
            }
            Err(_) => {
                log::warn!(
                    "[Consumer] Plan worker still busy after {}ms, aborting",
                    timeout.as_millis()
                );
                handle.abort();
                false
            }
        }
    }
}
