use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use meridian_core::Timestamp;
use meridian_ports::{Clock, Sleeper};
use parking_lot::Mutex;

/// Deterministic clock for tests and simulations
///
/// Time only moves when explicitly advanced. `sleep` advances the clock by
/// the requested duration and returns after yielding once, so code waiting
/// out a cooldown completes instantly while observing the elapsed time.
pub struct ManualClock {
    current_time: Mutex<Timestamp>,
    /// Every duration passed to `sleep`, in call order
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new(initial_time: Timestamp) -> Arc<Self> {
        Arc::new(Self {
            current_time: Mutex::new(initial_time),
            sleeps: Mutex::new(Vec::new()),
        })
    }

    /// Move time forward by `duration`
    pub fn advance(&self, duration: ChronoDuration) {
        *self.current_time.lock() += duration;
    }

    /// Jump to an explicit time
    pub fn set_time(&self, time: Timestamp) {
        *self.current_time.lock() = time;
    }

    /// Durations requested through `sleep` so far
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    pub fn total_slept(&self) -> Duration {
        self.sleeps.lock().iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current_time.lock()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[async_trait]
impl Sleeper for ManualClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        let step = ChronoDuration::from_std(duration).unwrap_or(ChronoDuration::MAX);
        {
            let mut current = self.current_time.lock();
            *current = current.checked_add_signed(step).unwrap_or(*current);
        }
        tokio::task::yield_now().await;
    }
}
