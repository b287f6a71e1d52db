use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use meridian_core::Timestamp;
use meridian_ports::{Clock, Sleeper};

/// Real system clock for production use
///
/// Returns the current wall-clock time and sleeps on the tokio timer.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[async_trait]
impl Sleeper for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
