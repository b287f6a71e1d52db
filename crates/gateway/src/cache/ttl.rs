use std::future::Future;
use std::sync::Arc;

use chrono::Duration;
use meridian_core::Timestamp;
use meridian_ports::{Clock, ProviderResult};
use parking_lot::RwLock;
use tokio::sync::Mutex;

/// Whether a snapshot fetched at `fetched_at` has expired at `now`
pub fn is_stale(fetched_at: Timestamp, now: Timestamp, ttl: Duration) -> bool {
    now - fetched_at >= ttl
}

struct Cached<T> {
    value: Arc<T>,
    fetched_at: Timestamp,
}

/// Single-value cache with an explicit time-to-live
///
/// Reads take a short read lock and clone the published `Arc`. Refreshes
/// are serialized by an async gate and re-check staleness after acquiring
/// it, so concurrent readers of an expired value trigger one fetch.
pub struct TtlCache<T> {
    name: &'static str,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    snapshot: RwLock<Option<Cached<T>>>,
    refresh_gate: Mutex<()>,
}

impl<T: Send + Sync> TtlCache<T> {
    pub fn new(name: &'static str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            ttl,
            clock,
            snapshot: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    /// The cached value if present and not expired
    pub fn fresh(&self) -> Option<Arc<T>> {
        let now = self.clock.now();
        self.snapshot
            .read()
            .as_ref()
            .filter(|cached| !is_stale(cached.fetched_at, now, self.ttl))
            .map(|cached| Arc::clone(&cached.value))
    }

    /// The last published value, expired or not
    pub fn peek(&self) -> Option<Arc<T>> {
        self.snapshot
            .read()
            .as_ref()
            .map(|cached| Arc::clone(&cached.value))
    }

    /// Fresh value, fetching and publishing a new one if expired.
    ///
    /// A failed fetch leaves the previous snapshot in place.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> ProviderResult<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProviderResult<T>>,
    {
        if let Some(value) = self.fresh() {
            return Ok(value);
        }

        let _gate = self.refresh_gate.lock().await;
        if let Some(value) = self.fresh() {
            return Ok(value);
        }

        let fetched_at = self.clock.now();
        let value = Arc::new(fetch().await?);
        *self.snapshot.write() = Some(Cached {
            value: Arc::clone(&value),
            fetched_at,
        });
        log::debug!("[{}] Cache refreshed at {}", self.name, fetched_at);
        Ok(value)
    }
}
