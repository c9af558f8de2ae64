//! In-memory counter store for testing and development.
//!
//! Mirrors the INCR / EXPIRE / TTL contract of the Redis store on the tokio
//! clock, so tests can pause and advance time. Not shared across processes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::ports::{CounterReading, CounterStore, CounterStoreError};

/// In-memory counter store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCounterStore {
    windows: Arc<RwLock<HashMap<String, RateWindow>>>,
}

/// Counter entry for one throttling identity.
#[derive(Debug, Clone)]
struct RateWindow {
    /// Requests counted in the current window.
    count: u64,
    /// When the window expires; `None` until an expiry is set.
    expires_at: Option<Instant>,
}

impl RateWindow {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    fn ttl_secs(&self, now: Instant) -> Option<u64> {
        self.expires_at.map(|at| {
            let remaining = at.saturating_duration_since(now);
            // Round up so a live window never reports zero.
            (remaining.as_millis() as u64 + 999) / 1000
        })
    }
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for a key, treating expired windows as absent.
    pub async fn current(&self, key: &str) -> u64 {
        let now = Instant::now();
        let windows = self.windows.read().await;
        windows
            .get(key)
            .filter(|w| !w.is_expired(now))
            .map_or(0, |w| w.count)
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn increment(&self, key: &str) -> Result<CounterReading, CounterStoreError> {
        let now = Instant::now();
        let mut windows = self.windows.write().await;

        let window = windows.entry(key.to_string()).or_insert(RateWindow {
            count: 0,
            expires_at: None,
        });
        if window.is_expired(now) {
            window.count = 0;
            window.expires_at = None;
        }

        window.count += 1;
        Ok(CounterReading {
            count: window.count,
            ttl_secs: window.ttl_secs(now),
        })
    }

    async fn set_expiry(&self, key: &str, seconds: u64) -> Result<(), CounterStoreError> {
        let now = Instant::now();
        let mut windows = self.windows.write().await;

        // Like EXPIRE, a missing or already-expired key is left alone.
        if let Some(window) = windows.get_mut(key).filter(|w| !w.is_expired(now)) {
            window.expires_at = Some(now + Duration::from_secs(seconds));
        }
        Ok(())
    }
}
