//! Fixed-window rate limiter over a shared counter store.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::RateLimitConfig;
use crate::domain::foundation::Timestamp;
use crate::ports::{
    ClientKey, CounterStore, RateLimitDecision, RateLimitDenied, RateLimitError,
    RateLimitStatus, RateLimiter,
};

/// Fixed-window counter limiter.
///
/// 1. INCR the client's key and read its TTL in one store round trip
/// 2. If the key has no expiry, a new window starts: set it
/// 3. If the count exceeds the limit, reject
///
/// A burst at the end of one window followed by another right after the
/// rollover is admitted; windows are fixed, not sliding.
#[derive(Clone)]
pub struct FixedWindowRateLimiter {
    store: Arc<dyn CounterStore>,
    limit: u32,
    window_secs: u64,
}

impl FixedWindowRateLimiter {
    pub fn new(store: Arc<dyn CounterStore>, limit: u32, window_secs: u64) -> Self {
        Self {
            store,
            limit,
            window_secs,
        }
    }

    pub fn from_config(store: Arc<dyn CounterStore>, config: &RateLimitConfig) -> Self {
        Self::new(store, config.requests_per_window, config.window_secs)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }
}

#[async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn check(&self, key: &ClientKey) -> Result<RateLimitDecision, RateLimitError> {
        let store_key = key.to_store_key();

        let reading = self.store.increment(&store_key).await?;
        let count = reading.count;

        // No TTL means either the first hit of a window or a counter whose
        // EXPIRE never landed; both get a full window.
        let reset_secs = match reading.ttl_secs {
            Some(ttl) => ttl,
            None => {
                self.store.set_expiry(&store_key, self.window_secs).await?;
                self.window_secs
            }
        };

        if count > u64::from(self.limit) {
            return Ok(RateLimitDecision::Reject(RateLimitDenied {
                limit: self.limit,
                retry_after_secs: reset_secs.max(1),
            }));
        }

        Ok(RateLimitDecision::Admit(RateLimitStatus {
            limit: self.limit,
            remaining: self.limit.saturating_sub(count as u32),
            reset_at: Timestamp::now().plus_secs(reset_secs),
            window_secs: self.window_secs,
        }))
    }
}

impl std::fmt::Debug for FixedWindowRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWindowRateLimiter")
            .field("limit", &self.limit)
            .field("window_secs", &self.window_secs)
            .finish_non_exhaustive()
    }
}
