//! Shared counter store port.
//!
//! The network-addressable state behind rate limiting. Implementations must
//! serialize increments per key so concurrent callers never lose a count.

use async_trait::async_trait;
use std::time::Duration;

/// Port for an external atomic counter service.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increments `key` and reads its remaining lifetime in the
    /// same round trip.
    ///
    /// A missing or expired key starts again from zero with no expiry.
    async fn increment(&self, key: &str) -> Result<CounterReading, CounterStoreError>;

    /// Sets `key` to expire after `seconds`. Idempotent.
    async fn set_expiry(&self, key: &str, seconds: u64) -> Result<(), CounterStoreError>;
}

/// A counter's state right after an increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterReading {
    /// Post-increment value.
    pub count: u64,
    /// Seconds until the key expires, or `None` when no expiry is set.
    pub ttl_secs: Option<u64>,
}

/// Errors raised by counter store implementations.
#[derive(Debug, thiserror::Error)]
pub enum CounterStoreError {
    /// The store rejected the call or could not be reached.
    #[error("counter store unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the configured bound.
    #[error("counter store call timed out after {0:?}")]
    Timeout(Duration),
}
