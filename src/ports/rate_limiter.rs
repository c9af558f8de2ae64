//! Rate limiting port for protecting the search endpoint.
//!
//! Defines the per-client admission check. Implementations keep no
//! per-client state in process; counters live in a shared
//! [`CounterStore`](super::CounterStore) so every instance sees one budget.

use async_trait::async_trait;
use std::fmt;

use crate::domain::foundation::Timestamp;

use super::counter_store::CounterStoreError;

/// Port for rate limiting operations.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Counts one request against `key` and decides whether to admit it.
    ///
    /// Every call consumes exactly one increment, whatever the decision.
    async fn check(&self, key: &ClientKey) -> Result<RateLimitDecision, RateLimitError>;
}

/// Throttling identity: originating address plus requested path.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct ClientKey {
    /// Client network address.
    pub address: String,
    /// Request path.
    pub path: String,
}

impl ClientKey {
    pub fn new(address: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            path: path.into(),
        }
    }

    /// Returns the shared-store key for this identity.
    pub fn to_store_key(&self) -> String {
        format!("rate:{}:{}", self.address, self.path)
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address, self.path)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitDecision {
    /// Request is admitted; includes current window status.
    Admit(RateLimitStatus),
    /// Request is rejected; includes retry details.
    Reject(RateLimitDenied),
}

impl RateLimitDecision {
    /// Returns true if the request was admitted.
    pub fn is_admitted(&self) -> bool {
        matches!(self, RateLimitDecision::Admit(_))
    }

    /// Returns true if the request was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, RateLimitDecision::Reject(_))
    }
}

/// Current window status for an admitted request.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum requests admitted per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: Timestamp,
    /// Window duration in seconds.
    pub window_secs: u64,
}

/// Details of a rejection.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    /// Maximum requests admitted per window.
    pub limit: u32,
    /// Seconds until the client should retry.
    pub retry_after_secs: u64,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// The shared counter store could not be used.
    #[error("rate limiter unavailable: {0}")]
    StoreUnavailable(#[from] CounterStoreError),
}
