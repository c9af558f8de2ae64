//! Request throttling configuration

use serde::Deserialize;

use super::error::ValidationError;

/// What the throttle does when the counter store cannot be reached.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreFailurePolicy {
    /// Admit the request and log the failure.
    FailOpen,
    /// Refuse the request with 503.
    #[default]
    FailClosed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per client per window
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    #[serde(default)]
    pub on_store_error: StoreFailurePolicy,

    /// Take the client address from `X-Forwarded-For` / `X-Real-IP`.
    /// Only enable behind a proxy that overwrites these headers.
    #[serde(default)]
    pub trust_forwarded_headers: bool,
}

impl RateLimitConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.requests_per_window == 0 {
            return Err(ValidationError::InvalidRateLimit(
                "requests_per_window must be positive",
            ));
        }
        if self.window_secs == 0 {
            return Err(ValidationError::InvalidRateLimit("window_secs must be positive"));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: default_requests_per_window(),
            window_secs: default_window_secs(),
            on_store_error: StoreFailurePolicy::default(),
            trust_forwarded_headers: false,
        }
    }
}

fn default_requests_per_window() -> u32 {
    5
}

fn default_window_secs() -> u64 {
    60
}
