//! HTTP middleware for axum.
//!
//! - `rate_limit` - per-client fixed-window throttling

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, RateLimitState};
