//! Rate limiting middleware for axum.
//!
//! Every request is checked against the `RateLimiter` port before it reaches
//! a route, keyed by client address and request path.
//!
//! Admitted responses carry:
//! - `X-RateLimit-Limit`: Maximum requests allowed in the window
//! - `X-RateLimit-Remaining`: Requests remaining in the current window
//! - `X-RateLimit-Reset`: Unix timestamp when the window resets
//!
//! Rejections are `429` with a `Retry-After` header.
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, routing::get, Router};
//!
//! let state = RateLimitState::new(limiter, &config.rate_limit);
//! let app = Router::new()
//!     .route("/health", get(health))
//!     .layer(middleware::from_fn_with_state(state, rate_limit_middleware));
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::{RateLimitConfig, StoreFailurePolicy};
use crate::ports::{ClientKey, RateLimitDecision, RateLimitStatus, RateLimiter};

pub const RATE_LIMITED_DETAIL: &str = "Rate limit exceeded. Try again later.";
pub const LIMITER_UNAVAILABLE_DETAIL: &str = "Rate limiter unavailable. Try again later.";

/// Address used when neither the socket nor a trusted header yields one.
const UNKNOWN_CLIENT: &str = "unknown";

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// Rate limiter middleware state.
#[derive(Clone)]
pub struct RateLimitState {
    limiter: Arc<dyn RateLimiter>,
    on_store_error: StoreFailurePolicy,
    trust_forwarded_headers: bool,
}

impl RateLimitState {
    pub fn new(limiter: Arc<dyn RateLimiter>, config: &RateLimitConfig) -> Self {
        Self {
            limiter,
            on_store_error: config.on_store_error,
            trust_forwarded_headers: config.trust_forwarded_headers,
        }
    }
}

/// Checks the client's budget for this path and either short-circuits with
/// 429 (or 503 when the counter store is down and the policy is fail-closed)
/// or runs the rest of the stack.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let address = client_address(
        request.headers(),
        connect_info.as_ref(),
        state.trust_forwarded_headers,
    );
    let key = ClientKey::new(address, request.uri().path());

    let status = match state.limiter.check(&key).await {
        Ok(RateLimitDecision::Admit(status)) => Some(status),
        Ok(RateLimitDecision::Reject(denied)) => {
            tracing::debug!(client = %key, limit = denied.limit, "rate limit exceeded");
            return rate_limit_response(denied.limit, denied.retry_after_secs);
        }
        Err(e) => match state.on_store_error {
            StoreFailurePolicy::FailOpen => {
                tracing::warn!(error = %e, client = %key, "rate limiter unavailable, admitting request");
                None
            }
            StoreFailurePolicy::FailClosed => {
                tracing::error!(error = %e, client = %key, "rate limiter unavailable, refusing request");
                return limiter_unavailable_response();
            }
        },
    };

    let mut response = next.run(request).await;
    if let Some(status) = status {
        add_rate_limit_headers(response.headers_mut(), &status);
    }
    response
}

/// Client address for the throttle key.
///
/// The socket peer is authoritative. Forwarded headers are consulted only
/// when explicitly trusted, first entry of `X-Forwarded-For` then
/// `X-Real-IP`.
fn client_address(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
    trust_forwarded_headers: bool,
) -> String {
    if trust_forwarded_headers {
        let forwarded = headers
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = headers
            .get("X-Real-IP")
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// 429 Too Many Requests.
fn rate_limit_response(limit: u32, retry_after_secs: u64) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(serde_json::json!({ "detail": RATE_LIMITED_DETAIL })),
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(limit));
    headers.insert(headers::X_RATELIMIT_REMAINING.clone(), HeaderValue::from(0u32));
    headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
    response
}

/// 503 when the counter store is down under fail-closed.
fn limiter_unavailable_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({ "detail": LIMITER_UNAVAILABLE_DETAIL })),
    )
        .into_response()
}

fn add_rate_limit_headers(headers: &mut HeaderMap, status: &RateLimitStatus) {
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(status.limit));
    headers.insert(
        headers::X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from(status.remaining),
    );
    headers.insert(
        headers::X_RATELIMIT_RESET.clone(),
        HeaderValue::from(status.reset_at.as_unix_secs()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo(SocketAddr::from(([10, 1, 2, 3], 44321)))
    }

    #[test]
    fn socket_peer_is_used_by_default() {
        let map = headers(&[("X-Forwarded-For", "203.0.113.7")]);
        assert_eq!(client_address(&map, Some(&peer()), false), "10.1.2.3");
    }

    #[test]
    fn trusted_forwarded_for_takes_first_entry() {
        let map = headers(&[("X-Forwarded-For", "203.0.113.7, 10.0.0.1")]);
        assert_eq!(client_address(&map, Some(&peer()), true), "203.0.113.7");
    }

    #[test]
    fn trusted_real_ip_is_used_without_forwarded_for() {
        let map = headers(&[("X-Real-IP", "198.51.100.4")]);
        assert_eq!(client_address(&map, Some(&peer()), true), "198.51.100.4");
    }

    #[test]
    fn trusted_headers_fall_back_to_socket_peer() {
        assert_eq!(client_address(&HeaderMap::new(), Some(&peer()), true), "10.1.2.3");
    }

    #[test]
    fn missing_peer_is_unknown() {
        assert_eq!(client_address(&HeaderMap::new(), None, false), "unknown");
    }

    #[test]
    fn rejection_is_429_with_retry_after() {
        let response = rate_limit_response(5, 42);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");
        assert_eq!(response.headers().get("x-ratelimit-limit").unwrap(), "5");
        assert_eq!(response.headers().get("x-ratelimit-remaining").unwrap(), "0");
    }

    #[test]
    fn unavailable_limiter_is_503() {
        let response = limiter_unavailable_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn rate_limit_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RateLimitState>();
    }
}
