//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the full service: routes, then the rate limiter,
//! request timeout and tracing layers (outermost last).

pub mod directory;
pub mod health;
pub mod middleware;

use std::time::Duration;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use directory::{directory_routes, DirectoryAppState, ErrorResponse};
pub use health::health;
pub use middleware::{rate_limit_middleware, RateLimitState};

/// Builds the application router.
///
/// Throttling wraps every route, `/health` included.
pub fn app_router(
    directory: DirectoryAppState,
    rate_limit: RateLimitState,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(directory_routes().with_state(directory))
        .layer(from_fn_with_state(rate_limit, rate_limit_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
