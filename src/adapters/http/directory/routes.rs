//! Axum router configuration for directory endpoints.

use axum::{routing::post, Router};

use super::handlers::{search_employees, DirectoryAppState};

/// Directory routes.
///
/// # Routes
/// - `POST /search` - Search a tenant's employees
pub fn directory_routes() -> Router<DirectoryAppState> {
    Router::new().route("/search", post(search_employees))
}
