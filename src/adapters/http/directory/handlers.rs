//! HTTP handlers for directory endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::directory::SearchEmployeesHandler;
use crate::domain::directory::DirectoryError;
use crate::domain::foundation::ValidationError;
use crate::ports::{ColumnVisibilityReader, EmployeeReader};

use super::dto::{ErrorResponse, SearchRequest};

/// Shared state for directory routes.
#[derive(Clone)]
pub struct DirectoryAppState {
    pub employee_reader: Arc<dyn EmployeeReader>,
    pub visibility_reader: Arc<dyn ColumnVisibilityReader>,
}

impl DirectoryAppState {
    pub fn new(
        employee_reader: Arc<dyn EmployeeReader>,
        visibility_reader: Arc<dyn ColumnVisibilityReader>,
    ) -> Self {
        Self {
            employee_reader,
            visibility_reader,
        }
    }

    pub fn search_handler(&self) -> SearchEmployeesHandler {
        SearchEmployeesHandler::new(self.employee_reader.clone(), self.visibility_reader.clone())
    }
}

/// POST /search - Filtered, paginated, column-projected employee search
pub async fn search_employees(
    State(state): State<DirectoryAppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DirectoryApiError> {
    let Json(request) = payload?;
    let query = request.into_query()?;

    let result = state.search_handler().handle(query).await?;

    Ok(Json(result))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts search failures to HTTP responses.
#[derive(Debug)]
pub enum DirectoryApiError {
    MalformedBody(String),
    Search(DirectoryError),
}

impl From<JsonRejection> for DirectoryApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<ValidationError> for DirectoryApiError {
    fn from(err: ValidationError) -> Self {
        Self::Search(err.into())
    }
}

impl From<DirectoryError> for DirectoryApiError {
    fn from(err: DirectoryError) -> Self {
        Self::Search(err)
    }
}

impl IntoResponse for DirectoryApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            DirectoryApiError::MalformedBody(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("INVALID_REQUEST_BODY", message),
            ),
            DirectoryApiError::Search(DirectoryError::ValidationFailed { field, message }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::with_details(
                    "VALIDATION_FAILED",
                    message,
                    serde_json::json!({ "field": field }),
                ),
            ),
            DirectoryApiError::Search(DirectoryError::StoreUnavailable(reason)) => {
                tracing::error!(%reason, "employee search failed: store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(
                        "STORE_UNAVAILABLE",
                        "Employee directory is temporarily unavailable",
                    ),
                )
            }
            DirectoryApiError::Search(err @ DirectoryError::TenantMismatch { .. }) => {
                tracing::error!(error = %err, "employee search returned a foreign record");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
