//! HTTP DTOs for the directory search endpoint.
//!
//! Requests are validated here; the search handler only ever sees typed,
//! in-range values.

use serde::{Deserialize, Serialize};

use crate::application::handlers::directory::SearchEmployeesQuery;
use crate::domain::directory::{EmployeeStatus, FacetFilters, PageRequest};
use crate::domain::foundation::{OrganizationId, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub organization_id: i64,
    pub locations: Option<Vec<String>>,
    pub companies: Option<Vec<String>>,
    pub departments: Option<Vec<String>>,
    pub positions: Option<Vec<String>>,
    pub statuses: Option<Vec<String>>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl SearchRequest {
    /// Validates status literals and pagination and builds the query.
    pub fn into_query(self) -> Result<SearchEmployeesQuery, ValidationError> {
        let statuses = self
            .statuses
            .unwrap_or_default()
            .iter()
            .map(|raw| raw.parse::<EmployeeStatus>())
            .collect::<Result<Vec<_>, _>>()?;

        let page = PageRequest::new(
            self.page.unwrap_or(i64::from(PageRequest::DEFAULT_PAGE)),
            self.page_size
                .unwrap_or(i64::from(PageRequest::DEFAULT_PAGE_SIZE)),
        )?;

        Ok(SearchEmployeesQuery {
            organization_id: OrganizationId::new(self.organization_id),
            filters: FacetFilters {
                locations: self.locations.unwrap_or_default(),
                companies: self.companies.unwrap_or_default(),
                departments: self.departments.unwrap_or_default(),
                positions: self.positions.unwrap_or_default(),
            },
            statuses,
            page,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Error body for every non-throttle failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> SearchRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let query = request(json!({ "organization_id": 1 })).into_query().unwrap();
        assert_eq!(query.organization_id, OrganizationId::new(1));
        assert_eq!(query.filters, FacetFilters::default());
        assert!(query.statuses.is_empty());
        assert_eq!(query.page.page(), 1);
        assert_eq!(query.page.page_size(), 50);
    }

    #[test]
    fn null_lists_are_treated_as_absent() {
        let query = request(json!({ "organization_id": 1, "locations": null }))
            .into_query()
            .unwrap();
        assert!(query.filters.locations.is_empty());
    }

    #[test]
    fn facet_values_pass_through_raw() {
        let query = request(json!({
            "organization_id": 1,
            "locations": ["Hà Nội", "tokyo"],
            "positions": ["Engineer"],
            "statuses": ["ACTIVE", "INACTIVE"],
        }))
        .into_query()
        .unwrap();
        assert_eq!(query.filters.locations, vec!["Hà Nội", "tokyo"]);
        assert_eq!(query.filters.positions, vec!["Engineer"]);
        assert_eq!(
            query.statuses,
            vec![EmployeeStatus::Active, EmployeeStatus::Inactive]
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = request(json!({ "organization_id": 1, "statuses": ["RETIRED"] }))
            .into_query()
            .unwrap_err();
        assert_eq!(err.field(), "statuses");
    }

    #[test]
    fn lowercase_status_is_rejected() {
        assert!(request(json!({ "organization_id": 1, "statuses": ["active"] }))
            .into_query()
            .is_err());
    }

    #[test]
    fn non_positive_pagination_is_rejected() {
        let zero_page = request(json!({ "organization_id": 1, "page": 0 }))
            .into_query()
            .unwrap_err();
        assert_eq!(zero_page.field(), "page");

        let negative_size = request(json!({ "organization_id": 1, "page_size": -3 }))
            .into_query()
            .unwrap_err();
        assert_eq!(negative_size.field(), "page_size");
    }

    #[test]
    fn error_response_omits_empty_details() {
        let body = serde_json::to_value(ErrorResponse::new("VALIDATION_FAILED", "bad")).unwrap();
        assert_eq!(body, json!({ "code": "VALIDATION_FAILED", "message": "bad" }));
    }
}
