//! Directory search error types.

use crate::domain::foundation::{DomainError, OrganizationId, ValidationError};

/// Errors surfaced by employee search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Query input rejected before any store access.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Record or visibility store could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A store returned a record owned by another tenant.
    #[error("Record of organization {found} returned for organization {expected}")]
    TenantMismatch {
        expected: OrganizationId,
        found: OrganizationId,
    },
}

impl DirectoryError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DirectoryError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        DirectoryError::StoreUnavailable(message.into())
    }
}

impl From<ValidationError> for DirectoryError {
    fn from(err: ValidationError) -> Self {
        DirectoryError::validation(err.field().to_string(), err.to_string())
    }
}

/// Store ports only report infrastructure failures.
impl From<DomainError> for DirectoryError {
    fn from(err: DomainError) -> Self {
        DirectoryError::store_unavailable(err.to_string())
    }
}
