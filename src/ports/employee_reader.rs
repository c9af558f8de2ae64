//! Employee reader port (read side).
//!
//! Tenant-scoped, read-only access to employee records with equality and
//! membership filtering over the search forms.

use async_trait::async_trait;

use crate::domain::directory::{EmployeeRecord, PageRequest, SearchCriteria};
use crate::domain::foundation::DomainError;

/// Reader port for employee records.
///
/// Implementations must always apply `criteria.organization_id()` and must
/// order results by employee id ascending so pages are stable across calls.
#[async_trait]
pub trait EmployeeReader: Send + Sync {
    /// Counts every record matching the criteria, ignoring pagination.
    async fn count(&self, criteria: &SearchCriteria) -> Result<u64, DomainError>;

    /// Fetches one page of matching records.
    async fn find_page(
        &self,
        criteria: &SearchCriteria,
        page: &PageRequest,
    ) -> Result<Vec<EmployeeRecord>, DomainError>;
}
