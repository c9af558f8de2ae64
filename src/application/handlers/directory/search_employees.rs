//! SearchEmployeesHandler - Query handler for tenant-scoped employee search.

use std::sync::Arc;

use crate::domain::directory::{
    DirectoryError, EmployeeStatus, FacetFilters, PageRequest, SearchCriteria, SearchResult,
};
use crate::domain::foundation::OrganizationId;
use crate::ports::{ColumnVisibilityReader, EmployeeReader};

/// Query to search a tenant's employees. Values arrive validated.
#[derive(Debug, Clone)]
pub struct SearchEmployeesQuery {
    pub organization_id: OrganizationId,
    pub filters: FacetFilters,
    pub statuses: Vec<EmployeeStatus>,
    pub page: PageRequest,
}

impl SearchEmployeesQuery {
    /// Query for every employee of a tenant, first page.
    pub fn all(organization_id: OrganizationId) -> Self {
        Self {
            organization_id,
            filters: FacetFilters::default(),
            statuses: Vec::new(),
            page: PageRequest::default(),
        }
    }

    fn to_criteria(&self) -> SearchCriteria {
        SearchCriteria::build(self.organization_id, &self.filters, &self.statuses)
    }
}

/// Handler for employee search.
pub struct SearchEmployeesHandler {
    reader: Arc<dyn EmployeeReader>,
    visibility: Arc<dyn ColumnVisibilityReader>,
}

impl SearchEmployeesHandler {
    pub fn new(
        reader: Arc<dyn EmployeeReader>,
        visibility: Arc<dyn ColumnVisibilityReader>,
    ) -> Self {
        Self { reader, visibility }
    }

    /// Counts all matches, fetches the requested page and projects it onto
    /// the tenant's visible columns.
    ///
    /// Count and fetch are separate store round trips; a concurrent write
    /// between them can make `total` disagree with the page contents.
    pub async fn handle(&self, query: SearchEmployeesQuery) -> Result<SearchResult, DirectoryError> {
        let criteria = query.to_criteria();

        let total = self.reader.count(&criteria).await?;
        let records = self.reader.find_page(&criteria, &query.page).await?;

        if let Some(foreign) = records
            .iter()
            .find(|r| r.organization_id != query.organization_id)
        {
            return Err(DirectoryError::TenantMismatch {
                expected: query.organization_id,
                found: foreign.organization_id,
            });
        }

        let visibility = self.visibility.visible_columns(query.organization_id).await?;
        let results = records.iter().map(|r| visibility.project(r)).collect();

        Ok(SearchResult {
            results,
            page: query.page.page(),
            page_size: query.page.page_size(),
            total,
        })
    }
}
