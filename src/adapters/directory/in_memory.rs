//! In-memory employee directory for tests and local development.
//!
//! Implements both directory ports over the same shared state, using the
//! domain's own predicate evaluation so results agree with the Postgres
//! adapter for the same data.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::directory::{ColumnVisibility, EmployeeRecord, PageRequest, SearchCriteria};
use crate::domain::foundation::{DomainError, EmployeeId, ErrorCode, OrganizationId};
use crate::ports::{ColumnVisibilityReader, EmployeeReader};

#[derive(Debug, Default)]
struct DirectoryState {
    // Keyed by id so iteration is already in ascending id order.
    employees: BTreeMap<EmployeeId, EmployeeRecord>,
    visibility: HashMap<OrganizationId, ColumnVisibility>,
}

/// In-memory implementation of `EmployeeReader` and `ColumnVisibilityReader`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeDirectory {
    state: Arc<RwLock<DirectoryState>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryEmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record by id.
    pub async fn insert(&self, record: EmployeeRecord) {
        let mut state = self.state.write().await;
        state.employees.insert(record.id, record);
    }

    pub async fn insert_all(&self, records: impl IntoIterator<Item = EmployeeRecord>) {
        let mut state = self.state.write().await;
        for record in records {
            state.employees.insert(record.id, record);
        }
    }

    pub async fn set_visible_columns(
        &self,
        organization_id: OrganizationId,
        visibility: ColumnVisibility,
    ) {
        let mut state = self.state.write().await;
        state.visibility.insert(organization_id, visibility);
    }

    /// Makes every subsequent read fail as if the store were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "In-memory directory marked unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeReader for InMemoryEmployeeDirectory {
    async fn count(&self, criteria: &SearchCriteria) -> Result<u64, DomainError> {
        self.ensure_available()?;
        let state = self.state.read().await;
        Ok(state
            .employees
            .values()
            .filter(|record| criteria.matches(record))
            .count() as u64)
    }

    async fn find_page(
        &self,
        criteria: &SearchCriteria,
        page: &PageRequest,
    ) -> Result<Vec<EmployeeRecord>, DomainError> {
        self.ensure_available()?;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let state = self.state.read().await;
        Ok(state
            .employees
            .values()
            .filter(|record| criteria.matches(record))
            .skip(skip)
            .take(page.page_size() as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ColumnVisibilityReader for InMemoryEmployeeDirectory {
    async fn visible_columns(
        &self,
        organization_id: OrganizationId,
    ) -> Result<ColumnVisibility, DomainError> {
        self.ensure_available()?;
        let state = self.state.read().await;
        Ok(state
            .visibility
            .get(&organization_id)
            .cloned()
            .unwrap_or_default())
    }
}
