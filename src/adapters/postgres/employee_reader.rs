//! PostgreSQL implementation of EmployeeReader.
//!
//! Facet predicates compare the precomputed `*_search` columns with
//! `= ANY($n)`, so matching is exact over normalized forms and can use the
//! per-tenant indexes created in `migrations/`.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::future::Future;
use std::time::Duration;

use crate::domain::directory::{
    EmployeeRecord, EmployeeStatus, Facet, FacetValue, PageRequest, SearchCriteria,
};
use crate::domain::foundation::{DomainError, EmployeeId, ErrorCode, OrganizationId};
use crate::ports::EmployeeReader;

const SELECT_COLUMNS: &str = "SELECT id, organization_id, first_name, last_name, contact_info, \
     location, location_search, company, company_search, department, department_search, \
     position, position_search, status FROM employees";

/// PostgreSQL implementation of the EmployeeReader port.
#[derive(Clone)]
pub struct PostgresEmployeeReader {
    pool: PgPool,
    query_timeout: Duration,
}

impl std::fmt::Debug for PostgresEmployeeReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresEmployeeReader")
            .field("pool", &"PgPool")
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

impl PostgresEmployeeReader {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &str, query: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(|e| {
                tracing::error!(error = %e, operation, "employee query failed");
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to {}: {}", operation, e),
                )
                .with_detail("operation", operation)
            }),
            Err(_) => {
                tracing::error!(operation, timeout = ?self.query_timeout, "employee query timed out");
                Err(DomainError::new(
                    ErrorCode::Timeout,
                    format!("Timed out trying to {}", operation),
                )
                .with_detail("operation", operation))
            }
        }
    }
}

/// Appends the tenant, facet and status predicates.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, criteria: &SearchCriteria) {
    builder.push(" WHERE organization_id = ");
    builder.push_bind(criteria.organization_id().as_i64());

    for facet in criteria.constrained_facets() {
        builder.push(" AND ");
        builder.push(facet.search_column());
        builder.push(" = ANY(");
        builder.push_bind(criteria.facet_values(facet).to_vec());
        builder.push(")");
    }

    if !criteria.statuses().is_empty() {
        let statuses: Vec<String> = criteria
            .statuses()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        builder.push(" AND status = ANY(");
        builder.push_bind(statuses);
        builder.push(")");
    }
}

fn count_query(criteria: &SearchCriteria) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM employees");
    push_filters(&mut builder, criteria);
    builder
}

fn page_query(criteria: &SearchCriteria, page: &PageRequest) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_COLUMNS);
    push_filters(&mut builder, criteria);
    builder.push(" ORDER BY id ASC LIMIT ");
    builder.push_bind(i64::from(page.page_size()));
    builder.push(" OFFSET ");
    builder.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
    builder
}

#[async_trait]
impl EmployeeReader for PostgresEmployeeReader {
    async fn count(&self, criteria: &SearchCriteria) -> Result<u64, DomainError> {
        let mut builder = count_query(criteria);
        let (total,): (i64,) = self
            .bounded(
                "count employees",
                builder.build_query_as::<(i64,)>().fetch_one(&self.pool),
            )
            .await?;

        Ok(total.max(0) as u64)
    }

    async fn find_page(
        &self,
        criteria: &SearchCriteria,
        page: &PageRequest,
    ) -> Result<Vec<EmployeeRecord>, DomainError> {
        let mut builder = page_query(criteria, page);
        let rows: Vec<EmployeeRow> = self
            .bounded(
                "fetch employees",
                builder.build_query_as::<EmployeeRow>().fetch_all(&self.pool),
            )
            .await?;

        rows.into_iter().map(EmployeeRow::into_record).collect()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    organization_id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    contact_info: Option<String>,
    location: Option<String>,
    location_search: Option<String>,
    company: Option<String>,
    company_search: Option<String>,
    department: Option<String>,
    department_search: Option<String>,
    position: Option<String>,
    position_search: Option<String>,
    status: String,
}

impl EmployeeRow {
    fn stored_search(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Location => self.location_search.as_deref(),
            Facet::Company => self.company_search.as_deref(),
            Facet::Department => self.department_search.as_deref(),
            Facet::Position => self.position_search.as_deref(),
        }
    }

    /// Search columns whose stored value disagrees with the form derived
    /// from the display value. The loader owns these columns; a mismatch
    /// means filtering and the returned record see different values.
    fn diverging_search_columns(&self, record: &EmployeeRecord) -> Vec<&'static str> {
        Facet::ALL
            .into_iter()
            .filter(|facet| self.stored_search(*facet) != record.facet(*facet).search())
            .map(|facet| facet.search_column())
            .collect()
    }

    /// Search forms are recomputed from the display values rather than
    /// trusting the stored `*_search` columns.
    fn into_record(self) -> Result<EmployeeRecord, DomainError> {
        let status: EmployeeStatus = self.status.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Employee {} has unknown status '{}'", self.id, self.status),
            )
            .with_detail("employee_id", self.id.to_string())
        })?;

        let mut record =
            EmployeeRecord::new(EmployeeId::new(self.id), OrganizationId::new(self.organization_id))
                .with_status(status);
        record.first_name = self.first_name.clone();
        record.last_name = self.last_name.clone();
        record.contact_info = self.contact_info.clone();
        record.location = FacetValue::new(self.location.clone());
        record.company = FacetValue::new(self.company.clone());
        record.department = FacetValue::new(self.department.clone());
        record.position = FacetValue::new(self.position.clone());

        let diverging = self.diverging_search_columns(&record);
        if !diverging.is_empty() {
            tracing::debug!(
                employee_id = self.id,
                columns = ?diverging,
                "stored search forms differ from display values"
            );
        }

        Ok(record)
    }
}
