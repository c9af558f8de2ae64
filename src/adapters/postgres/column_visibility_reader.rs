//! PostgreSQL implementation of ColumnVisibilityReader.

use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;

use crate::domain::directory::ColumnVisibility;
use crate::domain::foundation::{DomainError, ErrorCode, OrganizationId};
use crate::ports::ColumnVisibilityReader;

/// Reads a tenant's allow-list from `column_configs`, one row per visible
/// column, in row insertion order.
#[derive(Clone)]
pub struct PostgresColumnVisibilityReader {
    pool: PgPool,
    query_timeout: Duration,
}

impl std::fmt::Debug for PostgresColumnVisibilityReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresColumnVisibilityReader")
            .field("pool", &"PgPool")
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

impl PostgresColumnVisibilityReader {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl ColumnVisibilityReader for PostgresColumnVisibilityReader {
    async fn visible_columns(
        &self,
        organization_id: OrganizationId,
    ) -> Result<ColumnVisibility, DomainError> {
        let query = sqlx::query_scalar::<_, String>(
            r#"
            SELECT column_name
            FROM column_configs
            WHERE organization_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(organization_id.as_i64())
        .fetch_all(&self.pool);

        let names = tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| {
                tracing::error!(%organization_id, "column config query timed out");
                DomainError::new(ErrorCode::Timeout, "Timed out loading column configuration")
            })?
            .map_err(|e| {
                tracing::error!(error = %e, %organization_id, "column config query failed");
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to load column configuration: {}", e),
                )
            })?;

        let (visibility, unknown) = ColumnVisibility::from_names(names.iter().map(String::as_str));
        if !unknown.is_empty() {
            tracing::warn!(
                %organization_id,
                columns = ?unknown,
                "ignoring unknown columns in column configuration"
            );
        }

        Ok(visibility)
    }
}
