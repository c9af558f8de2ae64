//! Column visibility port.
//!
//! Per-tenant allow-list of fields a search response may contain.
//! Administered elsewhere; read-only here.

use async_trait::async_trait;

use crate::domain::directory::ColumnVisibility;
use crate::domain::foundation::{DomainError, OrganizationId};

#[async_trait]
pub trait ColumnVisibilityReader: Send + Sync {
    /// Returns the tenant's ordered allow-list. A tenant with no
    /// configuration gets an empty list.
    async fn visible_columns(
        &self,
        organization_id: OrganizationId,
    ) -> Result<ColumnVisibility, DomainError>;
}
