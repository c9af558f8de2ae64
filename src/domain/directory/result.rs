//! Search output.

use serde::Serialize;

use super::visibility::ProjectedEmployee;

/// One page of projected matches plus the pre-pagination match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub results: Vec<ProjectedEmployee>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}
