//! Search predicates and pagination.

use crate::domain::foundation::{OrganizationId, ValidationError};

use super::employee::{EmployeeRecord, EmployeeStatus, Facet};
use super::normalize::normalize;

/// Raw, un-normalized filter values as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilters {
    pub locations: Vec<String>,
    pub companies: Vec<String>,
    pub departments: Vec<String>,
    pub positions: Vec<String>,
}

impl FacetFilters {
    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Location => &self.locations,
            Facet::Company => &self.companies,
            Facet::Department => &self.departments,
            Facet::Position => &self.positions,
        }
    }
}

/// Normalized, tenant-scoped predicate set.
///
/// Facets are AND-ed together; values within one facet (and the status list)
/// are OR-ed. An empty list means the facet is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    organization_id: OrganizationId,
    locations: Vec<String>,
    companies: Vec<String>,
    departments: Vec<String>,
    positions: Vec<String>,
    statuses: Vec<EmployeeStatus>,
}

impl SearchCriteria {
    /// Builds the predicate set, normalizing every facet value.
    ///
    /// Blank values normalize to absent and are dropped; duplicates after
    /// normalization are collapsed.
    pub fn build(
        organization_id: OrganizationId,
        filters: &FacetFilters,
        statuses: &[EmployeeStatus],
    ) -> Self {
        let mut unique_statuses: Vec<EmployeeStatus> = Vec::new();
        for status in statuses {
            if !unique_statuses.contains(status) {
                unique_statuses.push(*status);
            }
        }

        Self {
            organization_id,
            locations: normalize_all(filters.values(Facet::Location)),
            companies: normalize_all(filters.values(Facet::Company)),
            departments: normalize_all(filters.values(Facet::Department)),
            positions: normalize_all(filters.values(Facet::Position)),
            statuses: unique_statuses,
        }
    }

    /// Criteria that match every record of a tenant.
    pub fn for_tenant(organization_id: OrganizationId) -> Self {
        Self::build(organization_id, &FacetFilters::default(), &[])
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Normalized accepted values for a facet; empty when unconstrained.
    pub fn facet_values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Location => &self.locations,
            Facet::Company => &self.companies,
            Facet::Department => &self.departments,
            Facet::Position => &self.positions,
        }
    }

    pub fn statuses(&self) -> &[EmployeeStatus] {
        &self.statuses
    }

    /// Facets that carry a constraint, in declaration order.
    pub fn constrained_facets(&self) -> impl Iterator<Item = Facet> + '_ {
        Facet::ALL
            .into_iter()
            .filter(move |facet| !self.facet_values(*facet).is_empty())
    }

    /// Evaluates the full predicate, tenant scope first.
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        if record.organization_id != self.organization_id {
            return false;
        }

        let facets_match = self.constrained_facets().all(|facet| {
            record
                .facet(facet)
                .search()
                .is_some_and(|search| self.facet_values(facet).iter().any(|v| v == search))
        });

        facets_match && (self.statuses.is_empty() || self.statuses.contains(&record.status))
    }
}

fn normalize_all(raw: &[String]) -> Vec<String> {
    let mut values: Vec<String> = Vec::with_capacity(raw.len());
    for value in raw.iter().filter_map(|v| normalize(v)) {
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// A validated page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    /// Validates `page >= 1` and `page_size >= 1`.
    pub fn new(page: i64, page_size: i64) -> Result<Self, ValidationError> {
        let max = i64::from(u32::MAX);
        if !(1..=max).contains(&page) {
            return Err(ValidationError::out_of_range("page", 1, max, page));
        }
        if !(1..=max).contains(&page_size) {
            return Err(ValidationError::out_of_range("page_size", 1, max, page_size));
        }
        Ok(Self {
            page: page as u32,
            page_size: page_size as u32,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records skipped before this page: `(page - 1) * page_size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
