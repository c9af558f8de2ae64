//! Employee records and their faceted attributes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{EmployeeId, OrganizationId, ValidationError};

use super::normalize::normalize;

/// Lifecycle status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
    Terminated,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [
        EmployeeStatus::Active,
        EmployeeStatus::Inactive,
        EmployeeStatus::Terminated,
    ];

    /// Returns the stored / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "ACTIVE",
            EmployeeStatus::Inactive => "INACTIVE",
            EmployeeStatus::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = ValidationError;

    /// Parses the exact upper-case literal; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmployeeStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "statuses",
                    format!("'{}' is not one of ACTIVE, INACTIVE, TERMINATED", s),
                )
            })
    }
}

/// The four filterable employee attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Location,
    Company,
    Department,
    Position,
}

impl Facet {
    pub const ALL: [Facet; 4] = [
        Facet::Location,
        Facet::Company,
        Facet::Department,
        Facet::Position,
    ];

    /// Column holding the display form.
    pub fn display_column(&self) -> &'static str {
        match self {
            Facet::Location => "location",
            Facet::Company => "company",
            Facet::Department => "department",
            Facet::Position => "position",
        }
    }

    /// Column holding the normalized search form.
    pub fn search_column(&self) -> &'static str {
        match self {
            Facet::Location => "location_search",
            Facet::Company => "company_search",
            Facet::Department => "department_search",
            Facet::Position => "position_search",
        }
    }
}

/// A facet value in both display and search form.
///
/// Only constructible from the display form, so the search form can never
/// drift from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacetValue {
    display: Option<String>,
    search: Option<String>,
}

impl FacetValue {
    pub fn new(display: Option<String>) -> Self {
        let search = display.as_deref().and_then(normalize);
        Self { display, search }
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

impl From<&str> for FacetValue {
    fn from(display: &str) -> Self {
        FacetValue::new(Some(display.to_string()))
    }
}

/// A tenant-scoped employee entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub organization_id: OrganizationId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_info: Option<String>,
    pub location: FacetValue,
    pub company: FacetValue,
    pub department: FacetValue,
    pub position: FacetValue,
    pub status: EmployeeStatus,
}

impl EmployeeRecord {
    /// Creates an active record with no names, contact or facets set.
    pub fn new(id: EmployeeId, organization_id: OrganizationId) -> Self {
        Self {
            id,
            organization_id,
            first_name: None,
            last_name: None,
            contact_info: None,
            location: FacetValue::default(),
            company: FacetValue::default(),
            department: FacetValue::default(),
            position: FacetValue::default(),
            status: EmployeeStatus::default(),
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_contact_info(mut self, contact: impl Into<String>) -> Self {
        self.contact_info = Some(contact.into());
        self
    }

    pub fn with_facet(mut self, facet: Facet, display: impl Into<String>) -> Self {
        *self.facet_mut(facet) = FacetValue::new(Some(display.into()));
        self
    }

    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn facet(&self, facet: Facet) -> &FacetValue {
        match facet {
            Facet::Location => &self.location,
            Facet::Company => &self.company,
            Facet::Department => &self.department,
            Facet::Position => &self.position,
        }
    }

    fn facet_mut(&mut self, facet: Facet) -> &mut FacetValue {
        match facet {
            Facet::Location => &mut self.location,
            Facet::Company => &mut self.company,
            Facet::Department => &mut self.department,
            Facet::Position => &mut self.position,
        }
    }
}
