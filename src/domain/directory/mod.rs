//! Directory module - employee records, search predicates and projection.
//!
//! Pure rules only; store access lives behind the ports.

mod criteria;
mod employee;
mod errors;
mod normalize;
mod result;
mod visibility;

pub use criteria::{FacetFilters, PageRequest, SearchCriteria};
pub use employee::{EmployeeRecord, EmployeeStatus, Facet, FacetValue};
pub use errors::DirectoryError;
pub use normalize::normalize;
pub use result::SearchResult;
pub use visibility::{ColumnVisibility, EmployeeField, FieldValue, ProjectedEmployee};
