//! Ports - interfaces to the external collaborators.
//!
//! - `CounterStore` / `RateLimiter` - shared throttle counters
//! - `EmployeeReader` - tenant-scoped record store
//! - `ColumnVisibilityReader` - per-tenant projection allow-lists

mod column_visibility_reader;
mod counter_store;
mod employee_reader;
mod rate_limiter;

pub use column_visibility_reader::ColumnVisibilityReader;
pub use counter_store::{CounterReading, CounterStore, CounterStoreError};
pub use employee_reader::EmployeeReader;
pub use rate_limiter::{
    ClientKey, RateLimitDecision, RateLimitDenied, RateLimitError, RateLimitStatus, RateLimiter,
};
