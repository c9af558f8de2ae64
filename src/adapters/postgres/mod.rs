//! PostgreSQL adapters - database implementations of the directory ports.
//!
//! - `PostgresEmployeeReader` - tenant-scoped filtered, paginated employee reads
//! - `PostgresColumnVisibilityReader` - per-tenant column allow-lists

mod column_visibility_reader;
mod employee_reader;

pub use column_visibility_reader::PostgresColumnVisibilityReader;
pub use employee_reader::PostgresEmployeeReader;
