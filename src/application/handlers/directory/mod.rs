//! Directory query handlers.

mod search_employees;

pub use search_employees::{SearchEmployeesHandler, SearchEmployeesQuery};
