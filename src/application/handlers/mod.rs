//! Application handlers.
//!
//! Query handlers that orchestrate domain rules over the ports.

pub mod directory;

pub use directory::{SearchEmployeesHandler, SearchEmployeesQuery};
