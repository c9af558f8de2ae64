//! HTTP adapter for employee directory search.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, SearchRequest};
pub use handlers::{search_employees, DirectoryApiError, DirectoryAppState};
pub use routes::directory_routes;
