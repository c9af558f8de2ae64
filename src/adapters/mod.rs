//! Adapters - Implementations of port interfaces.
//!
//! - `directory` - in-memory employee directory
//! - `http` - axum routes and middleware
//! - `postgres` - PostgreSQL directory readers
//! - `rate_limiter` - fixed-window limiter and its counter stores

pub mod directory;
pub mod http;
pub mod postgres;
pub mod rate_limiter;

pub use directory::InMemoryEmployeeDirectory;
pub use postgres::{PostgresColumnVisibilityReader, PostgresEmployeeReader};
pub use rate_limiter::{FixedWindowRateLimiter, InMemoryCounterStore, RedisCounterStore};
