//! Rate limiter adapters.
//!
//! ## Available Adapters
//!
//! - `FixedWindowRateLimiter` - the `RateLimiter` port over any counter store
//! - `RedisCounterStore` - Redis-backed counters for multi-instance deployments
//! - `InMemoryCounterStore` - process-local counters for tests and development
//!
//! ## Usage
//!
//! ```ignore
//! use employee_directory::adapters::rate_limiter::{
//!     FixedWindowRateLimiter, RedisCounterStore,
//! };
//!
//! let store = RedisCounterStore::connect(&config.redis).await?;
//! let limiter = FixedWindowRateLimiter::from_config(Arc::new(store), &config.rate_limit);
//! ```

mod fixed_window;
mod in_memory;
mod redis;

pub use fixed_window::FixedWindowRateLimiter;
pub use in_memory::InMemoryCounterStore;
pub use redis::RedisCounterStore;
