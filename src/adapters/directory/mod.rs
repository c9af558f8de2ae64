//! Directory adapters that live outside any database.
//!
//! - `InMemoryEmployeeDirectory` - both directory read ports over shared in-process state

mod in_memory;

pub use in_memory::InMemoryEmployeeDirectory;
