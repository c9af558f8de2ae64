//! Domain layer - types and rules with no I/O.

pub mod directory;
pub mod foundation;
