//! Shared building blocks for the catalog crates: wire types, logging setup
//! and runtime environment checks.

pub mod types;
pub mod utils;
pub mod env;
