//! Service layer for the portfolio catalog.
//! - Separates the query/paginate pipeline from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Provides clear error types and the JSON views served over HTTP.

pub mod errors;
pub mod pagination;
pub mod catalog;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
