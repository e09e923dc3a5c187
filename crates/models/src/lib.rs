//! SeaORM entities for the portfolio catalog plus the create helpers used
//! to seed them. Rows are only ever written here; the HTTP surface is
//! read-only.

pub mod errors;
pub mod db;
pub mod category;
pub mod service;
pub mod portfolio_item;

#[cfg(test)]
mod tests;
