//! Domain models for the mock remote.
//!
//! - `catalog` — in-memory list of remote items served to clients.
//! - `churn` — background thread that keeps editing the catalog.

pub mod catalog;
pub mod churn;
