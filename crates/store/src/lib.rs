//! In-memory, company-scoped storage for tests, fixtures, and embedding.
//!
//! Stands in for the platform's entity store: keyed record access plus the
//! derived-field recomputation a dependency change triggers. Real
//! persistence, transactions, and isolation stay the platform's concern.

pub mod company_store;
pub mod database;

pub use company_store::{CompanyStore, InMemoryCompanyStore};
pub use database::{InMemoryDatabase, LogEntry};

#[cfg(test)]
mod integration_tests;
