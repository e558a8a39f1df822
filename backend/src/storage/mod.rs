//! # Storage Module
//!
//! Persistence for the three record collections the ledger depends on:
//! users, activities and withdrawals.
//!
//! The domain layer only sees the traits in [`traits`]; concrete backends
//! are a SQLite database (via sqlx) and an in-process memory store.
//! Every storage failure is reported as a [`StoreError`], which the ledger
//! folds into a single "store unavailable" category.

pub mod memory;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use memory::MemoryConnection;
pub use sqlite::DbConnection;
pub use traits::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Connectivity, permission or backend failure
    #[error("{0}")]
    Unavailable(String),
    /// A stored record could not be decoded
    #[error("malformed record: {0}")]
    Malformed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}
