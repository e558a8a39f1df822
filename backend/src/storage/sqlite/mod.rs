//! # SQLite Storage Module
//!
//! sqlx-backed implementation of the storage traits. One table per
//! collection; timestamps are stored as fixed-width RFC 3339 text so that
//! lexical order equals chronological order.

pub mod activity_repository;
pub mod connection;
pub mod user_repository;
pub mod withdrawal_repository;

pub use activity_repository::ActivityRepository;
pub use connection::DbConnection;
pub use user_repository::UserRepository;
pub use withdrawal_repository::WithdrawalRepository;

use chrono::{DateTime, SecondsFormat, Utc};

use super::{StoreError, StoreResult};

pub(crate) fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| StoreError::Malformed(format!("invalid timestamp {:?}: {}", value, e)))
}
