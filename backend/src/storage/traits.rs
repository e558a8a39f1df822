//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Each operation is atomic at the single-record level. No trait exposes a
//! read-modify-write: the ledger owns the read, decides the new state and
//! writes the whole record back.

use async_trait::async_trait;

use super::StoreResult;
use crate::domain::models::{
    ActivityEntry, NewActivity, NewWithdrawal, UserAccount, WithdrawalRequest,
};

/// Trait defining the interface for the `users` collection
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Fetch a user record by its platform id
    async fn get_user(&self, user_id: &str) -> StoreResult<Option<UserAccount>>;

    /// Insert a new user record
    async fn insert_user(&self, account: &UserAccount) -> StoreResult<()>;

    /// Overwrite balance, task counter and completion times of an existing user
    async fn update_user(&self, account: &UserAccount) -> StoreResult<()>;
}

/// Trait defining the interface for the append-only `activities` collection
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Append an entry; the store assigns its id
    async fn insert_activity(&self, activity: NewActivity) -> StoreResult<ActivityEntry>;

    /// Most recent entries for a user, ordered by creation time descending
    async fn list_activities(&self, user_id: &str, limit: u32) -> StoreResult<Vec<ActivityEntry>>;
}

/// Trait defining the interface for the `withdrawals` collection
#[async_trait]
pub trait WithdrawalStorage: Send + Sync {
    /// Insert a withdrawal request; the store assigns its id
    async fn insert_withdrawal(&self, withdrawal: NewWithdrawal) -> StoreResult<WithdrawalRequest>;

    /// All withdrawal requests for a user, newest first
    async fn list_withdrawals(&self, user_id: &str) -> StoreResult<Vec<WithdrawalRequest>>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (database, memory,
/// test double) and provides factory methods for creating repositories.
pub trait Connection: Send + Sync + Clone + 'static {
    type UserRepository: UserStorage + 'static;
    type ActivityRepository: ActivityStorage + 'static;
    type WithdrawalRepository: WithdrawalStorage + 'static;

    fn create_user_repository(&self) -> Self::UserRepository;

    fn create_activity_repository(&self) -> Self::ActivityRepository;

    fn create_withdrawal_repository(&self) -> Self::WithdrawalRepository;
}
