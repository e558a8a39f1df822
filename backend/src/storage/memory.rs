//! # Memory Storage Module
//!
//! Process-local implementation of the storage traits. Data lives as long
//! as the connection (and its clones) do. Used for ephemeral deployments
//! and as the base of the fault-injecting test double.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use super::{
    ActivityStorage, Connection, StoreError, StoreResult, UserStorage, WithdrawalStorage,
};
use crate::domain::models::{
    ActivityEntry, NewActivity, NewWithdrawal, UserAccount, WithdrawalRequest,
};

#[derive(Default)]
struct MemoryState {
    users: HashMap<String, UserAccount>,
    /// Insertion order doubles as the tie-breaker for equal timestamps
    activities: Vec<ActivityEntry>,
    withdrawals: Vec<WithdrawalRequest>,
}

#[derive(Clone, Default)]
pub struct MemoryConnection {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserStorage for MemoryConnection {
    async fn get_user(&self, user_id: &str) -> StoreResult<Option<UserAccount>> {
        Ok(self.lock()?.users.get(user_id).cloned())
    }

    async fn insert_user(&self, account: &UserAccount) -> StoreResult<()> {
        let mut state = self.lock()?;
        if state.users.contains_key(&account.id) {
            return Err(StoreError::Unavailable(format!(
                "user {} already exists",
                account.id
            )));
        }
        state.users.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn update_user(&self, account: &UserAccount) -> StoreResult<()> {
        let mut state = self.lock()?;
        match state.users.get_mut(&account.id) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(StoreError::Unavailable(format!(
                "user {} does not exist",
                account.id
            ))),
        }
    }
}

#[async_trait]
impl ActivityStorage for MemoryConnection {
    async fn insert_activity(&self, activity: NewActivity) -> StoreResult<ActivityEntry> {
        let entry = ActivityEntry::from_new(Uuid::new_v4().to_string(), activity);
        self.lock()?.activities.push(entry.clone());
        Ok(entry)
    }

    async fn list_activities(&self, user_id: &str, limit: u32) -> StoreResult<Vec<ActivityEntry>> {
        let state = self.lock()?;
        let mut entries: Vec<ActivityEntry> = state
            .activities
            .iter()
            .rev()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort keeps newer insertions first among equal timestamps
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

#[async_trait]
impl WithdrawalStorage for MemoryConnection {
    async fn insert_withdrawal(&self, withdrawal: NewWithdrawal) -> StoreResult<WithdrawalRequest> {
        let request = WithdrawalRequest::from_new(Uuid::new_v4().to_string(), withdrawal);
        self.lock()?.withdrawals.push(request.clone());
        Ok(request)
    }

    async fn list_withdrawals(&self, user_id: &str) -> StoreResult<Vec<WithdrawalRequest>> {
        let state = self.lock()?;
        let mut requests: Vec<WithdrawalRequest> = state
            .withdrawals
            .iter()
            .rev()
            .filter(|request| request.user_id == user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }
}

impl Connection for MemoryConnection {
    type UserRepository = MemoryConnection;
    type ActivityRepository = MemoryConnection;
    type WithdrawalRepository = MemoryConnection;

    fn create_user_repository(&self) -> Self::UserRepository {
        self.clone()
    }

    fn create_activity_repository(&self) -> Self::ActivityRepository {
        self.clone()
    }

    fn create_withdrawal_repository(&self) -> Self::WithdrawalRepository {
        self.clone()
    }
}
