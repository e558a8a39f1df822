//! Test doubles: a connection whose individual operations can be made to
//! fail, and a clock that only moves when told to.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{
    ActivityStorage, Connection, MemoryConnection, StoreError, StoreResult, UserStorage,
    WithdrawalStorage,
};
use crate::domain::clock::Clock;
use crate::domain::models::{
    ActivityEntry, NewActivity, NewWithdrawal, UserAccount, WithdrawalRequest,
};

#[derive(Default)]
struct Faults {
    get_user: AtomicBool,
    insert_user: AtomicBool,
    update_user: AtomicBool,
    insert_activity: AtomicBool,
    list_activities: AtomicBool,
    insert_withdrawal: AtomicBool,
    update_calls: AtomicUsize,
    get_user_calls: AtomicUsize,
    slow_user: Mutex<Option<(String, std::time::Duration)>>,
}

/// Memory-backed connection with switchable per-operation failures
#[derive(Clone, Default)]
pub struct FaultyConnection {
    inner: MemoryConnection,
    faults: Arc<Faults>,
}

fn check(flag: &AtomicBool, operation: &str) -> StoreResult<()> {
    if flag.load(Ordering::SeqCst) {
        Err(StoreError::Unavailable(format!("injected failure: {}", operation)))
    } else {
        Ok(())
    }
}

impl FaultyConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &MemoryConnection {
        &self.inner
    }

    pub fn fail_get_user(&self, fail: bool) {
        self.faults.get_user.store(fail, Ordering::SeqCst);
    }

    pub fn fail_insert_user(&self, fail: bool) {
        self.faults.insert_user.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update_user(&self, fail: bool) {
        self.faults.update_user.store(fail, Ordering::SeqCst);
    }

    pub fn fail_insert_activity(&self, fail: bool) {
        self.faults.insert_activity.store(fail, Ordering::SeqCst);
    }

    pub fn fail_list_activities(&self, fail: bool) {
        self.faults.list_activities.store(fail, Ordering::SeqCst);
    }

    pub fn fail_insert_withdrawal(&self, fail: bool) {
        self.faults.insert_withdrawal.store(fail, Ordering::SeqCst);
    }

    /// Make `get_user` for one user id take `delay` before answering
    pub fn delay_get_user(&self, user_id: &str, delay: std::time::Duration) {
        *self.faults.slow_user.lock().unwrap() = Some((user_id.to_string(), delay));
    }

    pub fn get_user_calls(&self) -> usize {
        self.faults.get_user_calls.load(Ordering::SeqCst)
    }

    /// Number of successful and failed `update_user` calls
    pub fn update_calls(&self) -> usize {
        self.faults.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStorage for FaultyConnection {
    async fn get_user(&self, user_id: &str) -> StoreResult<Option<UserAccount>> {
        self.faults.get_user_calls.fetch_add(1, Ordering::SeqCst);
        check(&self.faults.get_user, "get_user")?;
        let delay = {
            let slow_user = self.faults.slow_user.lock().unwrap();
            match slow_user.as_ref() {
                Some((slow, delay)) if slow == user_id => Some(*delay),
                _ => None,
            }
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.get_user(user_id).await
    }

    async fn insert_user(&self, account: &UserAccount) -> StoreResult<()> {
        check(&self.faults.insert_user, "insert_user")?;
        self.inner.insert_user(account).await
    }

    async fn update_user(&self, account: &UserAccount) -> StoreResult<()> {
        self.faults.update_calls.fetch_add(1, Ordering::SeqCst);
        check(&self.faults.update_user, "update_user")?;
        // Yield so concurrent callers get a chance to interleave
        tokio::task::yield_now().await;
        self.inner.update_user(account).await
    }
}

#[async_trait]
impl ActivityStorage for FaultyConnection {
    async fn insert_activity(&self, activity: NewActivity) -> StoreResult<ActivityEntry> {
        check(&self.faults.insert_activity, "insert_activity")?;
        self.inner.insert_activity(activity).await
    }

    async fn list_activities(&self, user_id: &str, limit: u32) -> StoreResult<Vec<ActivityEntry>> {
        check(&self.faults.list_activities, "list_activities")?;
        self.inner.list_activities(user_id, limit).await
    }
}

#[async_trait]
impl WithdrawalStorage for FaultyConnection {
    async fn insert_withdrawal(&self, withdrawal: NewWithdrawal) -> StoreResult<WithdrawalRequest> {
        check(&self.faults.insert_withdrawal, "insert_withdrawal")?;
        self.inner.insert_withdrawal(withdrawal).await
    }

    async fn list_withdrawals(&self, user_id: &str) -> StoreResult<Vec<WithdrawalRequest>> {
        self.inner.list_withdrawals(user_id).await
    }
}

impl Connection for FaultyConnection {
    type UserRepository = FaultyConnection;
    type ActivityRepository = FaultyConnection;
    type WithdrawalRepository = FaultyConnection;

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

/// Clock pinned to a settable instant
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// 2025-01-01T12:00:00Z
    pub fn starting() -> Arc<Self> {
        Arc::new(Self::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        ))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
