//! Domain model for a user's reward account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::task::TaskKind;

/// A user's reward account as mirrored from storage.
///
/// Balance never goes below zero after a committed operation; the ledger
/// is the only code path that mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Platform-assigned stable id (primary key)
    pub id: String,
    pub name: String,
    pub balance: i64,
    pub tasks_completed: u64,
    pub last_task_completion_time: HashMap<TaskKind, DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Zero-state account for a user seen for the first time
    pub fn new(id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance: 0,
            tasks_completed: 0,
            last_task_completion_time: HashMap::new(),
            created_at: now,
        }
    }

    pub fn last_completion(&self, kind: TaskKind) -> Option<DateTime<Utc>> {
        self.last_task_completion_time.get(&kind).copied()
    }

    /// Account state after completing `kind` at `now`. Does not touch `self`.
    /// `None` if the balance or counter would overflow.
    pub fn with_completion(&self, kind: TaskKind, now: DateTime<Utc>) -> Option<Self> {
        let mut next = self.clone();
        next.balance = self.balance.checked_add(kind.reward())?;
        next.tasks_completed = self.tasks_completed.checked_add(1)?;
        next.last_task_completion_time.insert(kind, now);
        Some(next)
    }

    /// Account state after withdrawing `amount`. Callers check the balance
    /// first; `None` on underflow.
    pub fn with_debit(&self, amount: i64) -> Option<Self> {
        let mut next = self.clone();
        next.balance = self.balance.checked_sub(amount)?;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, minute, 0).unwrap()
    }

    #[test]
    fn test_new_account_is_zeroed() {
        let account = UserAccount::new("42", "Ada", at(0));
        assert_eq!(account.balance, 0);
        assert_eq!(account.tasks_completed, 0);
        assert!(account.last_task_completion_time.is_empty());
        assert_eq!(account.last_completion(TaskKind::Quick), None);
    }

    #[test]
    fn test_with_completion_leaves_original_untouched() {
        let account = UserAccount::new("42", "Ada", at(0));
        let next = account.with_completion(TaskKind::Daily, at(5)).unwrap();

        assert_eq!(account.balance, 0);
        assert_eq!(next.balance, 50);
        assert_eq!(next.tasks_completed, 1);
        assert_eq!(next.last_completion(TaskKind::Daily), Some(at(5)));
        assert_eq!(next.last_completion(TaskKind::Quick), None);
    }

    #[test]
    fn test_with_debit() {
        let account = UserAccount::new("42", "Ada", at(0))
            .with_completion(TaskKind::Quick, at(1))
            .unwrap();
        let next = account.with_debit(4).unwrap();
        assert_eq!(next.balance, 6);
        assert_eq!(next.tasks_completed, 1);
    }

    #[test]
    fn test_arithmetic_overflow_yields_none() {
        let mut account = UserAccount::new("42", "Ada", at(0));
        account.balance = i64::MAX - 5;
        assert!(account.with_completion(TaskKind::Quick, at(1)).is_none());

        account.balance = i64::MIN + 1;
        assert!(account.with_debit(2).is_none());

        let mut account = UserAccount::new("42", "Ada", at(0));
        account.tasks_completed = u64::MAX;
        assert!(account.with_completion(TaskKind::Quick, at(1)).is_none());
    }
}
