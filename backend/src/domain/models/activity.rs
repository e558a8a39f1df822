//! Domain model for activity history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used for the history line of every withdrawal
pub const WITHDRAWAL_LABEL: &str = "Withdrawal Request";

/// An activity entry before the store has assigned it an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub user_id: String,
    pub label: String,
    /// Positive for earnings, negative for withdrawals
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// One immutable, append-only line of a user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Opaque id assigned by the store
    pub id: String,
    pub user_id: String,
    pub label: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn from_new(id: String, activity: NewActivity) -> Self {
        Self {
            id,
            user_id: activity.user_id,
            label: activity.label,
            amount: activity.amount,
            created_at: activity.created_at,
        }
    }

    pub fn is_earning(&self) -> bool {
        self.amount > 0
    }
}
