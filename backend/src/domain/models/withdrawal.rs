//! Domain model for withdrawal requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl WithdrawalStatus {
    /// Convert to string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Approved => "approved",
            WithdrawalStatus::Rejected => "rejected",
        }
    }

    /// Parse from string for storage loading
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(WithdrawalStatus::Pending),
            "approved" => Ok(WithdrawalStatus::Approved),
            "rejected" => Ok(WithdrawalStatus::Rejected),
            _ => Err(format!("Invalid withdrawal status: {}", s)),
        }
    }
}

/// A withdrawal request before the store has assigned it an id.
///
/// The ledger only ever creates `Pending` requests; approval happens
/// outside this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWithdrawal {
    pub user_id: String,
    /// Denormalized at creation time
    pub user_name: String,
    pub amount: i64,
    pub status: WithdrawalStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub amount: i64,
    pub status: WithdrawalStatus,
    pub created_at: DateTime<Utc>,
}

impl WithdrawalRequest {
    pub fn from_new(id: String, withdrawal: NewWithdrawal) -> Self {
        Self {
            id,
            user_id: withdrawal.user_id,
            user_name: withdrawal.user_name,
            amount: withdrawal.amount,
            status: withdrawal.status,
            created_at: withdrawal.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            WithdrawalStatus::Pending,
            WithdrawalStatus::Approved,
            WithdrawalStatus::Rejected,
        ] {
            assert_eq!(WithdrawalStatus::from_string(status.as_str()).unwrap(), status);
        }
        assert_eq!(WithdrawalStatus::from_string("PENDING").unwrap(), WithdrawalStatus::Pending);
        assert!(WithdrawalStatus::from_string("paid").is_err());
    }
}
