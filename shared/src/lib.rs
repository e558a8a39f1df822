use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Snapshot of a user's reward account as rendered by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDto {
    /// Platform-assigned stable user id
    pub id: String,
    pub name: String,
    /// Spendable balance in whole reward units
    pub balance: i64,
    pub tasks_completed: u64,
    /// Task kind identifier -> last completion time (RFC 3339)
    pub last_task_completion_time: BTreeMap<String, String>,
}

/// Request to open (load or create) a session for a host-platform user.
///
/// Absent fields deserialize as empty so the backend, not the JSON layer,
/// decides what a missing identity means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenSessionRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Withdrawal amount as typed by the user: a JSON number or the raw text
/// of the input field. The backend rejects fractions rather than truncating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WithdrawalAmount {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequestBody {
    pub amount: WithdrawalAmount,
}

/// One row of the task board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAvailabilityDto {
    /// Lowercase task kind identifier (quick, daily, special, custom)
    pub task_kind: String,
    pub label: String,
    pub reward: i64,
    pub cooldown_seconds: i64,
    pub available: bool,
    /// Zero when available
    pub remaining_seconds: i64,
    /// Idle description, or "Available in ..." while on cooldown
    pub availability_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBoardResponse {
    pub tasks: Vec<TaskAvailabilityDto>,
}

/// One immutable line of a user's reward history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDto {
    pub id: String,
    pub user_id: String,
    /// Task name or "Withdrawal Request"
    pub label: String,
    /// Positive for earnings, negative for withdrawals
    pub amount: i64,
    /// RFC 3339
    pub created_at: String,
}

/// History, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityListResponse {
    pub activities: Vec<ActivityDto>,
}

/// Why a request was refused without touching state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    OnCooldown,
    InvalidAmount,
    InsufficientBalance,
    /// The host platform did not supply a user id
    MissingIdentity,
}

/// Auxiliary record that failed to persist after the account was committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRecordKind {
    ActivityLog,
    WithdrawalLog,
}

impl fmt::Display for MissingRecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingRecordKind::ActivityLog => write!(f, "activity log"),
            MissingRecordKind::WithdrawalLog => write!(f, "withdrawal log"),
        }
    }
}

/// Outcome of a ledger operation as delivered to the presentation layer.
///
/// Clients re-poll the task board after `Accepted` or `PartialFailure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LedgerNotification {
    Accepted {
        account: AccountDto,
    },
    Rejected {
        reason: RejectionReason,
        message: String,
    },
    PartialFailure {
        account: AccountDto,
        missing: Vec<MissingRecordKind>,
        message: String,
    },
    StoreUnavailable {
        message: String,
    },
}

impl LedgerNotification {
    /// The account state carried by the notification, if the operation committed
    pub fn account(&self) -> Option<&AccountDto> {
        match self {
            LedgerNotification::Accepted { account }
            | LedgerNotification::PartialFailure { account, .. } => Some(account),
            LedgerNotification::Rejected { .. } | LedgerNotification::StoreUnavailable { .. } => {
                None
            }
        }
    }
}
