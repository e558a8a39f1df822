//! Outcome and error taxonomy for ledger operations.
//!
//! Every failure leaving the ledger is one of:
//! - [`Rejection`]: a policy violation; state is unchanged and no store write happened.
//! - [`LedgerError::StoreUnavailable`]: the account write (or load) failed; the
//!   in-memory snapshot is unchanged and the caller may retry.
//!
//! A committed operation whose auxiliary records failed is not an error: it
//! returns [`Committed`] with a non-empty `missing` list (a partial failure).

use chrono::Duration;

use super::cooldown::CooldownPolicy;
use super::models::{account::UserAccount, task::TaskKind};
use crate::storage::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("{kind} task is not available yet (available in {})", cooldown_message(.remaining))]
    OnCooldown { kind: TaskKind, remaining: Duration },
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },
}

fn cooldown_message(remaining: &Duration) -> String {
    CooldownPolicy::remaining_text(*remaining)
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    #[error("Host platform did not supply a user identity")]
    MissingIdentity,
}

impl LedgerError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            LedgerError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Auxiliary record that could not be written after the account commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRecord {
    ActivityLog,
    WithdrawalLog,
}

/// A durably committed account mutation.
///
/// The account state is authoritative. `missing` lists secondary records
/// that failed to persist, in which case history may undercount.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    pub account: UserAccount,
    pub missing: Vec<MissingRecord>,
}

impl Committed {
    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_rejection_message_uses_remaining_text() {
        let rejection = Rejection::OnCooldown {
            kind: TaskKind::Quick,
            remaining: Duration::seconds(61),
        };
        assert_eq!(
            rejection.to_string(),
            "quick task is not available yet (available in 2 minutes)"
        );
    }

    #[test]
    fn test_rejection_accessor() {
        let err = LedgerError::from(Rejection::InvalidAmount);
        assert_eq!(err.rejection(), Some(&Rejection::InvalidAmount));
        assert!(LedgerError::MissingIdentity.rejection().is_none());
    }
}
