//! backend/src/io/rest/mappers/notification_mapper.rs
//!
//! Turns a ledger result into the user-facing notification plus the HTTP
//! status it is delivered with.

use axum::http::StatusCode;
use shared::{LedgerNotification, MissingRecordKind, RejectionReason};

use super::account_mapper::AccountMapper;
use crate::domain::outcome::{Committed, LedgerError, LedgerResult, MissingRecord, Rejection};

const STORE_UNAVAILABLE_MESSAGE: &str =
    "Could not reach storage. Nothing was changed, please try again.";

pub struct NotificationMapper;

impl NotificationMapper {
    pub fn to_notification(result: LedgerResult<Committed>) -> (StatusCode, LedgerNotification) {
        match result {
            Ok(committed) => (StatusCode::OK, Self::committed(committed)),
            Err(err) => Self::error(&err),
        }
    }

    fn committed(committed: Committed) -> LedgerNotification {
        let account = AccountMapper::to_dto(&committed.account);
        if !committed.is_partial() {
            return LedgerNotification::Accepted { account };
        }

        let missing: Vec<MissingRecordKind> =
            committed.missing.iter().copied().map(Self::missing_kind).collect();
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        LedgerNotification::PartialFailure {
            account,
            message: format!(
                "Your balance was updated, but the {} could not be saved.",
                names.join(" and ")
            ),
            missing,
        }
    }

    pub fn error(err: &LedgerError) -> (StatusCode, LedgerNotification) {
        match err {
            LedgerError::Rejected(rejection) => Self::rejection(rejection),
            LedgerError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                LedgerNotification::StoreUnavailable {
                    message: STORE_UNAVAILABLE_MESSAGE.to_string(),
                },
            ),
            // Only reachable while opening a session
            LedgerError::MissingIdentity => (
                StatusCode::BAD_REQUEST,
                LedgerNotification::Rejected {
                    reason: RejectionReason::MissingIdentity,
                    message: err.to_string(),
                },
            ),
        }
    }

    pub fn rejection(rejection: &Rejection) -> (StatusCode, LedgerNotification) {
        let (status, reason) = match rejection {
            Rejection::OnCooldown { .. } => (StatusCode::CONFLICT, RejectionReason::OnCooldown),
            Rejection::InvalidAmount => (StatusCode::BAD_REQUEST, RejectionReason::InvalidAmount),
            Rejection::InsufficientBalance { .. } => {
                (StatusCode::CONFLICT, RejectionReason::InsufficientBalance)
            }
        };
        (
            status,
            LedgerNotification::Rejected {
                reason,
                message: rejection.to_string(),
            },
        )
    }

    fn missing_kind(record: MissingRecord) -> MissingRecordKind {
        match record {
            MissingRecord::ActivityLog => MissingRecordKind::ActivityLog,
            MissingRecord::WithdrawalLog => MissingRecordKind::WithdrawalLog,
        }
    }
}
