//! # REST API for Withdrawals

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use shared::{WithdrawalAmount, WithdrawalRequestBody};
use tracing::info;

use super::mappers::notification_mapper::NotificationMapper;
use super::session_or_not_found;
use crate::domain::amount::{parse_withdrawal_amount, withdrawal_amount_from_number};
use crate::storage::Connection;
use crate::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new().route("/users/:user_id/withdrawals", post(request_withdrawal::<C>))
}

/// Debit the balance and file a pending withdrawal request
pub async fn request_withdrawal<C: Connection>(
    State(state): State<AppState<C>>,
    Path(user_id): Path<String>,
    Json(request): Json<WithdrawalRequestBody>,
) -> impl IntoResponse {
    info!("POST /api/users/{}/withdrawals - amount {:?}", user_id, request.amount);

    let handle = match session_or_not_found(&state, &user_id).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let amount = match &request.amount {
        WithdrawalAmount::Number(value) => withdrawal_amount_from_number(*value),
        WithdrawalAmount::Text(text) => parse_withdrawal_amount(text),
    };
    let amount = match amount {
        Ok(amount) => amount,
        Err(rejection) => {
            info!("Rejected withdrawal input for user {}: {}", user_id, rejection);
            let (status, notification) = NotificationMapper::rejection(&rejection);
            return (status, Json(notification)).into_response();
        }
    };

    let result = handle.lock().await.request_withdrawal(amount).await;
    let (status, notification) = NotificationMapper::to_notification(result);
    (status, Json(notification)).into_response()
}
