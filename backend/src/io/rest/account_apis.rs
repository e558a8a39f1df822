//! # REST API for Accounts

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::mappers::account_mapper::AccountMapper;
use super::session_or_not_found;
use crate::storage::Connection;
use crate::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new().route("/users/:user_id/account", get(get_account::<C>))
}

/// Current account snapshot of an open session
pub async fn get_account<C: Connection>(
    State(state): State<AppState<C>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/account", user_id);

    let handle = match session_or_not_found(&state, &user_id).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };
    let account = AccountMapper::to_dto(handle.lock().await.account());
    (StatusCode::OK, Json(account)).into_response()
}
