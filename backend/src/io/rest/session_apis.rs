//! # REST API for Sessions
//!
//! Opening a session loads (or creates) the user's account from the host
//! platform identity; closing it discards the in-memory snapshot.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, post},
    Router,
};
use shared::OpenSessionRequest;
use tracing::{error, info, warn};

use super::mappers::account_mapper::AccountMapper;
use super::mappers::notification_mapper::NotificationMapper;
use crate::domain::models::HostIdentity;
use crate::storage::Connection;
use crate::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/sessions", post(open_session::<C>))
        .route("/sessions/:user_id", delete(close_session::<C>))
}

/// Load or create the account and open a session for it
pub async fn open_session<C: Connection>(
    State(state): State<AppState<C>>,
    Json(request): Json<OpenSessionRequest>,
) -> impl IntoResponse {
    info!("POST /api/sessions - user {:?}", request.user_id);

    let identity = match HostIdentity::new(&request.user_id, &request.display_name) {
        Ok(identity) => identity,
        Err(e) => {
            warn!("Refusing to open session: {}", e);
            let (status, notification) = NotificationMapper::error(&e);
            return (status, Json(notification)).into_response();
        }
    };

    match state.sessions.open(&identity).await {
        Ok(handle) => {
            let account = AccountMapper::to_dto(handle.lock().await.account());
            (StatusCode::OK, Json(account)).into_response()
        }
        Err(e) => {
            error!("Failed to open session for user {}: {}", identity.user_id(), e);
            let (status, notification) = NotificationMapper::error(&e);
            (status, Json(notification)).into_response()
        }
    }
}

pub async fn close_session<C: Connection>(
    State(state): State<AppState<C>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/sessions/{}", user_id);

    if state.sessions.close(&user_id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "No open session for this user").into_response()
    }
}
