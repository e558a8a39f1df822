//! # REST API for Tasks
//!
//! The task board for polling clients and the completion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::{info, warn};

use super::mappers::notification_mapper::NotificationMapper;
use super::mappers::task_mapper::TaskMapper;
use super::session_or_not_found;
use crate::domain::models::TaskKind;
use crate::storage::Connection;
use crate::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/users/:user_id/tasks", get(get_task_board::<C>))
        .route(
            "/users/:user_id/tasks/:task_kind/complete",
            post(complete_task::<C>),
        )
}

/// Availability of every task kind for the user
pub async fn get_task_board<C: Connection>(
    State(state): State<AppState<C>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/tasks", user_id);

    let handle = match session_or_not_found(&state, &user_id).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };
    let board = handle.lock().await.task_board();
    (StatusCode::OK, Json(TaskMapper::to_board_response(board))).into_response()
}

pub async fn complete_task<C: Connection>(
    State(state): State<AppState<C>>,
    Path((user_id, task_kind)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("POST /api/users/{}/tasks/{}/complete", user_id, task_kind);

    let kind: TaskKind = match task_kind.parse() {
        Ok(kind) => kind,
        Err(e) => {
            warn!("{}", e);
            return (StatusCode::NOT_FOUND, e.to_string()).into_response();
        }
    };
    let handle = match session_or_not_found(&state, &user_id).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let result = handle.lock().await.complete_task(kind).await;
    let (status, notification) = NotificationMapper::to_notification(result);
    (status, Json(notification)).into_response()
}
