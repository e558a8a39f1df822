//! # REST API for Activity History

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::mappers::activity_mapper::ActivityMapper;
use super::session_or_not_found;
use crate::storage::Connection;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<u32>,
}

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new().route("/users/:user_id/activities", get(list_activities::<C>))
}

/// Most recent history lines, newest first
pub async fn list_activities<C: Connection>(
    State(state): State<AppState<C>>,
    Path(user_id): Path<String>,
    Query(query): Query<ActivityQuery>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/activities - limit {:?}", user_id, query.limit);

    let handle = match session_or_not_found(&state, &user_id).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };
    let limit = state.config.activity.resolve_limit(query.limit);
    let entries = handle.lock().await.recent_activity(limit).await;
    (StatusCode::OK, Json(ActivityMapper::to_list_response(entries))).into_response()
}
