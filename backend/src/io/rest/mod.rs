//! # REST API Interface Layer
//!
//! JSON endpoints over the session registry. This layer only translates:
//! path and body extraction in, [`shared`] DTOs out, domain outcomes to
//! status codes. No business rules live here.
//!
//! | outcome | status |
//! |---|---|
//! | accepted / partial failure | 200 |
//! | invalid amount, missing identity | 400 |
//! | on cooldown, insufficient balance | 409 |
//! | store unavailable | 503 |
//! | unknown session or task kind | 404 |

pub mod account_apis;
pub mod activity_apis;
pub mod mappers;
pub mod session_apis;
pub mod task_apis;
pub mod withdrawal_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use tracing::warn;

use crate::domain::SessionHandle;
use crate::storage::Connection;
use crate::AppState;

/// All API routes, to be nested under `/api`
pub fn api_router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .merge(session_apis::router::<C>())
        .merge(account_apis::router::<C>())
        .merge(task_apis::router::<C>())
        .merge(withdrawal_apis::router::<C>())
        .merge(activity_apis::router::<C>())
}

pub(crate) async fn session_or_not_found<C: Connection>(
    state: &AppState<C>,
    user_id: &str,
) -> Result<SessionHandle<C>, Response> {
    match state.sessions.with_session(user_id).await {
        Some(handle) => Ok(handle),
        None => {
            warn!("No open session for user {}", user_id);
            Err((StatusCode::NOT_FOUND, "No open session for this user").into_response())
        }
    }
}
