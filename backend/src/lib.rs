//! # Task Rewards Backend
//!
//! Reward ledger and cooldown gating for a chat-platform mini-app. Users
//! complete tasks to earn reward units, each task kind is locked for a
//! cooldown after completion, and balances can be withdrawn.
//!
//! ## Architecture
//!
//! - [`domain`]: cooldown rules, the per-user ledger and session registry
//! - [`storage`]: persistence traits with SQLite and in-memory backends
//! - [`io`]: the JSON REST transport
//! - [`config`]: YAML and environment configuration

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use axum::http::{HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use config::AppConfig;
use domain::{Clock, SessionRegistry};
use storage::Connection;

/// Application state shared across handlers
pub struct AppState<C: Connection> {
    pub sessions: Arc<SessionRegistry<C>>,
    pub config: Arc<AppConfig>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(connection: C, clock: Arc<dyn Clock>, config: AppConfig) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new(connection, clock)),
            config: Arc::new(config),
        }
    }
}

/// Build the application router, with CORS when an origin is configured
pub fn create_router<C: Connection>(state: AppState<C>) -> Router {
    let cors_origin = state.config.cors_allowed_origin.clone();
    let router = Router::new()
        .nest("/api", io::rest::api_router::<C>())
        .with_state(state);

    let Some(origin) = cors_origin else {
        return router;
    };
    match origin.parse::<HeaderValue>() {
        Ok(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers(Any),
        ),
        Err(_) => {
            warn!("Ignoring invalid CORS origin: {}", origin);
            router
        }
    }
}
