use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use task_rewards::config::{AppConfig, StorageBackend};
use task_rewards::domain::SystemClock;
use task_rewards::storage::{Connection, DbConnection, MemoryConnection};
use task_rewards::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match config.storage.backend {
        StorageBackend::Sqlite => {
            info!("Setting up database at {}", config.storage.database_url);
            let db = DbConnection::new(&config.storage.database_url).await?;
            serve(db, config).await
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            serve(MemoryConnection::new(), config).await
        }
    }
}

async fn serve<C: Connection>(connection: C, config: AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_address()?;
    let state = AppState::new(connection, Arc::new(SystemClock), config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
