use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::{ActivityRepository, UserRepository, WithdrawalRepository};
use crate::storage::Connection;

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection, creating the database file if needed
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                balance INTEGER NOT NULL DEFAULT 0 CHECK (balance >= 0),
                tasks_completed INTEGER NOT NULL DEFAULT 0,
                last_task_completion_time TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activities (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                label TEXT NOT NULL,
                amount INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_activities_user_created
            ON activities(user_id, created_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS withdrawals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                user_name TEXT NOT NULL,
                amount INTEGER NOT NULL CHECK (amount > 0),
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type UserRepository = UserRepository;
    type ActivityRepository = ActivityRepository;
    type WithdrawalRepository = WithdrawalRepository;

    fn create_user_repository(&self) -> Self::UserRepository {
        UserRepository::new(self.clone())
    }

    fn create_activity_repository(&self) -> Self::ActivityRepository {
        ActivityRepository::new(self.clone())
    }

    fn create_withdrawal_repository(&self) -> Self::WithdrawalRepository {
        WithdrawalRepository::new(self.clone())
    }
}
