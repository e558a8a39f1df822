use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use super::{decode_timestamp, encode_timestamp, DbConnection};
use crate::domain::models::{TaskKind, UserAccount};
use crate::storage::{StoreError, StoreResult, UserStorage};

/// Repository for the `users` table
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Completion times are stored as a JSON object keyed by task kind
    fn encode_completion_times(account: &UserAccount) -> StoreResult<String> {
        let by_kind: BTreeMap<&str, String> = account
            .last_task_completion_time
            .iter()
            .map(|(kind, at)| (kind.as_str(), encode_timestamp(at)))
            .collect();
        Ok(serde_json::to_string(&by_kind)?)
    }

    fn decode_completion_times(
        user_id: &str,
        json: &str,
    ) -> StoreResult<HashMap<TaskKind, chrono::DateTime<chrono::Utc>>> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut times = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            match key.parse::<TaskKind>() {
                Ok(kind) => {
                    times.insert(kind, decode_timestamp(&value)?);
                }
                Err(e) => warn!("Ignoring completion time for user {}: {}", user_id, e),
            }
        }
        Ok(times)
    }

    fn row_to_account(row: &SqliteRow) -> StoreResult<UserAccount> {
        let id: String = row.try_get("id")?;
        let tasks_completed: i64 = row.try_get("tasks_completed")?;
        let completion_json: String = row.try_get("last_task_completion_time")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(UserAccount {
            last_task_completion_time: Self::decode_completion_times(&id, &completion_json)?,
            name: row.try_get("name")?,
            balance: row.try_get("balance")?,
            tasks_completed: u64::try_from(tasks_completed).map_err(|_| {
                StoreError::Malformed(format!("negative task count for user {}", id))
            })?,
            created_at: decode_timestamp(&created_at)?,
            id,
        })
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn get_user(&self, user_id: &str) -> StoreResult<Option<UserAccount>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, balance, tasks_completed, last_task_completion_time, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn insert_user(&self, account: &UserAccount) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, balance, tasks_completed, last_task_completion_time, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(account.balance)
        .bind(account.tasks_completed as i64)
        .bind(Self::encode_completion_times(account)?)
        .bind(encode_timestamp(&account.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn update_user(&self, account: &UserAccount) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, balance = ?, tasks_completed = ?, last_task_completion_time = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.name)
        .bind(account.balance)
        .bind(account.tasks_completed as i64)
        .bind(Self::encode_completion_times(account)?)
        .bind(&account.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Unavailable(format!(
                "user {} does not exist",
                account.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::storage::Connection;

    async fn setup_test() -> UserRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        db.create_user_repository()
    }

    #[tokio::test]
    async fn test_insert_and_get_user() {
        let repo = setup_test().await;
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let account = UserAccount::new("1001", "Ada", created);

        repo.insert_user(&account).await.expect("Failed to insert user");
        let loaded = repo.get_user("1001").await.expect("Query failed");

        assert_eq!(loaded, Some(account));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let repo = setup_test().await;
        assert!(repo.get_user("nobody").await.expect("Query failed").is_none());
    }

    #[tokio::test]
    async fn test_update_persists_completion_times() {
        let repo = setup_test().await;
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let account = UserAccount::new("1001", "Ada", created);
        repo.insert_user(&account).await.unwrap();

        let updated = account
            .with_completion(TaskKind::Quick, created)
            .and_then(|a| a.with_completion(TaskKind::Special, created + chrono::Duration::minutes(1)))
            .unwrap();
        repo.update_user(&updated).await.expect("Failed to update user");

        let loaded = repo.get_user("1001").await.unwrap().unwrap();
        assert_eq!(loaded.balance, 110);
        assert_eq!(loaded.tasks_completed, 2);
        assert_eq!(loaded.last_task_completion_time, updated.last_task_completion_time);
    }

    #[tokio::test]
    async fn test_update_missing_user_fails() {
        let repo = setup_test().await;
        let account = UserAccount::new("ghost", "Ghost", Utc::now());
        let err = repo.update_user(&account).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_unknown_task_kinds_are_skipped() {
        let times = UserRepository::decode_completion_times(
            "1001",
            r#"{"quick":"2025-01-01T00:00:00.000000Z","weekly":"2025-01-01T00:00:00.000000Z"}"#,
        )
        .unwrap();
        assert_eq!(times.len(), 1);
        assert!(times.contains_key(&TaskKind::Quick));
    }
}
