use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use super::{decode_timestamp, encode_timestamp, DbConnection};
use crate::domain::models::{ActivityEntry, NewActivity};
use crate::storage::{ActivityStorage, StoreResult};

/// Repository for the append-only `activities` table
#[derive(Clone)]
pub struct ActivityRepository {
    db: DbConnection,
}

impl ActivityRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityStorage for ActivityRepository {
    async fn insert_activity(&self, activity: NewActivity) -> StoreResult<ActivityEntry> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO activities (id, user_id, label, amount, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&activity.user_id)
        .bind(&activity.label)
        .bind(activity.amount)
        .bind(encode_timestamp(&activity.created_at))
        .execute(self.db.pool())
        .await?;

        Ok(ActivityEntry::from_new(id, activity))
    }

    async fn list_activities(&self, user_id: &str, limit: u32) -> StoreResult<Vec<ActivityEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, label, amount, created_at
            FROM activities
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> StoreResult<ActivityEntry> {
                let created_at: String = row.try_get("created_at")?;
                Ok(ActivityEntry {
                    id: row.try_get("id")?,
                    user_id: row.try_get("user_id")?,
                    label: row.try_get("label")?,
                    amount: row.try_get("amount")?,
                    created_at: decode_timestamp(&created_at)?,
                })
            })
            .collect()
    }
}
