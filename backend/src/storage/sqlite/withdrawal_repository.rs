use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use super::{decode_timestamp, encode_timestamp, DbConnection};
use crate::domain::models::{NewWithdrawal, WithdrawalRequest, WithdrawalStatus};
use crate::storage::{StoreError, StoreResult, WithdrawalStorage};

/// Repository for the `withdrawals` table
#[derive(Clone)]
pub struct WithdrawalRepository {
    db: DbConnection,
}

impl WithdrawalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WithdrawalStorage for WithdrawalRepository {
    async fn insert_withdrawal(&self, withdrawal: NewWithdrawal) -> StoreResult<WithdrawalRequest> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO withdrawals (id, user_id, user_name, amount, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&withdrawal.user_id)
        .bind(&withdrawal.user_name)
        .bind(withdrawal.amount)
        .bind(withdrawal.status.as_str())
        .bind(encode_timestamp(&withdrawal.created_at))
        .execute(self.db.pool())
        .await?;

        Ok(WithdrawalRequest::from_new(id, withdrawal))
    }

    async fn list_withdrawals(&self, user_id: &str) -> StoreResult<Vec<WithdrawalRequest>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, user_name, amount, status, created_at
            FROM withdrawals
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> StoreResult<WithdrawalRequest> {
                let status: String = row.try_get("status")?;
                let created_at: String = row.try_get("created_at")?;
                Ok(WithdrawalRequest {
                    id: row.try_get("id")?,
                    user_id: row.try_get("user_id")?,
                    user_name: row.try_get("user_name")?,
                    amount: row.try_get("amount")?,
                    status: WithdrawalStatus::from_string(&status).map_err(StoreError::Malformed)?,
                    created_at: decode_timestamp(&created_at)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Connection;
    use chrono::Utc;

    #[tokio::test]
    async fn test_insert_and_list_withdrawal() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let repo = db.create_withdrawal_repository();

        let created = repo
            .insert_withdrawal(NewWithdrawal {
                user_id: "1001".to_string(),
                user_name: "Ada".to_string(),
                amount: 10,
                status: WithdrawalStatus::Pending,
                created_at: Utc::now(),
            })
            .await
            .expect("Failed to insert withdrawal");

        let listed = repo.list_withdrawals("1001").await.expect("Query failed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].amount, 10);
        assert_eq!(listed[0].user_name, "Ada");
        assert_eq!(listed[0].status, WithdrawalStatus::Pending);

        assert!(repo.list_withdrawals("someone-else").await.unwrap().is_empty());
    }
}
