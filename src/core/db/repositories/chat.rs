//! Chat history repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::{ChatEntry, NewChatEntry};
use crate::core::db::store::{ChatStore, StoreError};

/// Chat history repository for database operations
#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Create a new chat repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for ChatRepository {
    async fn append(&self, entry: NewChatEntry) -> Result<ChatEntry, StoreError> {
        let entry = sqlx::query_as::<_, ChatEntry>(
            r#"
            INSERT INTO chat_history (user_id, message, response, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, message, response, timestamp
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.message)
        .bind(&entry.response)
        .bind(entry.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ChatEntry>, StoreError> {
        let entries = sqlx::query_as::<_, ChatEntry>(
            r#"
            SELECT id, user_id, message, response, timestamp
            FROM chat_history
            WHERE user_id = $1
            ORDER BY timestamp DESC, seq DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
