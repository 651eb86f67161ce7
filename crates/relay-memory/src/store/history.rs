//! Chat history — append-only log and the bounded context window.

use super::Store;
use relay_core::{context::ContextEntry, error::RelayError};

impl Store {
    /// Append a single history entry for a conversation.
    pub async fn append_history(
        &self,
        chat_id: i64,
        username: &str,
        role: &str,
        content: &str,
    ) -> Result<(), RelayError> {
        sqlx::query(
            "INSERT INTO chat_history (chat_id, username, role, content) VALUES (?, ?, ?, ?)",
        )
        .bind(chat_id)
        .bind(username)
        .bind(role)
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(|e| RelayError::Memory(format!("insert failed: {e}")))?;

        Ok(())
    }

    /// The most-recent-`limit` entries for a conversation, oldest first.
    pub async fn recent_history(
        &self,
        chat_id: i64,
        limit: i64,
    ) -> Result<Vec<ContextEntry>, RelayError> {
        let mut rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT role, content FROM chat_history \
             WHERE chat_id = ? \
             ORDER BY id DESC \
             LIMIT ?",
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelayError::Memory(format!("query failed: {e}")))?;

        rows.reverse();
        Ok(rows
            .into_iter()
            .map(|(role, content)| ContextEntry { role, content })
            .collect())
    }

    /// Total stored messages across all conversations.
    pub async fn count_messages(&self) -> Result<i64, RelayError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_history")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RelayError::Memory(format!("query failed: {e}")))?;
        Ok(count)
    }
}
