//! Taught knowledge — append-only facts from the administrator, read back
//! by the prompt builder. Decoupled from conversation state.

use super::Store;
use relay_core::error::RelayError;

impl Store {
    /// Append a taught fact.
    pub async fn save_knowledge(&self, content: &str) -> Result<(), RelayError> {
        sqlx::query("INSERT INTO knowledge (content) VALUES (?)")
            .bind(content)
            .execute(&self.pool)
            .await
            .map_err(|e| RelayError::Memory(format!("insert failed: {e}")))?;

        Ok(())
    }

    /// The most-recent-`limit` taught facts, oldest first.
    pub async fn recent_knowledge(&self, limit: i64) -> Result<Vec<String>, RelayError> {
        let mut rows: Vec<(String,)> =
            sqlx::query_as("SELECT content FROM knowledge ORDER BY id DESC LIMIT ?")
                .bind(limit)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RelayError::Memory(format!("query failed: {e}")))?;

        rows.reverse();
        Ok(rows.into_iter().map(|(content,)| content).collect())
    }

    /// Number of taught facts.
    pub async fn count_knowledge(&self) -> Result<i64, RelayError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM knowledge")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RelayError::Memory(format!("query failed: {e}")))?;
        Ok(count)
    }
}
