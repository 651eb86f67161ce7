//! Customer registry — who has talked to the bot.

use super::Store;
use relay_core::error::RelayError;

/// A registered customer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl Store {
    /// Insert or refresh a customer's profile, bumping `last_seen`.
    pub async fn upsert_customer(
        &self,
        chat_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<(), RelayError> {
        sqlx::query(
            "INSERT INTO customers (chat_id, username, first_name, last_seen) \
             VALUES (?, ?, ?, datetime('now')) \
             ON CONFLICT(chat_id) DO UPDATE SET \
                 username = excluded.username, \
                 first_name = excluded.first_name, \
                 last_seen = datetime('now')",
        )
        .bind(chat_id)
        .bind(username)
        .bind(first_name)
        .execute(&self.pool)
        .await
        .map_err(|e| RelayError::Memory(format!("upsert failed: {e}")))?;

        Ok(())
    }

    /// All registered customers.
    pub async fn all_customers(&self) -> Result<Vec<Customer>, RelayError> {
        sqlx::query_as("SELECT chat_id, username, first_name FROM customers")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RelayError::Memory(format!("query failed: {e}")))
    }

    /// Number of registered customers.
    pub async fn count_customers(&self) -> Result<i64, RelayError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RelayError::Memory(format!("query failed: {e}")))?;
        Ok(count)
    }
}
