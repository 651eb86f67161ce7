//! SQLite-backed persistent store.
//!
//! Split into focused submodules:
//! - `history` — append-only chat history and the bounded context window
//! - `customers` — customer registry upserts and listing
//! - `knowledge` — taught knowledge entries read by the prompt builder

mod customers;
mod history;
mod knowledge;


pub use customers::Customer;

use relay_core::{config::MemoryConfig, error::RelayError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Persistent store backed by SQLite.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Create a new store, running migrations on first use.
    ///
    /// A `db_path` of `":memory:"` opens an in-memory database (tests).
    pub async fn new(config: &MemoryConfig) -> Result<Self, RelayError> {
        let url = if config.db_path == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            // Ensure parent directory exists.
            if let Some(parent) = std::path::Path::new(&config.db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        RelayError::Memory(format!("failed to create data dir: {e}"))
                    })?;
                }
            }
            format!("sqlite:{}", config.db_path)
        };

        let opts = SqliteConnectOptions::from_str(&url)
            .map_err(|e| RelayError::Memory(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .map_err(|e| RelayError::Memory(format!("failed to connect to sqlite: {e}")))?;

        Self::run_migrations(&pool).await?;

        info!("store initialized at {}", config.db_path);

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<(), RelayError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS chat_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chat_id INTEGER NOT NULL,
                username TEXT,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            CREATE INDEX IF NOT EXISTS idx_chat_history_chat_id ON chat_history(chat_id);

            CREATE TABLE IF NOT EXISTS customers (
                chat_id INTEGER PRIMARY KEY,
                username TEXT,
                first_name TEXT,
                last_seen TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS knowledge (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )
        .execute(pool)
        .await
        .map_err(|e| RelayError::Memory(format!("migration failed: {e}")))?;

        Ok(())
    }
}
