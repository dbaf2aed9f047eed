// ABOUTME: SQLite-backed state storage using a single key/value table
// ABOUTME: Creates the local_state table on connect and upserts snapshots by key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{validate_key, StateStorage};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use flavor_core::constants::storage::SQLITE_STATE_TABLE;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::info;

/// Key/value storage in a `SQLite` database
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

fn db_error(context: &str, error: sqlx::Error) -> AppError {
    AppError::storage(format!("{context}: {error}")).with_source(error)
}

impl SqliteStorage {
    /// Connect to `database_url` and ensure the state table exists
    ///
    /// # Errors
    ///
    /// Returns a storage error if the URL is invalid, the database cannot be
    /// opened, or the table cannot be created
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| db_error("Invalid SQLite URL", e))?
            .create_if_missing(true);

        // Every connection to an in-memory database sees its own empty
        // database, so those pools are pinned to one connection that never
        // expires.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| db_error("Failed to open SQLite database", e))?;

        let storage = Self { pool };
        storage.migrate().await?;
        info!(url = %database_url, "SQLite state storage ready");
        Ok(storage)
    }

    /// Wrap an existing pool (the table is created if missing)
    ///
    /// # Errors
    ///
    /// Returns a storage error if the table cannot be created
    pub async fn from_pool(pool: SqlitePool) -> AppResult<Self> {
        let storage = Self { pool };
        storage.migrate().await?;
        Ok(storage)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {SQLITE_STATE_TABLE} (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create state table", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl StateStorage for SqliteStorage {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        validate_key(key)?;
        let row = sqlx::query(&format!(
            "SELECT value FROM {SQLITE_STATE_TABLE} WHERE key = $1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load state", e))?;

        row.map(|r| r.try_get::<String, _>("value"))
            .transpose()
            .map_err(|e| db_error("Failed to read state value", e))
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        validate_key(key)?;
        sqlx::query(&format!(
            r"
            INSERT INTO {SQLITE_STATE_TABLE} (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "
        ))
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save state", e))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        validate_key(key)?;
        let result = sqlx::query(&format!("DELETE FROM {SQLITE_STATE_TABLE} WHERE key = $1"))
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to remove state", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        let rows = sqlx::query(&format!(
            "SELECT key FROM {SQLITE_STATE_TABLE} ORDER BY key"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list state keys", e))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("key"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| db_error("Failed to read state key", e))
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_upsert_and_remove() {
        let storage = SqliteStorage::connect("sqlite::memory:").await.unwrap();

        storage.save("recipe-storage", "v1").await.unwrap();
        storage.save("recipe-storage", "v2").await.unwrap();
        assert_eq!(
            storage.load("recipe-storage").await.unwrap().as_deref(),
            Some("v2")
        );
        assert_eq!(storage.keys().await.unwrap(), vec!["recipe-storage"]);

        assert!(storage.remove("recipe-storage").await.unwrap());
        assert_eq!(storage.load("recipe-storage").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_save_stamps_updated_at() {
        let storage = SqliteStorage::connect("sqlite::memory:").await.unwrap();

        let before = Utc::now();
        storage.save("auth-storage", "{}").await.unwrap();
        let after = Utc::now();

        let row = sqlx::query(&format!(
            "SELECT updated_at FROM {SQLITE_STATE_TABLE} WHERE key = $1"
        ))
        .bind("auth-storage")
        .fetch_one(&storage.pool)
        .await
        .unwrap();
        let updated_at: chrono::DateTime<Utc> = row.try_get("updated_at").unwrap();
        assert!(before <= updated_at && updated_at <= after);
    }
}
