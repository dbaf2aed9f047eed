// ABOUTME: Storage factory for configuration-based backend selection
// ABOUTME: Wraps the memory, file, and sqlite backends behind one dispatching type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::file::FileStorage;
use super::memory::MemoryStorage;
#[cfg(feature = "sqlite")]
use super::sqlite::SqliteStorage;
use super::StateStorage;
use crate::config::{StorageBackend, StorageConfig};
use crate::errors::AppResult;
use tracing::info;

/// Unified storage interface
#[derive(Clone)]
pub enum Storage {
    /// Process memory
    Memory(MemoryStorage),
    /// JSON files in a directory
    File(FileStorage),
    /// `SQLite` table
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStorage),
}

impl Storage {
    /// Create the backend selected by `config`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be opened, or a
    /// configuration error if sqlite was requested without the `sqlite` feature
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let storage = match config.backend {
            StorageBackend::Memory => Self::Memory(MemoryStorage::new()),
            StorageBackend::File => Self::File(FileStorage::open(&config.data_dir).await?),
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite => {
                Self::Sqlite(SqliteStorage::connect(&config.database_url).await?)
            }
            #[cfg(not(feature = "sqlite"))]
            StorageBackend::Sqlite => {
                return Err(crate::errors::AppError::config(
                    "sqlite storage requested but the sqlite feature is disabled",
                ))
            }
        };
        info!(backend = storage.backend_name(), "Initialized state storage");
        Ok(storage)
    }

    /// Ephemeral in-memory storage
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    fn inner(&self) -> &dyn StateStorage {
        match self {
            Self::Memory(storage) => storage,
            Self::File(storage) => storage,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(storage) => storage,
        }
    }
}

#[async_trait::async_trait]
impl StateStorage for Storage {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        self.inner().load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner().save(key, value).await
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        self.inner().remove(key).await
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        self.inner().keys().await
    }

    async fn close(&self) {
        self.inner().close().await;
    }

    fn backend_name(&self) -> &'static str {
        self.inner().backend_name()
    }
}
