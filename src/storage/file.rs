// ABOUTME: File-backed state storage writing one JSON document per key
// ABOUTME: Writes go through a temporary file and an atomic rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{validate_key, StateStorage};
use crate::errors::{AppError, AppResult};
use flavor_core::constants::storage::SNAPSHOT_FILE_EXTENSION;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Directory of `<key>.json` files
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) the storage directory
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created
    pub async fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create storage directory {}: {e}",
                dir.display()
            ))
            .with_source(e)
        })?;
        debug!(dir = %dir.display(), "File storage opened");
        Ok(Self { dir })
    }

    /// Storage directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{SNAPSHOT_FILE_EXTENSION}"))
    }
}

#[async_trait::async_trait]
impl StateStorage for FileStorage {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read {}: {e}",
                path.display()
            ))
            .with_source(e)),
        }
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        validate_key(key)?;
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{SNAPSHOT_FILE_EXTENSION}.tmp"));
        fs::write(&tmp, value).await.map_err(|e| {
            AppError::storage(format!("Failed to write {}: {e}", tmp.display())).with_source(e)
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            AppError::storage(format!("Failed to replace {}: {e}", path.display()))
                .with_source(e)
        })
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::storage(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))
            .with_source(e)),
        }
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_owned());
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_round_trip_and_listing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("state")).await.unwrap();

        assert_eq!(storage.load("auth-storage").await.unwrap(), None);
        storage.save("auth-storage", "{\"a\":1}").await.unwrap();
        storage.save("recipe-storage", "{}").await.unwrap();

        assert_eq!(
            storage.load("auth-storage").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(
            storage.keys().await.unwrap(),
            vec!["auth-storage".to_owned(), "recipe-storage".to_owned()]
        );
        assert!(!storage.dir().join("auth-storage.json.tmp").exists());

        assert!(storage.remove("auth-storage").await.unwrap());
        assert!(!storage.remove("auth-storage").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).await.unwrap();
        assert!(storage.save("../escape", "x").await.is_err());
    }
}
