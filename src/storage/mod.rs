// ABOUTME: Durable local state abstraction with pluggable backends
// ABOUTME: Defines the StateStorage trait and the versioned Snapshot envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-driven backend selection
pub mod factory;
/// One JSON file per key
pub mod file;
/// Process-local map, for tests and ephemeral sessions
pub mod memory;
/// `SQLite` key/value table
#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::errors::{AppError, AppResult, ErrorCode};
use flavor_core::constants::storage::SNAPSHOT_SCHEMA_VERSION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Key/value persistence for serialized store snapshots
///
/// Each store owns one key. Values are opaque JSON documents produced by
/// [`Snapshot::encode`].
#[async_trait::async_trait]
pub trait StateStorage: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read
    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    async fn save(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete `key`, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    async fn remove(&self, key: &str) -> AppResult<bool>;

    /// List stored keys in ascending order
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read
    async fn keys(&self) -> AppResult<Vec<String>>;

    /// Release backend resources at shutdown
    async fn close(&self) {}

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Versioned envelope written for every persisted store state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
    /// Schema version of `state`
    pub schema_version: u32,
    /// Store state
    pub state: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionProbe {
    schema_version: u32,
}

impl<T> Snapshot<T> {
    /// Wrap `state` with the current schema version
    pub const fn new(state: T) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            state,
        }
    }
}

impl<T: Serialize> Snapshot<T> {
    /// Serialize the envelope
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `state` cannot be encoded
    pub fn encode(&self) -> AppResult<String> {
        serde_json::to_string(self)
            .map_err(|e| AppError::serialization(format!("Failed to encode snapshot: {e}")))
    }
}

impl<T: DeserializeOwned> Snapshot<T> {
    /// Parse an envelope, rejecting unknown schema versions
    ///
    /// # Errors
    ///
    /// Returns `SchemaVersionMismatch` for a foreign version and a
    /// serialization error for malformed JSON
    pub fn decode(raw: &str) -> AppResult<T> {
        let probe: VersionProbe = serde_json::from_str(raw)
            .map_err(|e| AppError::serialization(format!("Snapshot has no schema version: {e}")))?;
        if probe.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(AppError::new(
                ErrorCode::SchemaVersionMismatch,
                format!(
                    "Snapshot schema version {} is not supported (expected {SNAPSHOT_SCHEMA_VERSION})",
                    probe.schema_version
                ),
            ));
        }
        let snapshot: Self = serde_json::from_str(raw)
            .map_err(|e| AppError::serialization(format!("Failed to decode snapshot: {e}")))?;
        Ok(snapshot.state)
    }
}

/// Load and decode the snapshot stored under `key`
///
/// # Errors
///
/// Returns storage, serialization, or schema version errors
pub async fn load_snapshot<T: DeserializeOwned>(
    storage: &dyn StateStorage,
    key: &str,
) -> AppResult<Option<T>> {
    match storage.load(key).await? {
        Some(raw) => Snapshot::decode(&raw).map(Some),
        None => Ok(None),
    }
}

/// Encode `state` and store it under `key`
///
/// # Errors
///
/// Returns serialization or storage errors
pub async fn save_snapshot<T: Serialize + Sync>(
    storage: &dyn StateStorage,
    key: &str,
    state: &T,
) -> AppResult<()> {
    let raw = Snapshot::new(state).encode()?;
    storage.save(key, &raw).await
}

/// Keys become file names and table keys; restrict them to a safe alphabet
pub(crate) fn validate_key(key: &str) -> AppResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "Storage key '{key}' must be non-empty and contain only letters, digits, '-' or '_'"
        )))
    }
}
