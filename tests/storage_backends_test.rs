// ABOUTME: Integration tests for the durable storage backends and the storage factory
// ABOUTME: Verifies stores persist through file and sqlite storage and reject foreign snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{chef, init_test_logging, sample_draft, unseeded};
use flavor_exchange::config::StorageConfig;
use flavor_exchange::constants::storage::{AUTH_STORAGE_KEY, RECIPE_STORAGE_KEY};
use flavor_exchange::errors::ErrorCode;
use flavor_exchange::storage::factory::Storage;
use flavor_exchange::storage::file::FileStorage;
use flavor_exchange::storage::StateStorage;
use flavor_exchange::stores::{IdentityStore, RecipeStore, RecipeStoreOptions};
use std::sync::Arc;

#[tokio::test]
async fn test_file_backend_persists_both_stores() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();

    let storage = Arc::new(FileStorage::open(dir.path()).await.unwrap());
    let recipes = RecipeStore::new(storage.clone(), RecipeStoreOptions::default());
    let identity = IdentityStore::new(storage.clone(), 8);
    recipes.fetch_all().await.unwrap();
    let created = recipes.create(sample_draft()).await.unwrap();
    recipes.toggle_favorite("user1", "3").await.unwrap();
    identity.login(chef("user1")).await.unwrap();

    assert!(dir.path().join("recipe-storage.json").exists());
    assert!(dir.path().join("auth-storage.json").exists());
    assert_eq!(
        storage.keys().await.unwrap(),
        vec![AUTH_STORAGE_KEY.to_owned(), RECIPE_STORAGE_KEY.to_owned()]
    );

    let storage = Arc::new(FileStorage::open(dir.path()).await.unwrap());
    let recipes = RecipeStore::open(storage.clone(), unseeded()).await.unwrap();
    let identity = IdentityStore::open(storage, 8).await.unwrap();
    assert_eq!(recipes.len().await, 7);
    assert_eq!(recipes.get_by_id(&created.id).await, Some(created));
    assert!(recipes.is_favorite("user1", "3").await);
    assert_eq!(identity.current_identity().await.unwrap().id, "user1");
}

#[tokio::test]
async fn test_file_backend_rejects_foreign_snapshot() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("recipe-storage.json"),
        r#"{"schemaVersion":2,"state":{"recipes":[],"favorites":{}}}"#,
    )
    .unwrap();

    let storage = Arc::new(FileStorage::open(dir.path()).await.unwrap());
    let Err(error) = RecipeStore::open(storage, unseeded()).await else {
        panic!("foreign snapshot accepted");
    };
    assert_eq!(error.code, ErrorCode::SchemaVersionMismatch);
}

#[tokio::test]
async fn test_file_backend_rejects_malformed_snapshot() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("auth-storage.json"), "not json").unwrap();

    let storage = Arc::new(FileStorage::open(dir.path()).await.unwrap());
    let Err(error) = IdentityStore::open(storage, 8).await else {
        panic!("malformed snapshot accepted");
    };
    assert_eq!(error.code, ErrorCode::SerializationError);
}

#[tokio::test]
async fn test_factory_memory_backend() {
    init_test_logging();
    let storage = Storage::from_config(&StorageConfig::memory()).await.unwrap();
    assert_eq!(storage.backend_name(), "memory");
    storage.save("recipe-storage", "{}").await.unwrap();
    assert_eq!(storage.keys().await.unwrap(), vec!["recipe-storage".to_owned()]);
}

#[tokio::test]
async fn test_factory_file_backend_creates_directory() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("state");

    let storage = Storage::from_config(&StorageConfig::file(&data_dir))
        .await
        .unwrap();

    assert_eq!(storage.backend_name(), "file");
    assert!(data_dir.is_dir());
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_backend_persists_across_connections() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("flavor.db").display());

    let storage = Arc::new(Storage::from_config(&StorageConfig::sqlite(&url)).await.unwrap());
    assert_eq!(storage.backend_name(), "sqlite");
    let recipes = RecipeStore::new(storage.clone(), RecipeStoreOptions::default());
    recipes.fetch_all().await.unwrap();
    recipes.delete("6").await.unwrap();
    storage.close().await;

    let storage = Arc::new(Storage::from_config(&StorageConfig::sqlite(&url)).await.unwrap());
    let reopened = RecipeStore::open(storage.clone(), RecipeStoreOptions::default())
        .await
        .unwrap();
    assert_eq!(reopened.len().await, 5);
    assert_eq!(reopened.get_by_id("6").await, None);
    storage.close().await;
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_in_memory_remove() {
    init_test_logging();
    let storage = Storage::from_config(&StorageConfig::sqlite("sqlite::memory:"))
        .await
        .unwrap();
    storage.save("auth-storage", "{}").await.unwrap();
    assert!(storage.remove("auth-storage").await.unwrap());
    assert!(!storage.remove("auth-storage").await.unwrap());
    assert_eq!(storage.load("auth-storage").await.unwrap(), None);
}
