// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, store construction helpers, fixtures, and a failing backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `flavor_exchange`

use chrono::Utc;
use flavor_exchange::errors::{AppError, AppResult};
use flavor_exchange::models::{AuthorRef, Difficulty, Identity, NewRecipe, Recipe};
use flavor_exchange::storage::memory::MemoryStorage;
use flavor_exchange::storage::StateStorage;
use flavor_exchange::stores::{IdentityStore, RecipeStore, RecipeStoreOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Store options that never seed, so tests control the collection
pub const fn unseeded() -> RecipeStoreOptions {
    RecipeStoreOptions {
        seed_on_empty: false,
        event_buffer: 64,
    }
}

/// Empty recipe store over fresh memory storage
pub fn create_recipe_store() -> RecipeStore {
    init_test_logging();
    RecipeStore::new(Arc::new(MemoryStorage::new()), RecipeStoreOptions::default())
}

/// Recipe store holding `recipes` over fresh memory storage
pub fn create_recipe_store_with(recipes: Vec<Recipe>) -> RecipeStore {
    init_test_logging();
    RecipeStore::from_recipes(Arc::new(MemoryStorage::new()), unseeded(), recipes).unwrap()
}

/// Anonymous identity store over fresh memory storage
pub fn create_identity_store() -> IdentityStore {
    init_test_logging();
    IdentityStore::new(Arc::new(MemoryStorage::new()), 64)
}

/// The create-page payload used across scenarios
pub fn sample_draft() -> NewRecipe {
    NewRecipe::new("X", "Y", "z.jpg", AuthorRef::new("u1", "n"))
        .with_ingredient("a")
        .with_instruction("b")
        .with_cooking_time(10)
        .with_servings(2)
        .with_difficulty(Difficulty::Easy)
        .with_rating(0.0)
}

/// Minimal stored recipe with one dietary label
pub fn recipe_with_diet(id: &str, title: &str, diet: &str) -> Recipe {
    NewRecipe::new(title, "Tasty", "https://img.example/r.jpg", AuthorRef::new("u1", "n"))
        .with_ingredient("salt")
        .with_instruction("cook")
        .with_dietary_label(diet)
        .into_recipe(id.to_owned(), Utc::now())
}

/// Demo identity
pub fn chef(id: &str) -> Identity {
    Identity::new(id, format!("chef-{id}"), format!("{id}@example.com"))
}

/// Memory storage whose writes can be switched to fail
#[derive(Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_saves: AtomicBool,
}

impl FailingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }

    pub fn stored_keys(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait::async_trait]
impl StateStorage for FailingStorage {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::storage("disk full"));
        }
        self.inner.save(key, value).await
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        self.inner.remove(key).await
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        self.inner.keys().await
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
