// ABOUTME: Application context wiring storage, stores, and services together
// ABOUTME: Provides explicit construction and shutdown in place of global store singletons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dependency injection context
//!
//! [`AppContext::bootstrap`] opens the configured storage backend, restores
//! both stores from it, and binds the recipe service. [`AppContext::shutdown`]
//! flushes both snapshots and releases the backend.

use crate::auth::MockAuthenticator;
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::services::RecipeService;
use crate::storage::factory::Storage;
use crate::storage::StateStorage;
use crate::stores::{IdentityStore, RecipeStore, RecipeStoreOptions};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared handles to every application component
#[derive(Clone)]
pub struct AppContext {
    config: Arc<AppConfig>,
    storage: Arc<Storage>,
    recipes: Arc<RecipeStore>,
    identity: Arc<IdentityStore>,
    authenticator: Arc<MockAuthenticator>,
}

impl AppContext {
    /// Open storage and restore both stores as configured
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be opened, or a
    /// snapshot error if persisted state cannot be restored
    pub async fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        let storage = Arc::new(Storage::from_config(&config.storage).await?);
        Self::with_storage(config.clone(), storage).await
    }

    /// Build the context over an already opened backend
    ///
    /// # Errors
    ///
    /// Returns a snapshot error if persisted state cannot be restored
    pub async fn with_storage(config: AppConfig, storage: Arc<Storage>) -> AppResult<Self> {
        let shared: Arc<dyn StateStorage> = storage.clone();
        let recipes =
            RecipeStore::open(shared.clone(), RecipeStoreOptions::from_config(&config)).await?;
        let identity = IdentityStore::open(shared, config.event_buffer).await?;
        let authenticator = MockAuthenticator::with_demo_accounts()?;

        info!(
            backend = storage.backend_name(),
            environment = %config.environment,
            "Application context ready"
        );

        Ok(Self {
            config: Arc::new(config),
            storage,
            recipes: Arc::new(recipes),
            identity: Arc::new(identity),
            authenticator: Arc::new(authenticator),
        })
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Recipe store
    #[must_use]
    pub const fn recipes(&self) -> &Arc<RecipeStore> {
        &self.recipes
    }

    /// Identity store
    #[must_use]
    pub const fn identity(&self) -> &Arc<IdentityStore> {
        &self.identity
    }

    /// Demo-account authenticator
    #[must_use]
    pub const fn authenticator(&self) -> &Arc<MockAuthenticator> {
        &self.authenticator
    }

    /// Session-aware recipe operations
    #[must_use]
    pub fn recipe_service(&self) -> RecipeService {
        RecipeService::new(self.recipes.clone(), self.identity.clone())
    }

    /// Flush both snapshots and close the storage backend
    ///
    /// Both flushes are attempted; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered
    pub async fn shutdown(self) -> AppResult<()> {
        let recipes = self.recipes.flush().await;
        let identity = self.identity.flush().await;
        if let Err(e) = recipes.as_ref().and(identity.as_ref()) {
            warn!(error = %e, "Failed to flush state at shutdown");
        }
        self.storage.close().await;
        info!("Application context shut down");
        recipes.and(identity)
    }
}
