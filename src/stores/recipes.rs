// ABOUTME: Recipe store owning the recipe collection, favorites mapping, and status flags
// ABOUTME: Serializes mutations behind a write guard and persists a snapshot after each one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe store.
//!
//! Every mutation runs as a single commit: the write guard is taken, the
//! current state is cloned and mutated, the clone is persisted, and only then
//! swapped in and announced. A failed save leaves the in-memory state exactly
//! as it was.

use super::query::RecipeQuery;
use crate::config::AppConfig;
use crate::constants::events::DEFAULT_EVENT_BUFFER;
use crate::constants::storage::RECIPE_STORAGE_KEY;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{NewRecipe, Recipe, RecipePatch};
use crate::notifications::{EventStream, RecipeEvent};
use crate::seed;
use crate::storage::{load_snapshot, save_snapshot, StateStorage};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info};
use uuid::Uuid;

const STORE_NAME: &str = "recipes";
const FETCH_FAILED_MESSAGE: &str = "Failed to fetch recipes";

/// Persisted recipe state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeState {
    /// Recipe collection in insertion order
    pub recipes: Vec<Recipe>,
    /// Identity ID to favorited recipe IDs, in favoriting order
    #[serde(default)]
    pub favorites: BTreeMap<String, Vec<String>>,
}

impl RecipeState {
    fn position(&self, id: &str) -> Option<usize> {
        self.recipes.iter().position(|recipe| recipe.id == id)
    }

    fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }
}

/// Recipe store behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeStoreOptions {
    /// Insert the default recipe set when `fetch_all` finds an empty collection
    pub seed_on_empty: bool,
    /// Event channel capacity
    pub event_buffer: usize,
}

impl Default for RecipeStoreOptions {
    fn default() -> Self {
        Self {
            seed_on_empty: true,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl RecipeStoreOptions {
    /// Options taken from the application configuration
    #[must_use]
    pub const fn from_config(config: &AppConfig) -> Self {
        Self {
            seed_on_empty: config.seed_on_empty,
            event_buffer: config.event_buffer,
        }
    }
}

struct Inner {
    data: RecipeState,
    error: Option<String>,
}

/// Canonical recipe collection with favorites and loading/error flags
pub struct RecipeStore {
    inner: RwLock<Inner>,
    is_loading: AtomicBool,
    storage: Arc<dyn StateStorage>,
    events: EventStream<RecipeEvent>,
    options: RecipeStoreOptions,
}

impl RecipeStore {
    /// Create an empty store; nothing is read from `storage`
    #[must_use]
    pub fn new(storage: Arc<dyn StateStorage>, options: RecipeStoreOptions) -> Self {
        Self::with_state(storage, options, RecipeState::default())
    }

    /// Create a store restored from the snapshot in `storage`, if one exists
    ///
    /// # Errors
    ///
    /// Returns a storage or serialization error if the snapshot cannot be
    /// read, or `SchemaVersionMismatch` for a snapshot of another version
    pub async fn open(storage: Arc<dyn StateStorage>, options: RecipeStoreOptions) -> AppResult<Self> {
        let state: RecipeState = load_snapshot(storage.as_ref(), RECIPE_STORAGE_KEY)
            .await?
            .unwrap_or_default();
        info!(
            recipes = state.recipes.len(),
            favorite_lists = state.favorites.len(),
            backend = storage.backend_name(),
            "Recipe store restored"
        );
        Ok(Self::with_state(storage, options, state))
    }

    /// Create a store holding `recipes`
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if two records share an ID
    pub fn from_recipes(
        storage: Arc<dyn StateStorage>,
        options: RecipeStoreOptions,
        recipes: Vec<Recipe>,
    ) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(recipes.len());
        if let Some(duplicate) = recipes.iter().find(|r| !seen.insert(r.id.as_str())) {
            return Err(AppError::new(
                ErrorCode::ResourceAlreadyExists,
                format!("Duplicate recipe id '{}'", duplicate.id),
            )
            .with_resource_id(duplicate.id.clone()));
        }
        Ok(Self::with_state(
            storage,
            options,
            RecipeState {
                recipes,
                favorites: BTreeMap::new(),
            },
        ))
    }

    fn with_state(
        storage: Arc<dyn StateStorage>,
        options: RecipeStoreOptions,
        data: RecipeState,
    ) -> Self {
        Self {
            inner: RwLock::new(Inner { data, error: None }),
            is_loading: AtomicBool::new(false),
            storage,
            events: EventStream::new(options.event_buffer),
            options,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current collection in insertion order
    pub async fn recipes(&self) -> Vec<Recipe> {
        self.inner.read().await.data.recipes.clone()
    }

    /// Number of records
    pub async fn len(&self) -> usize {
        self.inner.read().await.data.recipes.len()
    }

    /// Whether the collection is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.data.recipes.is_empty()
    }

    /// Whether `fetch_all` is running
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::Acquire)
    }

    /// Last error message, cleared when the next mutation starts
    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    /// Full persisted state
    pub async fn state(&self) -> RecipeState {
        self.inner.read().await.data.clone()
    }

    /// Subscribe to change events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RecipeEvent> {
        self.events.subscribe()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Record with `id`, or `None`
    pub async fn get_by_id(&self, id: &str) -> Option<Recipe> {
        let guard = self.inner.read().await;
        guard.data.recipes.iter().find(|r| r.id == id).cloned()
    }

    /// Records authored by `author_id`
    pub async fn fetch_by_author(&self, author_id: &str) -> Vec<Recipe> {
        let guard = self.inner.read().await;
        guard
            .data
            .recipes
            .iter()
            .filter(|r| r.is_authored_by(author_id))
            .cloned()
            .collect()
    }

    /// Case-insensitive match on the title or any ingredient; empty matches all
    pub async fn search(&self, query: &str) -> Vec<Recipe> {
        self.query(&RecipeQuery::all().with_text(query)).await
    }

    /// Records carrying the dietary label exactly; `None` or empty matches all
    pub async fn filter_by_diet(&self, tag: Option<&str>) -> Vec<Recipe> {
        let query = RecipeQuery {
            diet: tag.map(str::to_owned),
            ..RecipeQuery::default()
        };
        self.query(&query).await
    }

    /// Records satisfying both criteria of `query`, in insertion order
    pub async fn query(&self, query: &RecipeQuery) -> Vec<Recipe> {
        let matches = query.matcher();
        let guard = self.inner.read().await;
        guard
            .data
            .recipes
            .iter()
            .filter(|recipe| matches(recipe))
            .cloned()
            .collect()
    }

    /// Recipe IDs favorited by `user_id`, in favoriting order
    pub async fn get_favorites(&self, user_id: &str) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.data.favorites.get(user_id).cloned().unwrap_or_default()
    }

    /// Whether `user_id` has favorited `recipe_id`
    pub async fn is_favorite(&self, user_id: &str, recipe_id: &str) -> bool {
        let guard = self.inner.read().await;
        guard
            .data
            .favorites
            .get(user_id)
            .is_some_and(|ids| ids.iter().any(|id| id == recipe_id))
    }

    /// Favorited records that still exist, in collection order
    pub async fn favorite_recipes(&self, user_id: &str) -> Vec<Recipe> {
        let guard = self.inner.read().await;
        let Some(ids) = guard.data.favorites.get(user_id) else {
            return Vec::new();
        };
        guard
            .data
            .recipes
            .iter()
            .filter(|recipe| ids.contains(&recipe.id))
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Ensure the collection is populated, seeding the default set when empty
    ///
    /// # Errors
    ///
    /// Returns the underlying failure and records "Failed to fetch recipes"
    /// as the last error
    pub async fn fetch_all(&self) -> AppResult<Vec<Recipe>> {
        let mut guard = self.inner.write().await;
        guard.error = None;
        self.set_loading(true);

        let outcome = self.populate(&guard.data).await;
        self.set_loading(false);

        match outcome {
            Ok(Some(seeded)) => {
                guard.data = seeded;
                let count = guard.data.recipes.len();
                self.events
                    .publish(RecipeEvent::RecipesLoaded { count, seeded: true });
                AppLogger::log_store_mutation(STORE_NAME, "seed", None);
                Ok(guard.data.recipes.clone())
            }
            Ok(None) => {
                let count = guard.data.recipes.len();
                self.events
                    .publish(RecipeEvent::RecipesLoaded { count, seeded: false });
                debug!(count, "Recipe collection already populated");
                Ok(guard.data.recipes.clone())
            }
            Err(e) => {
                error!(error = %e, "{FETCH_FAILED_MESSAGE}");
                self.raise(&mut guard, FETCH_FAILED_MESSAGE.to_owned());
                Err(e)
            }
        }
    }

    async fn populate(&self, current: &RecipeState) -> AppResult<Option<RecipeState>> {
        if !current.recipes.is_empty() || !self.options.seed_on_empty {
            return Ok(None);
        }
        let next = RecipeState {
            recipes: seed::default_recipes()?,
            favorites: current.favorites.clone(),
        };
        self.persist(&next).await?;
        Ok(Some(next))
    }

    /// Validate and append a new record with a fresh ID and creation time
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete payload, or a storage
    /// error if the snapshot cannot be written
    pub async fn create(&self, draft: NewRecipe) -> AppResult<Recipe> {
        self.commit("create", move |state| {
            draft.validate()?;
            let mut id = Uuid::new_v4().to_string();
            while state.contains(&id) {
                id = Uuid::new_v4().to_string();
            }
            let recipe = draft.into_recipe(id, Utc::now());
            state.recipes.push(recipe.clone());
            let event = RecipeEvent::RecipeCreated {
                recipe_id: recipe.id.clone(),
            };
            Ok((recipe, event))
        })
        .await
    }

    /// Overwrite the fields present in `patch` on record `id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown ID, a validation error for an
    /// invalid patch, or a storage error if the snapshot cannot be written
    pub async fn update(&self, id: &str, patch: RecipePatch) -> AppResult<Recipe> {
        self.commit("update", move |state| {
            let index = state.position(id).ok_or_else(|| recipe_not_found(id))?;
            patch.validate()?;
            let recipe = &mut state.recipes[index];
            patch.apply_to(recipe);
            let merged = recipe.clone();
            let event = RecipeEvent::RecipeUpdated {
                recipe_id: merged.id.clone(),
            };
            Ok((merged, event))
        })
        .await
    }

    /// Remove record `id`, returning it
    ///
    /// Favorites that reference the record are kept; favorite joins skip them.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown ID, or a storage error if the
    /// snapshot cannot be written
    pub async fn delete(&self, id: &str) -> AppResult<Recipe> {
        self.commit("delete", move |state| {
            let index = state.position(id).ok_or_else(|| recipe_not_found(id))?;
            let removed = state.recipes.remove(index);
            let event = RecipeEvent::RecipeDeleted {
                recipe_id: removed.id.clone(),
            };
            Ok((removed, event))
        })
        .await
    }

    /// Add `recipe_id` to the favorites of `user_id`, or remove it when present
    ///
    /// Returns whether the recipe is a favorite after the call.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty IDs, or a storage error if the
    /// snapshot cannot be written
    pub async fn toggle_favorite(&self, user_id: &str, recipe_id: &str) -> AppResult<bool> {
        self.commit("toggle_favorite", move |state| {
            if user_id.trim().is_empty() {
                return Err(AppError::missing_field("userId"));
            }
            if recipe_id.trim().is_empty() {
                return Err(AppError::missing_field("recipeId"));
            }

            let ids = state.favorites.entry(user_id.to_owned()).or_default();
            let is_favorite = if let Some(position) = ids.iter().position(|id| id == recipe_id) {
                ids.remove(position);
                false
            } else {
                ids.push(recipe_id.to_owned());
                true
            };
            if ids.is_empty() {
                state.favorites.remove(user_id);
            }

            let event = RecipeEvent::FavoriteToggled {
                user_id: user_id.to_owned(),
                recipe_id: recipe_id.to_owned(),
                is_favorite,
            };
            Ok((is_favorite, event))
        })
        .await
    }

    /// Write the current state to storage
    ///
    /// # Errors
    ///
    /// Returns a storage or serialization error
    pub async fn flush(&self) -> AppResult<()> {
        let guard = self.inner.read().await;
        self.persist(&guard.data).await
    }

    // ------------------------------------------------------------------
    // Commit machinery
    // ------------------------------------------------------------------

    async fn commit<R, F>(&self, operation: &'static str, apply: F) -> AppResult<R>
    where
        F: FnOnce(&mut RecipeState) -> AppResult<(R, RecipeEvent)> + Send,
        R: Send,
    {
        let mut guard = self.inner.write().await;
        guard.error = None;

        let mut next = guard.data.clone();
        let (result, event) = match apply(&mut next) {
            Ok(applied) => applied,
            Err(e) => {
                AppLogger::log_store_rejection(STORE_NAME, operation, &e.message);
                self.raise(&mut guard, e.message.clone());
                return Err(e);
            }
        };

        if let Err(e) = self.persist(&next).await {
            error!(operation, error = %e, "Recipe mutation rolled back");
            self.raise(&mut guard, format!("Failed to {} recipe: {}", verb(operation), e.message));
            return Err(e);
        }

        guard.data = next;
        let resource_id = event_resource_id(&event).map(str::to_owned);
        self.events.publish(event);
        AppLogger::log_store_mutation(STORE_NAME, operation, resource_id.as_deref());
        Ok(result)
    }

    async fn persist(&self, state: &RecipeState) -> AppResult<()> {
        let backend = self.storage.backend_name();
        let saved = save_snapshot(self.storage.as_ref(), RECIPE_STORAGE_KEY, state).await;
        AppLogger::log_storage_operation(backend, "save", RECIPE_STORAGE_KEY, saved.is_ok());
        saved
    }

    fn raise(&self, inner: &mut Inner, message: String) {
        inner.error = Some(message.clone());
        self.events.publish(RecipeEvent::ErrorRaised { message });
    }

    fn set_loading(&self, is_loading: bool) {
        self.is_loading.store(is_loading, Ordering::Release);
        self.events.publish(RecipeEvent::LoadingChanged { is_loading });
    }
}

fn recipe_not_found(id: &str) -> AppError {
    AppError::not_found(format!("Recipe {id}")).with_resource_id(id)
}

fn verb(operation: &str) -> &str {
    match operation {
        "toggle_favorite" => "favorite",
        other => other,
    }
}

fn event_resource_id(event: &RecipeEvent) -> Option<&str> {
    match event {
        RecipeEvent::RecipeCreated { recipe_id }
        | RecipeEvent::RecipeUpdated { recipe_id }
        | RecipeEvent::RecipeDeleted { recipe_id }
        | RecipeEvent::FavoriteToggled { recipe_id, .. } => Some(recipe_id),
        RecipeEvent::LoadingChanged { .. }
        | RecipeEvent::RecipesLoaded { .. }
        | RecipeEvent::ErrorRaised { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;

    fn store() -> RecipeStore {
        RecipeStore::new(Arc::new(MemoryStorage::new()), RecipeStoreOptions::default())
    }

    #[tokio::test]
    async fn test_fetch_all_seeds_once() {
        let store = store();
        let first = store.fetch_all().await.unwrap();
        assert_eq!(first.len(), 6);
        assert!(!store.is_loading());

        let second = store.fetch_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_all_without_seeding_keeps_empty() {
        let store = RecipeStore::new(
            Arc::new(MemoryStorage::new()),
            RecipeStoreOptions {
                seed_on_empty: false,
                ..RecipeStoreOptions::default()
            },
        );
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_favorite_entry_removed_when_emptied() {
        let store = store();
        store.toggle_favorite("userA", "1").await.unwrap();
        store.toggle_favorite("userA", "1").await.unwrap();
        assert!(store.state().await.favorites.is_empty());
    }

    #[test]
    fn test_from_recipes_rejects_duplicate_ids() {
        let recipes = seed::default_recipes().unwrap();
        let mut doubled = recipes.clone();
        doubled.push(recipes[0].clone());
        let result = RecipeStore::from_recipes(
            Arc::new(MemoryStorage::new()),
            RecipeStoreOptions::default(),
            doubled,
        );
        let Err(error) = result else {
            panic!("duplicate ids accepted");
        };
        assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
    }
}
