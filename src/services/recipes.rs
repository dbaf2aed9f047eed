// ABOUTME: Session-aware recipe operations combining the recipe and identity stores
// ABOUTME: Enforces sign-in for authoring and author ownership for edits and deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::{Identity, NewRecipe, Recipe, RecipePatch};
use crate::stores::{IdentityStore, RecipeQuery, RecipeStore};
use std::sync::Arc;
use tracing::warn;

/// Recipe draft as filled in on the create page, before the author is known
pub type RecipeDraft = NewRecipe;

/// Recipe operations on behalf of the signed-in identity
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<RecipeStore>,
    identity: Arc<IdentityStore>,
}

impl RecipeService {
    /// Bind the two stores
    #[must_use]
    pub const fn new(recipes: Arc<RecipeStore>, identity: Arc<IdentityStore>) -> Self {
        Self { recipes, identity }
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

    async fn require_identity(&self) -> AppResult<Identity> {
        self.identity
            .current_identity()
            .await
            .ok_or_else(AppError::auth_required)
    }

    /// Create a recipe authored by the current identity
    ///
    /// Any author set on `draft` is replaced by the session identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when signed out, otherwise the errors of
    /// [`RecipeStore::create`]
    pub async fn create_as_current(&self, mut draft: RecipeDraft) -> AppResult<Recipe> {
        let identity = self.require_identity().await?;
        draft.author = identity.author_ref();
        self.recipes.create(draft).await
    }

    async fn require_owned(&self, id: &str) -> AppResult<(Identity, Recipe)> {
        let identity = self.require_identity().await?;
        let recipe = self
            .recipes
            .get_by_id(id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")).with_resource_id(id))?;
        if !recipe.is_authored_by(&identity.id) {
            warn!(user.id = %identity.id, recipe.id = %id, "Recipe ownership check failed");
            return Err(AppError::permission_denied(
                "You don't have permission to modify this recipe",
            )
            .with_user_id(identity.id.clone())
            .with_resource_id(id));
        }
        Ok((identity, recipe))
    }

    /// Update a recipe the current identity authored
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired`, `ResourceNotFound`, `PermissionDenied`, or the
    /// errors of [`RecipeStore::update`]
    pub async fn update_owned(&self, id: &str, patch: RecipePatch) -> AppResult<Recipe> {
        self.require_owned(id).await?;
        self.recipes.update(id, patch).await
    }

    /// Delete a recipe the current identity authored
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired`, `ResourceNotFound`, `PermissionDenied`, or the
    /// errors of [`RecipeStore::delete`]
    pub async fn delete_owned(&self, id: &str) -> AppResult<Recipe> {
        self.require_owned(id).await?;
        self.recipes.delete(id).await
    }

    /// Recipes authored by the current identity
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when signed out
    pub async fn my_recipes(&self) -> AppResult<Vec<Recipe>> {
        let identity = self.require_identity().await?;
        Ok(self.recipes.fetch_by_author(&identity.id).await)
    }

    /// Toggle a favorite for the current identity
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when signed out, `ResourceNotFound` when the
    /// recipe is not in the collection, or the errors of
    /// [`RecipeStore::toggle_favorite`]
    pub async fn toggle_favorite(&self, recipe_id: &str) -> AppResult<bool> {
        let identity = self.require_identity().await?;
        if self.recipes.get_by_id(recipe_id).await.is_none()
            && !self.recipes.is_favorite(&identity.id, recipe_id).await
        {
            return Err(AppError::not_found(format!("Recipe {recipe_id}"))
                .with_resource_id(recipe_id));
        }
        self.recipes.toggle_favorite(&identity.id, recipe_id).await
    }

    /// Existing recipes favorited by the current identity
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when signed out
    pub async fn favorite_recipes(&self) -> AppResult<Vec<Recipe>> {
        let identity = self.require_identity().await?;
        Ok(self.recipes.favorite_recipes(&identity.id).await)
    }

    /// Home page listing: search text AND dietary filter
    pub async fn browse(&self, query: &RecipeQuery) -> Vec<Recipe> {
        self.recipes.query(query).await
    }
}
