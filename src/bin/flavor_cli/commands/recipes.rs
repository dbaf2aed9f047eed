// ABOUTME: Recipe commands for flavor-cli
// ABOUTME: Handles list, search, show, create, edit, delete, and favorites operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use flavor_exchange::{
    context::AppContext,
    errors::{AppError, AppResult},
    models::{AuthorRef, Difficulty, NewRecipe, RecipePatch},
    stores::RecipeQuery,
};
use tracing::info;

use crate::helpers::display::{display_recipe_details, display_recipe_list};

type Result<T> = AppResult<T>;

/// Create-page fields
pub struct CreateArgs {
    pub title: String,
    pub description: String,
    pub image: String,
    pub cooking_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub dietary_info: Vec<String>,
}

async fn current_favorites(context: &AppContext) -> Vec<String> {
    match context.identity().current_identity().await {
        Some(identity) => context.recipes().get_favorites(&identity.id).await,
        None => Vec::new(),
    }
}

/// List recipes, optionally filtered by dietary label
pub async fn list(context: &AppContext, diet: Option<String>) -> Result<()> {
    let recipes = context.recipes().filter_by_diet(diet.as_deref()).await;
    display_recipe_list(&recipes, &current_favorites(context).await);
    Ok(())
}

/// Search titles and ingredients
pub async fn search(context: &AppContext, query: String, diet: Option<String>) -> Result<()> {
    let query = RecipeQuery::all()
        .with_text(query)
        .with_diet(diet.unwrap_or_default());
    let recipes = context.recipe_service().browse(&query).await;
    display_recipe_list(&recipes, &current_favorites(context).await);
    Ok(())
}

/// Show one recipe
pub async fn show(context: &AppContext, id: &str) -> Result<()> {
    let recipe = context
        .recipes()
        .get_by_id(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
    let is_favorite = current_favorites(context).await.iter().any(|f| f == id);
    display_recipe_details(&recipe, is_favorite);
    Ok(())
}

/// Create a recipe as the signed-in user
pub async fn create(context: &AppContext, args: CreateArgs) -> Result<()> {
    // The service replaces the placeholder author with the session identity.
    let mut draft = NewRecipe::new(
        args.title,
        args.description,
        args.image,
        AuthorRef::new("", ""),
    )
    .with_cooking_time(args.cooking_time)
    .with_servings(args.servings)
    .with_difficulty(args.difficulty);
    draft.ingredients = args.ingredients;
    draft.instructions = args.instructions;
    draft.tags = args.tags;
    draft.dietary_info = args.dietary_info;

    let recipe = context.recipe_service().create_as_current(draft).await?;
    info!(recipe.id = %recipe.id, "Recipe created from CLI");
    println!("Created recipe {} ({})", recipe.title, recipe.id);
    Ok(())
}

/// Edit a recipe the signed-in user authored
pub async fn edit(context: &AppContext, id: &str, patch: RecipePatch) -> Result<()> {
    if patch.is_empty() {
        return Err(AppError::invalid_input("Nothing to change"));
    }
    let recipe = context.recipe_service().update_owned(id, patch).await?;
    println!("Updated recipe {} ({})", recipe.title, recipe.id);
    Ok(())
}

/// Delete a recipe the signed-in user authored
pub async fn delete(context: &AppContext, id: &str) -> Result<()> {
    let removed = context.recipe_service().delete_owned(id).await?;
    println!("Deleted recipe {} ({})", removed.title, removed.id);
    Ok(())
}

/// Toggle a favorite
pub async fn favorite(context: &AppContext, id: &str) -> Result<()> {
    let is_favorite = context.recipe_service().toggle_favorite(id).await?;
    if is_favorite {
        println!("Added {id} to favorites");
    } else {
        println!("Removed {id} from favorites");
    }
    Ok(())
}

/// List favorites of the signed-in user
pub async fn favorites(context: &AppContext) -> Result<()> {
    let recipes = context.recipe_service().favorite_recipes().await?;
    let ids: Vec<String> = recipes.iter().map(|r| r.id.clone()).collect();
    display_recipe_list(&recipes, &ids);
    Ok(())
}

/// List recipes authored by the signed-in user
pub async fn mine(context: &AppContext) -> Result<()> {
    let recipes = context.recipe_service().my_recipes().await?;
    display_recipe_list(&recipes, &current_favorites(context).await);
    Ok(())
}
