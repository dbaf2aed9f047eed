// ABOUTME: Kitchen helper commands for flavor-cli
// ABOUTME: Handles the cooking countdown timer and social share links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use flavor_exchange::{
    context::AppContext,
    errors::{AppError, AppResult},
    models::Recipe,
    share::{recipe_url, share_url, ShareTarget},
    timer::CookingTimer,
};
use std::io::Write;
use std::time::Duration;

type Result<T> = AppResult<T>;

async fn require_recipe(context: &AppContext, id: &str) -> Result<Recipe> {
    context
        .recipes()
        .get_by_id(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Recipe {id}")).with_resource_id(id))
}

/// Show or run the cooking timer for a recipe
pub async fn timer(context: &AppContext, id: &str, watch: bool) -> Result<()> {
    let recipe = require_recipe(context, id).await?;
    let mut timer = CookingTimer::new(recipe.cooking_time);
    println!("{} - cooking time {}", recipe.title, timer.display());
    if !watch {
        return Ok(());
    }

    timer.toggle();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // First tick completes immediately.
    interval.tick().await;
    while timer.is_active() {
        interval.tick().await;
        timer.tick(1);
        print!("\r{}  ({:>3.0} deg)", timer.display(), timer.progress_degrees());
        std::io::stdout().flush()?;
    }
    println!("\nTime's up!");
    Ok(())
}

/// Print a share link for a recipe
pub async fn share(
    context: &AppContext,
    id: &str,
    target: ShareTarget,
    base_url: &str,
) -> Result<()> {
    let recipe = require_recipe(context, id).await?;
    let url = recipe_url(base_url, &recipe.id);
    let link = share_url(target, &recipe.title, &url)?;
    println!("{}:", target.label());
    println!("{link}");
    Ok(())
}
