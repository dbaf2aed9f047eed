// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for flavor-cli
// ABOUTME: Provides consistent display functions for recipe cards, details, and identities

use flavor_exchange::models::{Identity, Recipe};

/// One-line recipe card
pub fn display_recipe_card(recipe: &Recipe, is_favorite: bool) {
    let marker = if is_favorite { "*" } else { " " };
    println!(
        "{marker} [{}] {} ({} min, {}, {:.1}/5) by {}",
        recipe.id,
        recipe.title,
        recipe.cooking_time,
        recipe.difficulty,
        recipe.display_rating(),
        recipe.author.username
    );
    if !recipe.dietary_info.is_empty() {
        println!("      {}", recipe.dietary_info.join(", "));
    }
}

/// Recipe cards followed by a count line
pub fn display_recipe_list(recipes: &[Recipe], favorites: &[String]) {
    if recipes.is_empty() {
        println!("No recipes found");
        return;
    }
    for recipe in recipes {
        display_recipe_card(recipe, favorites.iter().any(|id| id == &recipe.id));
    }
    println!("\n{} recipe(s)", recipes.len());
}

/// Full recipe page
pub fn display_recipe_details(recipe: &Recipe, is_favorite: bool) {
    println!("\n{}", recipe.title);
    println!("{}", "=".repeat(recipe.title.chars().count().max(20)));
    println!("{}", recipe.description);
    println!();
    println!("   ID: {}", recipe.id);
    println!("   Author: {}", recipe.author.username);
    println!("   Created: {}", recipe.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("   Cooking time: {} min", recipe.cooking_time);
    println!("   Servings: {}", recipe.servings);
    println!("   Difficulty: {}", recipe.difficulty);
    println!("   Rating: {:.1}/5", recipe.display_rating());
    println!("   Favorite: {}", if is_favorite { "yes" } else { "no" });
    println!("   Image: {}", recipe.image);
    if !recipe.tags.is_empty() {
        println!("   Tags: {}", recipe.tags.join(", "));
    }
    if !recipe.dietary_info.is_empty() {
        println!("   Dietary: {}", recipe.dietary_info.join(", "));
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {ingredient}");
    }

    if !recipe.substitutions.is_empty() {
        println!("\nSubstitutions:");
        for substitution in &recipe.substitutions {
            println!(
                "  - {}: {}",
                substitution.original,
                substitution.alternatives.join(", ")
            );
        }
    }

    println!("\nInstructions:");
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        println!("  {}. {instruction}", step + 1);
    }
}

/// Signed-in identity
pub fn display_identity(identity: &Identity) {
    println!("Signed in as {} <{}>", identity.username, identity.email);
    println!("   User ID: {}", identity.id);
    if let Some(avatar) = &identity.avatar {
        println!("   Avatar: {avatar}");
    }
}
