// ABOUTME: Benchmark fixtures generating deterministic recipe collections
// ABOUTME: Rotates titles, ingredients, and dietary labels so searches hit a stable fraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for generating recipe collections.

use chrono::{Duration, Utc};
use flavor_exchange::constants::recipes::DIETARY_OPTIONS;
use flavor_exchange::models::{AuthorRef, Difficulty, NewRecipe, Recipe};

/// Predefined collection sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum CollectionSize {
    /// Roughly the seeded set
    Small,
    /// An active community
    Medium,
    /// Stress size
    Large,
}

impl CollectionSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Medium => 1_000,
            Self::Large => 10_000,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "10",
            Self::Medium => "1k",
            Self::Large => "10k",
        }
    }
}

const DISHES: [&str; 6] = ["Risotto", "Curry", "Salad", "Tacos", "Soup", "Stir Fry"];
const INGREDIENTS: [&str; 5] = ["garlic", "onion", "basil", "chickpeas", "ginger"];

/// One deterministic recipe
#[must_use]
pub fn generate_recipe(index: usize) -> Recipe {
    let dish = DISHES[index % DISHES.len()];
    let difficulty = match index % 3 {
        0 => Difficulty::Easy,
        1 => Difficulty::Medium,
        _ => Difficulty::Hard,
    };
    let created_at = Utc::now() - Duration::minutes(i64::try_from(index).unwrap_or(i64::MAX));
    NewRecipe::new(
        format!("{dish} #{index}"),
        "Benchmark recipe",
        "https://img.example/bench.jpg",
        AuthorRef::new(format!("user{}", index % 50), "bench"),
    )
    .with_ingredient(INGREDIENTS[index % INGREDIENTS.len()])
    .with_ingredient("salt")
    .with_instruction("cook")
    .with_difficulty(difficulty)
    .with_dietary_label(DIETARY_OPTIONS[index % DIETARY_OPTIONS.len()])
    .into_recipe(format!("bench-{index}"), created_at)
}

/// A collection of `size` recipes with unique IDs
#[must_use]
pub fn generate_recipes(size: CollectionSize) -> Vec<Recipe> {
    (0..size.count()).map(generate_recipe).collect()
}
