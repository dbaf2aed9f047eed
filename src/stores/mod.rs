// ABOUTME: Application state stores shared through Arc by the view layer
// ABOUTME: Exposes the recipe store, identity store, and recipe query type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session identity store
pub mod identity;
/// Composable search and dietary filter
pub mod query;
/// Recipe collection and favorites store
pub mod recipes;

pub use identity::IdentityStore;
pub use query::RecipeQuery;
pub use recipes::{RecipeState, RecipeStore, RecipeStoreOptions};
