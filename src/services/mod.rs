// ABOUTME: Domain service layer for session-aware operations over the stores
// ABOUTME: Provides the recipe service used by the command line front end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services combine stores with the current session so that every front end
//! applies the same sign-in and ownership rules.

/// Authoring, ownership, and favorites for the signed-in identity
pub mod recipes;

pub use recipes::{RecipeDraft, RecipeService};
