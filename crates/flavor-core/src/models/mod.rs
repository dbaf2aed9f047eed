// ABOUTME: Core data models shared by the stores, services, and CLI
// ABOUTME: Re-exports recipe, draft, patch, identity, and session types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session identity and authentication state
pub mod identity;
/// Recipe records, creation drafts, and partial updates
pub mod recipe;

pub use identity::{Identity, SessionState};
pub use recipe::{AuthorRef, Difficulty, NewRecipe, Recipe, RecipePatch, Substitution};
