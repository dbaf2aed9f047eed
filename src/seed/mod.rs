// ABOUTME: Built-in seed data for first launch and demo sign-in
// ABOUTME: Parses the embedded default recipe collection and demo account list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Embedded seed data.
//!
//! The recipe store falls back to [`default_recipes`] when its collection is
//! empty, and the mock authenticator signs demo users in against
//! [`demo_accounts`].

use crate::errors::{AppError, AppResult};
use crate::models::{Identity, Recipe};
use serde::Deserialize;

const DEFAULT_RECIPES_JSON: &str = include_str!("default_recipes.json");
const DEMO_ACCOUNTS_JSON: &str = include_str!("demo_accounts.json");

/// Demo account with its sign-in password
#[derive(Debug, Clone, Deserialize)]
pub struct DemoAccount {
    /// Account identity ID
    pub id: String,
    /// Display name
    pub username: String,
    /// Sign-in email
    pub email: String,
    /// Plain demo password
    pub password: String,
    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,
}

impl DemoAccount {
    /// Identity exposed after sign-in, without the password
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// The fixed default recipe set
///
/// # Errors
///
/// Returns a serialization error if the embedded data cannot be parsed
pub fn default_recipes() -> AppResult<Vec<Recipe>> {
    serde_json::from_str(DEFAULT_RECIPES_JSON)
        .map_err(|e| AppError::serialization(format!("Invalid default recipe data: {e}")))
}

/// The demo accounts accepted by the mock authenticator
///
/// # Errors
///
/// Returns a serialization error if the embedded data cannot be parsed
pub fn demo_accounts() -> AppResult<Vec<DemoAccount>> {
    serde_json::from_str(DEMO_ACCOUNTS_JSON)
        .map_err(|e| AppError::serialization(format!("Invalid demo account data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_recipes_parse_with_unique_ids() {
        let recipes = default_recipes().unwrap();
        assert_eq!(recipes.len(), 6);
        let ids: HashSet<_> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), recipes.len());
        assert!(recipes.iter().all(|r| !r.ingredients.is_empty()));
    }

    #[test]
    fn test_optional_substitutions_default_to_empty() {
        let recipes = default_recipes().unwrap();
        let thai = recipes.iter().find(|r| r.id == "2").unwrap();
        assert!(thai.substitutions.is_empty());
        let pizza = recipes.iter().find(|r| r.id == "1").unwrap();
        assert_eq!(pizza.substitutions.len(), 2);
    }

    #[test]
    fn test_demo_accounts_strip_password_from_identity() {
        let accounts = demo_accounts().unwrap();
        assert_eq!(accounts.len(), 5);
        let identity = accounts[0].identity();
        assert_eq!(identity.id, "user1");
        assert!(identity.avatar.is_some());
    }
}
