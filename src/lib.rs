// ABOUTME: Main library entry point for the Flavor Exchange recipe sharing core
// ABOUTME: Provides recipe and identity stores with favorites, mock auth, and local persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Flavor Exchange
//!
//! The data core of a recipe sharing application: users browse, search,
//! favorite, create, edit, and delete recipes, sign in with mock
//! credentials, and keep their state on the local machine.
//!
//! ## Architecture
//!
//! - **Stores**: [`stores::RecipeStore`] owns recipes, favorites, and the
//!   loading / error flags; [`stores::IdentityStore`] owns the session.
//!   Both serialize mutations, persist a versioned snapshot after each one,
//!   and broadcast change events.
//! - **Storage**: pluggable snapshot backends (memory, JSON files, `SQLite`)
//! - **Services**: sign-in and ownership rules on top of the stores
//! - **Context**: explicit construction and shutdown of everything above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use flavor_exchange::config::AppConfig;
//! use flavor_exchange::context::AppContext;
//! use flavor_exchange::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let context = AppContext::bootstrap(&config).await?;
//!
//!     let recipes = context.recipes().fetch_all().await?;
//!     println!("{} recipes available", recipes.len());
//!
//!     context.shutdown().await
//! }
//! ```

/// Mock credential checks for sign-in and sign-up
pub mod auth;

/// Configuration management
pub mod config;

/// Dependency injection context
pub mod context;

/// Structured logging setup
pub mod logging;

/// Store change events over broadcast channels
pub mod notifications;

/// Embedded default recipes and demo accounts
pub mod seed;

/// Session-aware domain services
pub mod services;

/// Social share links
pub mod share;

/// Durable snapshot storage backends
pub mod storage;

/// Recipe and identity stores
pub mod stores;

/// Cooking countdown timer
pub mod timer;

// Re-export core modules from flavor-core
pub use flavor_core::{constants, errors, models};
