// ABOUTME: Configuration management module for centralized application settings
// ABOUTME: Re-exports the environment-driven AppConfig and its storage settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Flavor Exchange
//!
//! - **Environment**: application configuration from environment variables

/// Environment and storage configuration
pub mod environment;

pub use environment::{AppConfig, Environment, LogLevel, StorageBackend, StorageConfig};
