// ABOUTME: Core types and constants for the Flavor Exchange recipe platform
// ABOUTME: Foundation crate with error handling, recipe and identity models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Flavor Core
//!
//! Foundation crate providing shared types and constants for the Flavor
//! Exchange recipe-sharing platform. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorCategory`
//! - **constants**: Storage keys, schema versions, vocabularies, and limits
//! - **models**: Recipe, identity, and session data models

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Recipe, Identity, `SessionState`)
pub mod models;
