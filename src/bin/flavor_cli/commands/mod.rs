// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for flavor-cli
// ABOUTME: Provides access to recipe, session, and kitchen helper commands

pub mod kitchen;
pub mod recipes;
pub mod session;
