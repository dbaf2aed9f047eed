// ABOUTME: Application constants organized by domain
// ABOUTME: Storage keys, schema versions, recipe vocabularies, and validation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Durable local storage keys and snapshot versioning
pub mod storage {
    /// Key of the persisted recipe collection and favorites mapping
    pub const RECIPE_STORAGE_KEY: &str = "recipe-storage";

    /// Key of the persisted session identity
    pub const AUTH_STORAGE_KEY: &str = "auth-storage";

    /// Schema version written into every snapshot envelope
    pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

    /// File extension used by the file backend
    pub const SNAPSHOT_FILE_EXTENSION: &str = "json";

    /// Table used by the sqlite backend
    pub const SQLITE_STATE_TABLE: &str = "local_state";
}

/// Recipe vocabularies and limits
pub mod recipes {
    /// Dietary labels offered by the recipe forms (the set is extensible)
    pub const DIETARY_OPTIONS: [&str; 8] = [
        "Vegetarian",
        "Vegan",
        "Gluten-Free",
        "Dairy-Free",
        "Low-Carb",
        "Keto",
        "Paleo",
        "High Protein",
    ];

    /// Highest rating a recipe can carry
    pub const MAX_RATING: f64 = 5.0;

    /// Granularity used when displaying ratings
    pub const RATING_STEP: f64 = 0.5;

    /// Default cooking time offered by the create form, in minutes
    pub const DEFAULT_COOKING_TIME_MINS: u32 = 30;

    /// Default servings offered by the create form
    pub const DEFAULT_SERVINGS: u32 = 4;
}

/// Authentication limits
pub mod auth {
    /// Minimum accepted password length at registration
    pub const MIN_PASSWORD_LENGTH: usize = 6;

    /// Prefix of identifiers assigned to registered users
    pub const REGISTERED_USER_ID_PREFIX: &str = "user";

    /// Message returned for unknown email / password pairs
    pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
}

/// Notification channel sizing
pub mod events {
    /// Default capacity of store event broadcast channels
    pub const DEFAULT_EVENT_BUFFER: usize = 64;
}

/// Service identification for structured logs
pub mod service_names {
    /// Name reported by the logging subsystem
    pub const FLAVOR_EXCHANGE: &str = "flavor-exchange";
}
