// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses storage backend, data locations, seeding, and event buffer settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::events::DEFAULT_EVENT_BUFFER;
use crate::constants::service_names::FLAVOR_EXCHANGE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Verbose
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Durable state backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory, lost on exit
    Memory,
    /// One JSON file per store
    #[default]
    File,
    /// `SQLite` key/value table
    Sqlite,
}

impl StorageBackend {
    /// Parse a backend name
    ///
    /// # Errors
    ///
    /// Returns an error for names other than memory, file, or sqlite
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(anyhow::anyhow!(
                "Unsupported storage backend '{other}', expected memory, file, or sqlite"
            )),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Where store snapshots are kept
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StorageBackend,
    /// Directory used by the file backend
    pub data_dir: PathBuf,
    /// Connection URL used by the sqlite backend
    pub database_url: String,
}

impl StorageConfig {
    /// Ephemeral in-memory storage
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::default()
        }
    }

    /// File storage rooted at `dir`
    #[must_use]
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: dir.into(),
            ..Self::default()
        }
    }

    /// `SQLite` storage at `database_url`
    #[must_use]
    pub fn sqlite(database_url: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_url: database_url.into(),
            ..Self::default()
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        let database_url = format!("sqlite:{}", data_dir.join("flavor.db").display());
        Self {
            backend: StorageBackend::default(),
            data_dir,
            database_url,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Snapshot storage
    pub storage: StorageConfig,
    /// Populate the recipe collection with the default set when it is empty
    pub seed_on_empty: bool,
    /// Capacity of each store's event channel
    pub event_buffer: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: LogLevel::default(),
            storage: StorageConfig::default(),
            seed_on_empty: true,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value or the
    /// resulting configuration fails [`AppConfig::validate`]
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let backend = match env::var("FLAVOR_STORAGE_BACKEND") {
            Ok(value) => StorageBackend::parse(&value)?,
            Err(_) => defaults.storage.backend,
        };
        let data_dir = env::var("FLAVOR_DATA_DIR")
            .map_or_else(|_| defaults.storage.data_dir.clone(), PathBuf::from);
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| defaults.storage.database_url.clone());

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            storage: StorageConfig {
                backend,
                data_dir,
                database_url,
            },
            seed_on_empty: env_var_or("FLAVOR_SEED_ON_EMPTY", "true")
                .parse()
                .context("Invalid FLAVOR_SEED_ON_EMPTY value")?,
            event_buffer: env_var_or("FLAVOR_EVENT_BUFFER", &DEFAULT_EVENT_BUFFER.to_string())
                .parse()
                .context("Invalid FLAVOR_EVENT_BUFFER value")?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero event buffer or a sqlite backend without a URL
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer == 0 {
            return Err(anyhow::anyhow!("FLAVOR_EVENT_BUFFER must be at least 1"));
        }

        if self.storage.backend == StorageBackend::Sqlite
            && self.storage.database_url.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is required when FLAVOR_STORAGE_BACKEND=sqlite"
            ));
        }

        Ok(())
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        let location = match self.storage.backend {
            StorageBackend::Memory => "in-process".to_owned(),
            StorageBackend::File => self.storage.data_dir.display().to_string(),
            StorageBackend::Sqlite => self.storage.database_url.clone(),
        };
        format!(
            "{FLAVOR_EXCHANGE}: environment={} log_level={} storage={} ({location}) seed_on_empty={} event_buffer={}",
            self.environment,
            self.log_level,
            self.storage.backend,
            self.seed_on_empty,
            self.event_buffer,
        )
    }
}

/// Platform data directory for snapshots, falling back to the working directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(FLAVOR_EXCHANGE)
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!(StorageBackend::parse("SQLite").unwrap(), StorageBackend::Sqlite);
        assert_eq!(StorageBackend::parse(" mem ").unwrap(), StorageBackend::Memory);
        assert!(StorageBackend::parse("redis").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_buffer() {
        let config = AppConfig {
            event_buffer: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_sqlite_without_url() {
        let config = AppConfig {
            storage: StorageConfig::sqlite("  "),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_names_backend() {
        let config = AppConfig {
            storage: StorageConfig::memory(),
            ..AppConfig::default()
        };
        let summary = config.summary();
        assert!(summary.contains("storage=memory"));
        assert!(summary.contains("event_buffer=64"));
    }
}
