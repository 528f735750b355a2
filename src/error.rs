//! Error types for Feshine.
//!
//! The navigation and conversation state machines are total and never fail;
//! errors only arise at the edges (configuration and content loading).

use std::path::PathBuf;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while loading or validating the content catalog.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog has no onboarding slides")]
    NoSlides,

    #[error("Catalog field {field} must not be empty")]
    EmptyField { field: String },
}
