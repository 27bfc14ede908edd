//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Extraction itself never fails; these errors cover everything around it:
//! loading the station table, compiling station patterns, reading input and
//! talking to the user. Errors that do not implement `Clone` are wrapped in `Arc`
//! so that `AppError` stays cloneable.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// The station table violates one of its invariants (duplicate ids, bank above max, ...).
    #[error("Configuration Error: {0}")]
    Config(String),

    /// A station table file could not be parsed as TOML.
    #[error("TOML Parsing Error: {0}")]
    Toml(Arc<toml::de::Error>),

    /// A station matcher could not be compiled from its keywords.
    #[error("Pattern Error: {0}")]
    Pattern(Arc<regex::Error>),

    /// Error during JSON serialization of a report record.
    #[error("JSON Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// Error related to accessing environment variables.
    #[error("Environment Error: {0}")]
    Env(#[from] std::env::VarError),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error specific to CLI logic or argument handling.
    #[error("CLI Error: {0}")]
    Cli(String),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Toml(Arc::new(err))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Pattern(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}
