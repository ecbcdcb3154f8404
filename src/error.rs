//! Custom error types for profile-seeder
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::Path;

use thiserror::Error;

/// The main error type for profile-seeder operations
#[derive(Error, Debug)]
pub enum SeederError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Filesystem watcher errors
    #[error("Watch error: {0}")]
    Watch(String),

    /// A directory tree could not be copied
    #[error("Failed to copy {source_path} to {destination}: {message}")]
    Copy {
        source_path: String,
        destination: String,
        message: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl SeederError {
    /// Create an error for a required configuration key that is missing or blank
    pub fn missing_key(key: &str) -> Self {
        Self::Config(format!(
            "Value for {} is missing or empty in the configuration file.",
            key
        ))
    }

    /// Create a copy error for the given source and destination
    pub fn copy(source: &Path, destination: &Path, message: impl Into<String>) -> Self {
        Self::Copy {
            source_path: source.display().to_string(),
            destination: destination.display().to_string(),
            message: message.into(),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for SeederError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<notify::Error> for SeederError {
    fn from(err: notify::Error) -> Self {
        Self::Watch(err.to_string())
    }
}

impl From<walkdir::Error> for SeederError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SeederError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for profile-seeder operations
pub type SeederResult<T> = Result<T, SeederError>;
