//! Summarizer error types

use thiserror::Error;

/// Summarizer error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid trigger or metric pattern
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// A required memory document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested date range cannot be represented
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML rendering error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Cortex sink error
    #[error("Sink error: {0}")]
    Sink(String),
}

/// Result type alias for summarizer operations
pub type Result<T> = std::result::Result<T, Error>;
