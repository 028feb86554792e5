//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Exploration limit must be at least 1")]
    ZeroExplorationLimit,

    #[error("Long answer threshold must be at least 1 character")]
    ZeroLongAnswerChars,

    #[error("Latency min_ms ({min_ms}) exceeds max_ms ({max_ms})")]
    InvalidLatencyRange { min_ms: u64, max_ms: u64 },

    #[error("Log level must not be empty")]
    EmptyLogLevel,
}
