//! Error types for the HTTP server.

use thiserror::Error;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A route pattern failed to compile.
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// The configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] serde_json::Error),
}
