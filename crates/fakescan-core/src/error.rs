//! Centralized error types for fakescan.

use thiserror::Error;

/// Main error type for fakescan operations.
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    UnsupportedType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for fakescan operations.
pub type DetectResult<T> = Result<T, DetectError>;

impl DetectError {
    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an unsupported type error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedType(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error was caused by the caller's submission.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::UnsupportedType(_))
    }
}
