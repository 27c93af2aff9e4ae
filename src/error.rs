// src/error.rs
//! Error types for medtui.

use thiserror::Error;

/// Top-level error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// User input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("server responded with {status}: {message}")]
    Api { status: u16, message: String },

    /// The backend answered 2xx but the body did not match the schema.
    #[error("unexpected response from server: {0}")]
    Decode(String),

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde serialization/deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
