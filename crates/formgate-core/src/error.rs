//! Error types for the Formgate core library
//!
//! This module defines the error handling system for the submission
//! pipeline, using thiserror for the definitions and anyhow for
//! source contexts.
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::http::HttpError;
use formgate_schemas::{ErrorState, SchemaError};
use thiserror::Error;

/// Main error type for Formgate operations
#[derive(Error, Debug)]
pub enum Error {
    /// Form state failed its schema
    #[error("Validation failed: {errors}")]
    Validation { errors: ErrorState },

    /// Schema definition or form data errors
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// HTTP/Network related errors
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Session store errors
    #[error("Session error: {message}")]
    Session {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a session error with an underlying cause
    pub fn session(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Error::Session {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ErrorState> for Error {
    fn from(errors: ErrorState) -> Self {
        Error::Validation { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::configuration("missing base url");
        assert_eq!(err.to_string(), "Configuration error: missing base url");
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err: Error = ErrorState::uniform(["name"], "Name must be at least 2 characters").into();
        let rendered = err.to_string();
        assert!(rendered.starts_with("Validation failed:"));
        assert!(rendered.contains("name: Name must be at least 2 characters"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
    }
}
