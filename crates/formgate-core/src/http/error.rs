//! HTTP error classification
//!
//! A transport or parse failure is the only way `Backend::send` fails; a
//! reply whose body reports a non-200 status is still a successful send.
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of backend failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClassification {
    /// Connection refused, DNS failure, timeout
    NetworkError,
    /// The body was not a JSON reply of the expected shape
    ParseError,
    /// 5xx without a usable body
    ServerError,
    /// 4xx without a usable body
    ClientError,
    Unknown,
}

/// Normalized backend failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpError {
    pub classification: ErrorClassification,
    /// HTTP status code if a response arrived
    pub status_code: Option<u16>,
    pub message: String,
}

impl HttpError {
    pub fn new(classification: ErrorClassification, message: impl Into<String>) -> Self {
        Self {
            classification,
            status_code: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status.as_u16());
        self
    }

    /// Create from a reqwest request/transport error
    pub fn from_request_error(error: reqwest::Error) -> Self {
        let classification = if error.is_timeout() || error.is_connect() || error.is_request() {
            ErrorClassification::NetworkError
        } else if error.is_decode() {
            ErrorClassification::ParseError
        } else {
            ErrorClassification::Unknown
        };

        Self {
            classification,
            status_code: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }

    /// Failure for an HTTP error status whose body could not be parsed
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("empty response body")
                .to_string()
        } else {
            body.trim().to_string()
        };
        Self::new(Self::classify_status(status), message).with_status(status)
    }

    fn classify_status(status: StatusCode) -> ErrorClassification {
        match status.as_u16() {
            400..=499 => ErrorClassification::ClientError,
            500..=599 => ErrorClassification::ServerError,
            _ => ErrorClassification::Unknown,
        }
    }

    pub fn classification(&self) -> ErrorClassification {
        self.classification
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP Error [{}]: {} (classification: {:?})",
            self.status_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            self.message,
            self.classification
        )
    }
}

impl std::error::Error for HttpError {}
