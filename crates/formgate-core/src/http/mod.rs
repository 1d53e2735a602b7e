//! HTTP backend communication
//!
//! This module provides:
//! - The `Backend` capability the submitter talks to
//! - A reqwest-based implementation against the JSON account backend
//! - Error classification for transport and parse failures
//! - The user directory listing
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

pub mod client;
pub mod directory;
pub mod error;

pub use client::{HttpBackend, HttpBackendConfig};
pub use directory::list_users;
pub use error::{ErrorClassification, HttpError};

use crate::types::BackendReply;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::fmt;

/// Backend endpoints used by the forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateUser,
    Login,
    ListUsers,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::CreateUser | Endpoint::Login => Method::POST,
            Endpoint::ListUsers => Method::GET,
        }
    }

    /// Path relative to the backend base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CreateUser => "api/createUser",
            Endpoint::Login => "api/login",
            Endpoint::ListUsers => "api/getAllUsers",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Remote endpoint capability
///
/// `send` performs exactly one request and returns the parsed reply body.
/// Outcome classification (success, rejected credentials, ...) is left to
/// the caller, since the body's own `status` decides it.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(
        &self,
        endpoint: Endpoint,
        body: Option<&Value>,
    ) -> std::result::Result<BackendReply, HttpError>;
}
