//! Per-form submission behaviour
//!
//! A flow names the schema a form is validated against, the endpoint its
//! payload goes to, and how the backend reply maps onto success or an error
//! map. The orchestrator is generic over it.
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::http::Endpoint;
use crate::types::{BackendReply, Identity};
use formgate_schemas::{login_schema, signup_schema, ErrorState, FormSchema, ValidPayload};

/// Both login fields get this message when the backend rejects the credentials
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Signup failed";

/// How a backend reply resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Accepted; an identity means a session should be started
    Success(Option<Identity>),
    Failure(ErrorState),
}

/// Form-specific part of a submission
pub trait SubmissionFlow: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn schema(&self) -> &FormSchema;

    fn endpoint(&self) -> Endpoint;

    /// Map the reply to the payload that was sent onto a resolution
    fn resolve(&self, payload: &ValidPayload, reply: &BackendReply) -> Resolution;
}

/// Account creation
#[derive(Debug, Clone)]
pub struct SignupFlow {
    schema: FormSchema,
}

impl SignupFlow {
    /// Signup flow accepting birth years up to `current_year`
    pub fn new(current_year: i64) -> Self {
        Self {
            schema: signup_schema(current_year),
        }
    }

    pub fn for_today() -> Self {
        Self {
            schema: formgate_schemas::signup_schema_for_today(),
        }
    }
}

impl SubmissionFlow for SignupFlow {
    fn name(&self) -> &'static str {
        "signup"
    }

    fn schema(&self) -> &FormSchema {
        &self.schema
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::CreateUser
    }

    fn resolve(&self, _payload: &ValidPayload, reply: &BackendReply) -> Resolution {
        if reply.is_success() {
            Resolution::Success(None)
        } else {
            Resolution::Failure(ErrorState::form(SIGNUP_FAILED))
        }
    }
}

/// Credential check that starts a session
#[derive(Debug, Clone)]
pub struct LoginFlow {
    schema: FormSchema,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self {
            schema: login_schema(),
        }
    }
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFlow for LoginFlow {
    fn name(&self) -> &'static str {
        "login"
    }

    fn schema(&self) -> &FormSchema {
        &self.schema
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::Login
    }

    fn resolve(&self, payload: &ValidPayload, reply: &BackendReply) -> Resolution {
        match (reply.status, reply.user_id.as_deref()) {
            (401, _) => Resolution::Failure(ErrorState::uniform(
                ["name", "password"],
                INVALID_CREDENTIALS,
            )),
            (200, Some(user_id)) if !user_id.is_empty() => {
                // The reply normally echoes the name; fall back to what was submitted
                let name = reply
                    .name
                    .clone()
                    .or_else(|| {
                        payload
                            .get("name")
                            .and_then(|v| v.as_str())
                            .map(str::to_string)
                    })
                    .unwrap_or_default();
                Resolution::Success(Some(Identity::new(user_id, name)))
            }
            _ => Resolution::Failure(ErrorState::form(LOGIN_FAILED)),
        }
    }
}
