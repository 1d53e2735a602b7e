//! Login form schema, form state and payload
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::validation::{FieldSchema, FormSchema, FormState, Rule, SchemaError, ValidPayload};
use serde::{Deserialize, Serialize};

/// Login form state as edited by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }

    pub fn to_form_state(&self) -> FormState {
        FormState::new()
            .with_text("name", self.name.as_str())
            .with_text("password", self.password.as_str())
    }
}

/// Body of the login request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub name: String,
    pub password: String,
}

impl TryFrom<ValidPayload> for LoginPayload {
    type Error = SchemaError;

    fn try_from(payload: ValidPayload) -> Result<Self, Self::Error> {
        payload.into_typed("login")
    }
}

/// Login schema: the password is only checked for presence
pub fn login_schema() -> FormSchema {
    FormSchema::new("login")
        .field(
            FieldSchema::text("name")
                .required("Name is required")
                .rule(Rule::min_length(2, "Name must be at least 2 characters")),
        )
        .field(
            FieldSchema::text("password")
                .required("Password is required")
                .rule(Rule::min_length(1, "Password is required")),
        )
}
