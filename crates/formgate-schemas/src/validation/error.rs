//! Validation error map and schema error types
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Reserved error key for messages that belong to the whole form
pub const FORM_ERROR_KEY: &str = "_form";

/// Mapping from field path to error message
///
/// An absent entry means the field is currently valid. Component failures are
/// keyed by dotted path (`dateOfBirth.day`). Each validation run produces a
/// fresh map; callers replace, never merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorState {
    errors: BTreeMap<String, String>,
}

impl ErrorState {
    /// Create an empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding a single form-level message
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(FORM_ERROR_KEY, message);
        errors
    }

    /// Map assigning the same message to every listed field
    pub fn uniform<I, S>(fields: I, message: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors = Self::new();
        for field in fields {
            errors.insert(field, message);
        }
        errors
    }

    /// Record a message for a field, replacing any previous one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Message for a field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    /// Form-level message, if any
    pub fn form_message(&self) -> Option<&str> {
        self.get(FORM_ERROR_KEY)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing field paths in order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(|k| k.as_str())
    }

    /// Iterate over (field, message) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert to result - Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no validation errors");
        }
        write!(f, "{} field(s) failed validation:", self.errors.len())?;
        for (field, message) in &self.errors {
            write!(f, "\n  - {}: {}", field, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorState {}

impl FromIterator<(String, String)> for ErrorState {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// Errors in a schema definition or in data that cannot be represented as form state
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A `pattern` rule whose regex does not compile
    #[error("Invalid pattern '{pattern}' for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A rule applied to a field kind it cannot evaluate
    #[error("Rule '{rule}' cannot apply to {kind} field '{field}'")]
    RuleKindMismatch {
        field: String,
        rule: String,
        kind: String,
    },

    /// A rule referring to a component the field does not declare
    #[error("Field '{field}' references unknown component '{component}'")]
    UnknownComponent { field: String, component: String },

    /// A rule referring to a field the form does not declare
    #[error("Field '{field}' references unknown field '{other}'")]
    UnknownField { field: String, other: String },

    /// The same field declared twice
    #[error("Duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// Input value that has no field representation
    #[error("Unsupported value for field '{field}': {found}")]
    UnsupportedValue { field: String, found: String },

    /// Validated payload did not match a typed payload struct
    #[error("Payload does not match the {form} shape: {source}")]
    PayloadShape {
        form: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_and_form_messages() {
        let errors = ErrorState::uniform(["name", "password"], "Invalid credentials");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Invalid credentials"));
        assert_eq!(errors.get("password"), Some("Invalid credentials"));
        assert!(errors.form_message().is_none());

        let errors = ErrorState::form("Login failed");
        assert_eq!(errors.form_message(), Some("Login failed"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FORM_ERROR_KEY]);
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = ErrorState::new();
        errors.insert("name", "Name must be at least 2 characters");
        let rendered = errors.to_string();
        assert!(rendered.starts_with("1 field(s) failed validation:"));
        assert!(rendered.contains("name: Name must be at least 2 characters"));
        assert_eq!(ErrorState::new().to_string(), "no validation errors");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = ErrorState::new();
        errors.insert("dateOfBirth.day", "Please select a valid day");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"dateOfBirth.day": "Please select a valid day"}));
    }
}
