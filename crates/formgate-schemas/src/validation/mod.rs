//! Validation module for form schemas
//!
//! The validator is organized into focused modules:
//! - `value`: form state and field values
//! - `rule`: tagged rule variants and their predicates
//! - `schema`: field and form schemas, the `validate` entry point
//! - `error`: the error map produced by validation and schema errors
//! - `calendar`: composing day/month/year into a real date
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

pub mod calendar;
pub mod error;
pub mod rule;
pub mod schema;
pub mod value;

// Re-export commonly used types
pub use error::{ErrorState, SchemaError, SchemaResult, FORM_ERROR_KEY};
pub use rule::{CharClass, Rule};
pub use schema::{Canonical, FieldKind, FieldSchema, FormSchema, ValidPayload};
pub use value::{FieldValue, FormState};
