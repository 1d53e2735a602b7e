//! Formgate Schemas - declarative field schemas and the form validator
//!
//! This crate provides the validation half of the Formgate pipeline:
//! - **Rules**: tagged, serializable rule variants (`min_length`, `contains`,
//!   `calendar_date`, ...) each carrying a human-readable message
//! - **Schemas**: ordered field schemas grouped into a form schema
//! - **Validator**: a pure `validate` producing either a normalized payload or
//!   a field→message error map
//! - **Forms**: the signup and login schemas plus typed form/payload structs
//!
//! ## Quick Start
//!
//! ```rust
//! use formgate_schemas::{login_schema, FormState};
//!
//! let schema = login_schema();
//!
//! let state = FormState::new()
//!     .with_text("name", "Bob")
//!     .with_text("password", "hunter2");
//! assert!(schema.validate(&state).is_ok());
//!
//! let state = FormState::new().with_text("name", "B");
//! let errors = schema.validate(&state).unwrap_err();
//! assert_eq!(errors.get("name"), Some("Name must be at least 2 characters"));
//! assert_eq!(errors.get("password"), Some("Password is required"));
//! ```
//!
//! ## Evaluation Order
//!
//! Rules for a field run in declaration order and the first failing rule
//! decides that field's message. Every field is evaluated, so the error map
//! lists all failing fields at once. Composite fields (date of birth) run
//! their component chains first and their field-level rules only once every
//! component passes.
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

pub mod forms;
pub mod validation;

// Re-export commonly used types for convenience
pub use forms::{
    login_schema, signup_schema, signup_schema_for_today, DateParts, Gender, LoginForm,
    LoginPayload, SignupForm, SignupPayload,
};
pub use validation::{
    calendar, Canonical, CharClass, ErrorState, FieldKind, FieldSchema, FieldValue, FormSchema,
    FormState, Rule, SchemaError, SchemaResult, ValidPayload, FORM_ERROR_KEY,
};
