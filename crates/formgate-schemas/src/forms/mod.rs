//! Schemas and typed structs for the signup and login forms
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

pub mod login;
pub mod signup;

pub use login::{login_schema, LoginForm, LoginPayload};
pub use signup::{
    signup_schema, signup_schema_for_today, DateParts, Gender, SignupForm, SignupPayload,
};
