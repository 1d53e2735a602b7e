//! Formgate Core - submission pipeline for the signup and login forms
//!
//! This crate drives validated form state to the backend and back:
//!
//! # Main Components
//!
//! - **Error Handling**: crate error type using `thiserror` and `anyhow`
//! - **Core Types**: session identity, backend replies, user directory records
//! - **Session Store**: explicitly passed session capability (memory or file backed)
//! - **HTTP Backend**: JSON client for the create-user, login and user list endpoints
//! - **Submission**: the single-flight orchestrator and the signup/login flows
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use formgate_core::{
//!     HttpBackend, HttpBackendConfig, LoginFlow, MemorySessionStore, Result, SubmitOutcome,
//!     Submitter,
//! };
//! use formgate_schemas::LoginForm;
//!
//! async fn example() -> Result<()> {
//!     let backend = HttpBackend::new(HttpBackendConfig::default())?;
//!     let session = Arc::new(MemorySessionStore::new());
//!     let submitter = Submitter::new(LoginFlow::new(), Arc::new(backend), session);
//!
//!     let form = LoginForm::new("Bob", "Abc123!@");
//!     match submitter.submit(&form.to_form_state()).await {
//!         SubmitOutcome::Succeeded { identity, .. } => println!("welcome {:?}", identity),
//!         other => println!("not logged in: {:?}", other),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod http;
pub mod session;
pub mod submission;
pub mod types;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use http::{
    list_users, Backend, Endpoint, ErrorClassification, HttpBackend, HttpBackendConfig, HttpError,
};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use submission::{
    LoginFlow, Resolution, Route, SignupFlow, SubmissionFlow, SubmitOutcome, SubmitState,
    Submitter,
};
pub use types::{BackendReply, Identity, StoredSession, UserRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
