//! Form submission
//!
//! - `state`: lifecycle, navigation and outcome types
//! - `flow`: the signup and login specific halves of a submission
//! - `orchestrator`: the single-flight `Submitter`
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

pub mod flow;
pub mod orchestrator;
pub mod state;

pub use flow::{LoginFlow, Resolution, SignupFlow, SubmissionFlow};
pub use orchestrator::{Submitter, NETWORK_FAILURE, SESSION_FAILURE};
pub use state::{Route, SubmitOutcome, SubmitState};
