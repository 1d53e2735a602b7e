//! Submit lifecycle and outcome types
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::types::Identity;
use formgate_schemas::ErrorState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the submitter currently is in its lifecycle
///
/// `Idle` whenever no submission is in flight; the control that triggers a
/// submit should be disabled in every other state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    Submitting,
}

impl SubmitState {
    pub fn is_busy(&self) -> bool {
        !matches!(self, SubmitState::Idle)
    }
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmitState::Idle => "idle",
            SubmitState::Validating => "validating",
            SubmitState::Submitting => "submitting",
        };
        f.write_str(label)
    }
}

/// Navigation signal emitted on success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
}

/// Result of one `submit` call
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission was already in flight; nothing happened
    Ignored,
    /// Validation failed; no request was sent
    Rejected(ErrorState),
    /// The backend accepted the submission
    Succeeded {
        route: Route,
        /// Present when a session was started
        identity: Option<Identity>,
    },
    /// The request was sent and did not succeed
    Failed(ErrorState),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded { .. })
    }

    /// Error map for rejected or failed outcomes
    pub fn errors(&self) -> Option<&ErrorState> {
        match self {
            SubmitOutcome::Rejected(errors) | SubmitOutcome::Failed(errors) => Some(errors),
            _ => None,
        }
    }
}
