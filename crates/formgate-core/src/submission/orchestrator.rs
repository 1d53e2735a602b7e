//! Single-flight submission orchestrator
//!
//! `Submitter::submit` runs validate, then at most one backend request, then
//! the session start for a successful login. Only one submission is in
//! flight at a time: a trigger that arrives while one is running returns
//! `SubmitOutcome::Ignored` and touches nothing. The lifecycle state and the
//! current error map are published on watch channels so a front end can
//! render them without polling.
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use super::flow::{Resolution, SubmissionFlow};
use super::state::{Route, SubmitOutcome, SubmitState};
use crate::http::Backend;
use crate::session::SessionStore;
use formgate_schemas::{ErrorState, FormState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// Form-level message for transport and parse failures
pub const NETWORK_FAILURE: &str = "Something went wrong. Please try again.";
/// Form-level message when the session store refuses a successful login
pub const SESSION_FAILURE: &str = "Failed to start session";

/// Drives one form through validation and submission
pub struct Submitter<F> {
    flow: F,
    backend: Arc<dyn Backend>,
    session: Arc<dyn SessionStore>,
    in_flight: AtomicBool,
    state: watch::Sender<SubmitState>,
    errors: watch::Sender<ErrorState>,
}

/// Holds the in-flight claim; releasing it returns the submitter to `Idle`
struct FlightGuard<'a> {
    in_flight: &'a AtomicBool,
    state: &'a watch::Sender<SubmitState>,
}

impl<'a> FlightGuard<'a> {
    fn claim(in_flight: &'a AtomicBool, state: &'a watch::Sender<SubmitState>) -> Option<Self> {
        in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { in_flight, state })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(SubmitState::Idle);
        self.in_flight.store(false, Ordering::Release);
    }
}

impl<F: SubmissionFlow> Submitter<F> {
    pub fn new(flow: F, backend: Arc<dyn Backend>, session: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(SubmitState::Idle);
        let (errors, _) = watch::channel(ErrorState::new());
        Self {
            flow,
            backend,
            session,
            in_flight: AtomicBool::new(false),
            state,
            errors,
        }
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    /// Whether a submission is in flight; the submit control is disabled while true
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn state(&self) -> SubmitState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SubmitState> {
        self.state.subscribe()
    }

    /// Error map published by the most recent submission
    pub fn errors(&self) -> ErrorState {
        self.errors.borrow().clone()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<ErrorState> {
        self.errors.subscribe()
    }

    /// Validate `form` and, if it passes, send it to the flow's endpoint
    #[instrument(skip_all, fields(flow = self.flow.name()))]
    pub async fn submit(&self, form: &FormState) -> SubmitOutcome {
        let Some(_guard) = FlightGuard::claim(&self.in_flight, &self.state) else {
            debug!("Submission already in flight, ignoring trigger");
            return SubmitOutcome::Ignored;
        };

        self.state.send_replace(SubmitState::Validating);
        let payload = match self.flow.schema().validate(form) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(failing_fields = errors.len(), "Validation rejected form");
                self.errors.send_replace(errors.clone());
                return SubmitOutcome::Rejected(errors);
            }
        };
        debug!(failing_fields = 0, "Validation passed");
        self.errors.send_replace(ErrorState::new());

        self.state.send_replace(SubmitState::Submitting);
        let endpoint = self.flow.endpoint();
        info!(endpoint = %endpoint, "Submitting form");

        let body = payload.to_value();
        let reply = match self.backend.send(endpoint, Some(&body)).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "Submission request failed");
                return self.fail(ErrorState::form(NETWORK_FAILURE));
            }
        };

        match self.flow.resolve(&payload, &reply) {
            Resolution::Success(identity) => {
                if let Some(identity) = &identity {
                    if let Err(e) = self.session.start_session(identity).await {
                        error!(error = %e, "Session store rejected new session");
                        return self.fail(ErrorState::form(SESSION_FAILURE));
                    }
                }
                info!(status = reply.status, "Submission succeeded");
                SubmitOutcome::Succeeded {
                    route: Route::Home,
                    identity,
                }
            }
            Resolution::Failure(errors) => {
                warn!(status = reply.status, failing_fields = errors.len(), "Submission refused");
                self.fail(errors)
            }
        }
    }

    fn fail(&self, errors: ErrorState) -> SubmitOutcome {
        self.errors.send_replace(errors.clone());
        SubmitOutcome::Failed(errors)
    }
}
