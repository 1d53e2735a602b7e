//! Signup and login command handlers

use super::{build_backend, read_form_file, session_store};
use crate::cli::{LoginArgs, SignupArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use formgate_core::{
    LoginFlow, SignupFlow, SubmissionFlow, SubmitOutcome, SubmitState, Submitter,
};
use formgate_schemas::FormState;
use std::sync::Arc;
use tracing::{info, instrument};

/// Handle the signup command
#[instrument(skip(config, output), fields(file = %args.file.display()))]
pub async fn handle_signup(
    args: SignupArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("signup_command");
    let form = read_form_file(&args.file)?;

    let submitter = Submitter::new(
        SignupFlow::for_today(),
        Arc::new(build_backend(config, args.base_url.as_deref())?),
        Arc::new(session_store(config)),
    );

    match submit_with_spinner(&submitter, &form, output, "Creating account...").await {
        SubmitOutcome::Succeeded { .. } => {
            info!("Account created");
            output.success("✓ Account created, you can now log in")?;
            Ok(())
        }
        outcome => report_failure(outcome, output),
    }
}

/// Handle the login command
#[instrument(skip_all)]
pub async fn handle_login(
    args: LoginArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("login_command");
    let form = login_form(&args)?;

    let session = Arc::new(session_store(config));
    let submitter = Submitter::new(
        LoginFlow::new(),
        Arc::new(build_backend(config, args.base_url.as_deref())?),
        session.clone(),
    );

    match submit_with_spinner(&submitter, &form, output, "Logging in...").await {
        SubmitOutcome::Succeeded { identity, .. } => {
            let who = identity.map(|i| i.name).unwrap_or_default();
            info!(session_file = %session.path().display(), "Logged in");
            output.success(&format!("✓ Logged in as {}", who))?;
            Ok(())
        }
        outcome => report_failure(outcome, output),
    }
}

/// Login form from a file, or from the flags that were given
///
/// A file wins over `--password`/`FORMGATE_PASSWORD`. Missing flags are left
/// out of the state so validation reports them.
fn login_form(args: &LoginArgs) -> Result<FormState> {
    if let Some(path) = &args.file {
        return read_form_file(path);
    }
    if args.name.is_none() && args.password.is_none() {
        return Err(Error::invalid_args(
            "provide --name and --password (or FORMGATE_PASSWORD), or --file",
        ));
    }

    let mut form = FormState::new();
    if let Some(name) = &args.name {
        form = form.with_text("name", name.as_str());
    }
    if let Some(password) = &args.password {
        form = form.with_text("password", password.as_str());
    }
    Ok(form)
}

/// Run a submission, showing a spinner while the request is in flight
async fn submit_with_spinner<F: SubmissionFlow>(
    submitter: &Submitter<F>,
    form: &FormState,
    output: &OutputWriter,
    message: &str,
) -> SubmitOutcome {
    let mut states = submitter.subscribe_state();
    let submit = submitter.submit(form);
    tokio::pin!(submit);

    let mut spinner = None;
    let outcome = loop {
        tokio::select! {
            outcome = &mut submit => break outcome,
            Ok(()) = states.changed() => {
                if *states.borrow_and_update() == SubmitState::Submitting && spinner.is_none() {
                    spinner = output.spinner(message);
                }
            }
        }
    };

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    outcome
}

/// Print the error map of a non-successful outcome and turn it into an error
fn report_failure(outcome: SubmitOutcome, output: &mut OutputWriter) -> Result<()> {
    match outcome {
        SubmitOutcome::Rejected(errors) => {
            output.errors(&errors)?;
            Err(Error::Rejected { errors })
        }
        SubmitOutcome::Failed(errors) => {
            output.errors(&errors)?;
            let message = errors
                .form_message()
                .map(str::to_string)
                .unwrap_or_else(|| {
                    errors
                        .iter()
                        .map(|(_, m)| m.to_string())
                        .next()
                        .unwrap_or_default()
                });
            Err(Error::SubmissionFailed { message })
        }
        SubmitOutcome::Ignored => Err(Error::other("A submission is already in progress")),
        SubmitOutcome::Succeeded { .. } => Ok(()),
    }
}
