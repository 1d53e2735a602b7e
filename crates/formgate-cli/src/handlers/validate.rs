//! Validate command handler

use super::read_form_file;
use crate::cli::{FormKind, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use formgate_schemas::{login_schema, signup_schema, signup_schema_for_today, FormSchema};
use tracing::{debug, instrument};

/// Handle the validate command
#[instrument(skip(_config, output), fields(file = %args.file.display()))]
pub async fn handle_validate(
    args: ValidateArgs,
    _config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &args.file.display().to_string());
    output.info(&format!("Validating form: {}", args.file.display()))?;

    let state = read_form_file(&args.file)?;
    let schema = schema_for(args.form, args.current_year);

    match schema.validate(&state) {
        Ok(payload) => {
            debug!(form = %schema.name, "Form is valid");
            output.success("✓ Form is valid")?;
            output.section("Payload")?;
            output.data(&payload)?;
            Ok(())
        }
        Err(errors) => {
            debug!(form = %schema.name, failing_fields = errors.len(), "Form is invalid");
            output.errors(&errors)?;
            Err(Error::Rejected { errors })
        }
    }
}

fn schema_for(form: FormKind, current_year: Option<i64>) -> FormSchema {
    match (form, current_year) {
        (FormKind::Signup, Some(year)) => signup_schema(year),
        (FormKind::Signup, None) => signup_schema_for_today(),
        (FormKind::Login, _) => login_schema(),
    }
}
