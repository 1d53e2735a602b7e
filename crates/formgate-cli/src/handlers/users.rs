//! Users command handler

use super::build_backend;
use crate::cli::UsersArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use formgate_core::list_users;
use tracing::instrument;

/// Handle the users command
#[instrument(skip(config, output))]
pub async fn handle_users(
    args: UsersArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("users_command");
    let backend = build_backend(config, args.base_url.as_deref())?;

    let spinner = output.spinner("Fetching users...");
    let result = list_users(&backend).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let users = result?;
    output.section(&format!("Users ({})", users.len()))?;
    output.users(&users)
}
