//! Session command handlers

use super::session_store;
use crate::cli::{SessionAction, SessionArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use formgate_core::{FileSessionStore, SessionStore};
use serde_json::json;

/// Handle the session command
pub async fn handle_session(
    args: SessionArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let store = session_store(config);
    match args.action {
        SessionAction::Show => show(&store, output).await,
        SessionAction::Clear => clear(&store, output).await,
    }
}

async fn show(store: &FileSessionStore, output: &mut OutputWriter) -> Result<()> {
    let Some(stored) = store.load().await? else {
        if output.is_human() {
            output.info("Not logged in")?;
        } else {
            output.data(&json!({"active": false}))?;
        }
        return Ok(());
    };

    if output.is_human() {
        let since = stored
            .started_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S");
        output.success(&format!(
            "Logged in as {} ({}) since {}",
            stored.identity.name, stored.identity.user_id, since
        ))?;
    } else {
        output.data(&json!({
            "active": true,
            "userId": stored.identity.user_id,
            "name": stored.identity.name,
            "timestamp": stored.started_at,
        }))?;
    }
    Ok(())
}

async fn clear(store: &FileSessionStore, output: &mut OutputWriter) -> Result<()> {
    let was_active = store.is_session_active().await?;
    store.end_session().await?;
    if was_active {
        output.success("✓ Logged out")
    } else {
        output.info("No session to clear")
    }
}
