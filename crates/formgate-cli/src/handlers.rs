//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand,
//! plus the form file loading they share.

mod completions;
mod config;
mod session;
mod submit;
mod users;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use session::handle_session;
pub use submit::{handle_login, handle_signup};
pub use users::handle_users;
pub use validate::handle_validate;

use crate::config::Config;
use crate::error::{Error, Result};
use formgate_core::{FileSessionStore, HttpBackend};
use formgate_schemas::FormState;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a JSON or YAML form file into form state
pub(crate) fn read_form_file(path: &Path) -> Result<FormState> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    let value: Value = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            message: e.to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            message: e.to_string(),
        })?
    };

    let state = FormState::from_json(&value)?;
    debug!(path = %path.display(), fields = state.len(), "Read form file");
    Ok(state)
}

/// Backend client from config plus an optional per-command override
pub(crate) fn build_backend(config: &Config, base_url: Option<&str>) -> Result<HttpBackend> {
    let backend = HttpBackend::new(config.backend_config(base_url))?;
    debug!(base_url = %backend.base_url(), "Using backend");
    Ok(backend)
}

pub(crate) fn session_store(config: &Config) -> FileSessionStore {
    FileSessionStore::new(&config.session.file)
}
