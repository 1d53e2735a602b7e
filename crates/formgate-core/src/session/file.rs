//! Session store backed by a single JSON file
//!
//! The file holds `{ "userId", "name", "timestamp" }`. A missing file means
//! nobody is logged in. Unreadable or malformed contents are treated the same
//! way, with a warning, so a damaged file never blocks a fresh login.
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use super::SessionStore;
use crate::types::{Identity, StoredSession};
use crate::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Session store persisting the current session to a file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full stored session, including when it started
    pub async fn load(&self) -> Result<Option<StoredSession>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::session(
                    format!("Failed to read session file {}", self.path.display()),
                    e,
                ))
            }
        };

        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => Ok(Some(stored)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring corrupt session file"
                );
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn start_session(&self, identity: &Identity) -> Result<()> {
        let stored = StoredSession::start(identity.clone());
        let encoded = serde_json::to_string_pretty(&stored)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    Error::session(
                        format!("Failed to create session directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        tokio::fs::write(&self.path, encoded).await.map_err(|e| {
            Error::session(
                format!("Failed to write session file {}", self.path.display()),
                e,
            )
        })?;
        debug!(path = %self.path.display(), user_id = %identity.user_id, "Session started");
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Identity>> {
        Ok(self.load().await?.map(|stored| stored.identity))
    }

    async fn end_session(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session ended");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::session(
                format!("Failed to remove session file {}", self.path.display()),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.get_session().await.unwrap(), None);
        store.end_session().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(store.get_session().await.unwrap(), None);
    }
}
