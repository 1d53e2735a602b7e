//! Session store capability
//!
//! The submitter receives a session store handle explicitly; nothing in the
//! pipeline reaches for global storage. Two implementations are provided:
//! - `MemorySessionStore`: process-local, used by tests and embedders
//! - `FileSessionStore`: one JSON file, used by the CLI
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use crate::types::Identity;
use crate::Result;
use async_trait::async_trait;

/// Persists the identity of the logged-in user
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist `identity` as the current session, replacing any previous one
    async fn start_session(&self, identity: &Identity) -> Result<()>;

    /// Current session identity, `None` when no session exists
    async fn get_session(&self) -> Result<Option<Identity>>;

    /// Clear the current session; clearing an absent session is not an error
    async fn end_session(&self) -> Result<()>;

    /// Whether a session currently exists
    async fn is_session_active(&self) -> Result<bool> {
        Ok(self.get_session().await?.is_some())
    }
}
