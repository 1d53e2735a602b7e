//! In-process session store
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use super::SessionStore;
use crate::types::{Identity, StoredSession};
use crate::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Session store that keeps the current session in memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<StoredSession>>,
    starts: AtomicUsize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `start_session` has been called
    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Full stored session including its start time
    pub async fn stored(&self) -> Option<StoredSession> {
        self.current.read().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn start_session(&self, identity: &Identity) -> Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.current.write().await = Some(StoredSession::start(identity.clone()));
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Identity>> {
        Ok(self
            .current
            .read()
            .await
            .as_ref()
            .map(|stored| stored.identity.clone()))
    }

    async fn end_session(&self) -> Result<()> {
        *self.current.write().await = None;
        Ok(())
    }
}
