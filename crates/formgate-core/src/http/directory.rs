//! User directory listing
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use super::{Backend, Endpoint, ErrorClassification, HttpError};
use crate::types::UserRecord;
use crate::Result;
use tracing::debug;

/// Fetch every registered user
///
/// A reply whose `status` is not 200 is reported as a client error carrying
/// the backend's message; a 200 reply without a `users` list is a parse error.
pub async fn list_users(backend: &dyn Backend) -> Result<Vec<UserRecord>> {
    let reply = backend.send(Endpoint::ListUsers, None).await?;

    if !reply.is_success() {
        let message = reply
            .message_text()
            .map(str::to_string)
            .unwrap_or_else(|| format!("User listing failed with status {}", reply.status));
        return Err(HttpError {
            classification: ErrorClassification::ClientError,
            status_code: Some(reply.status),
            message,
        }
        .into());
    }

    let users = reply.users.ok_or_else(|| {
        HttpError::new(
            ErrorClassification::ParseError,
            "User listing reply has no users",
        )
    })?;
    debug!(count = users.len(), "Fetched user directory");
    Ok(users)
}
