//! Core types shared by the session store, backend client and submitter
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of a logged-in user, handed to the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub name: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }
}

/// Identity plus the moment the session started, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(rename = "timestamp")]
    pub started_at: DateTime<Utc>,
}

impl StoredSession {
    /// Session starting now
    pub fn start(identity: Identity) -> Self {
        Self {
            identity,
            started_at: Utc::now(),
        }
    }
}

/// JSON body returned by every backend endpoint
///
/// The numeric `status` inside the body is authoritative; the HTTP status
/// line is not consulted when the body parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendReply {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form: a string on failures, the created record on signup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserRecord>>,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// `message` when it is a plain string
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }
}

/// One entry of the user directory
///
/// Fields the directory does not display (such as credentials) are ignored
/// on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub graduated_from: Option<String>,
    #[serde(default)]
    pub currently_working: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_reply_parsing() {
        let reply: BackendReply =
            serde_json::from_value(json!({"status": 200, "userId": "u1", "name": "Bob"})).unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.user_id.as_deref(), Some("u1"));
        assert_eq!(reply.name.as_deref(), Some("Bob"));

        let reply: BackendReply = serde_json::from_value(json!({
            "status": 401,
            "message": "Invalid credentials"
        }))
        .unwrap();
        assert!(!reply.is_success());
        assert_eq!(reply.message_text(), Some("Invalid credentials"));
    }

    #[test]
    fn test_signup_reply_carries_record_as_message() {
        let reply: BackendReply = serde_json::from_value(json!({
            "status": 200,
            "message": {"id": "u9", "name": "Ada"}
        }))
        .unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.message_text(), None);
    }

    #[test]
    fn test_user_record_ignores_credentials() {
        let users: Vec<UserRecord> = serde_json::from_value(json!([{
            "id": "u1",
            "name": "Ada",
            "password": "Abc123!@",
            "gender": "FEMALE",
            "walletAddress": null
        }]))
        .unwrap();
        assert_eq!(users[0].gender.as_deref(), Some("FEMALE"));
        assert!(users[0].wallet_address.is_none());
        let encoded = serde_json::to_string(&users[0]).unwrap();
        assert!(!encoded.contains("Abc123"));
    }

    #[test]
    fn test_stored_session_layout() {
        let session = StoredSession::start(Identity::new("u1", "Bob"));
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["name"], "Bob");
        assert!(value["timestamp"].is_string());
    }
}
