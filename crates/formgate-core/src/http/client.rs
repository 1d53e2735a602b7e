//! reqwest-backed implementation of the `Backend` capability
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use super::{Backend, Endpoint, ErrorClassification, HttpError};
use crate::types::BackendReply;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Default address of the development backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/";

/// Configuration for the HTTP backend
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL the endpoint paths are joined onto
    pub base_url: String,
    /// Request timeout in seconds; `None` leaves requests unbounded
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: format!("formgate/{}", crate::VERSION),
        }
    }
}

impl HttpBackendConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// JSON client for the account backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: ReqwestClient,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend client, validating the base URL
    pub fn new(config: HttpBackendConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut builder = ReqwestClient::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| Error::Configuration {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(e.into()),
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> std::result::Result<Url, HttpError> {
        self.base_url.join(endpoint.path()).map_err(|e| {
            HttpError::new(
                ErrorClassification::Unknown,
                format!("Invalid endpoint URL for {}: {}", endpoint, e),
            )
        })
    }
}

/// Parse a base URL, making sure it ends with a slash so joins append
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|e| Error::Configuration {
        message: format!("Invalid backend base URL '{}': {}", raw, e),
        source: Some(e.into()),
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::configuration(format!(
            "Backend base URL '{}' cannot carry endpoint paths",
            raw
        )));
    }
    Ok(url)
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    async fn send(
        &self,
        endpoint: Endpoint,
        body: Option<&Value>,
    ) -> std::result::Result<BackendReply, HttpError> {
        let url = self.endpoint_url(endpoint)?;

        let mut request = self.client.request(endpoint.method(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(HttpError::from_request_error)?;
        let status = response.status();
        let text = response.text().await.map_err(HttpError::from_request_error)?;
        debug!(http_status = status.as_u16(), bytes = text.len(), "Backend responded");

        match serde_json::from_str::<BackendReply>(&text) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => Err(HttpError::from_status(status, &text)),
            Err(e) => Err(HttpError::new(
                ErrorClassification::ParseError,
                format!("Unexpected reply body: {}", e),
            )
            .with_status(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let backend =
            HttpBackend::new(HttpBackendConfig::default().with_base_url("http://10.0.0.5:8081/v1"))
                .unwrap();
        assert_eq!(
            backend.endpoint_url(Endpoint::Login).unwrap().as_str(),
            "http://10.0.0.5:8081/v1/api/login"
        );
    }

    #[test]
    fn test_default_base_url() {
        let backend = HttpBackend::new(HttpBackendConfig::default()).unwrap();
        assert_eq!(
            backend.endpoint_url(Endpoint::CreateUser).unwrap().as_str(),
            "http://localhost:8081/api/createUser"
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = HttpBackend::new(HttpBackendConfig::default().with_base_url("not a url"))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let err = HttpBackend::new(HttpBackendConfig::default().with_base_url("mailto:a@b.c"))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
