//! Logging utilities for the Formgate CLI
//!
//! This module provides:
//! - Request ID generation and tracking
//! - Password redaction for printed and logged payloads
//! - Performance timing spans
//! - Structured logging setup (compact, full, JSON; console or file)

use crate::config;
use crate::error::{Error, Result};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{field, Span};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Request ID for this invocation
static REQUEST_ID: OnceLock<String> = OnceLock::new();

/// Resolved logging setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Write to stderr
    pub console: bool,
    /// Optional file output path; takes the place of stderr when set
    pub file: Option<PathBuf>,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "full" => Some(LogFormat::Full),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            console: true,
            file: None,
            thread_ids: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {}
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
            }
        }

        config
    }

    /// Take level, format and file from the configuration file
    ///
    /// The configured level only applies when no `-v` flag raised it. An
    /// unknown format keeps the current one and is returned as an error once
    /// the other settings are applied.
    pub fn apply_settings(
        &mut self,
        settings: &config::LoggingConfig,
        verbosity: u8,
    ) -> Result<()> {
        if verbosity == 0 {
            self.level = settings.level.clone();
        }
        if settings.file.is_some() {
            self.file = settings.file.clone();
        }
        match LogFormat::parse(&settings.format) {
            Some(format) => {
                self.format = format;
                Ok(())
            }
            None => Err(Error::config(format!(
                "Invalid log format in config: {}",
                settings.format
            ))),
        }
    }

    /// Apply environment overrides
    ///
    /// Like `apply_settings`, an unknown `FORMGATE_LOG_FORMAT` is reported
    /// back instead of logged.
    pub fn merge_with_env(&mut self) -> Result<()> {
        // RUST_LOG takes precedence
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }

        if let Ok(file) = std::env::var("FORMGATE_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }

        if let Ok(format) = std::env::var("FORMGATE_LOG_FORMAT") {
            match LogFormat::parse(&format) {
                Some(format) => self.format = format,
                None => {
                    return Err(Error::config(format!(
                        "Invalid log format: {}, using default",
                        format
                    )))
                }
            }
        }
        Ok(())
    }

    fn writer(&self) -> Result<BoxMakeWriter> {
        match &self.file {
            Some(path) => {
                let file_name = path
                    .file_name()
                    .ok_or_else(|| Error::config(format!("Invalid log file {}", path.display())))?;
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."));
                std::fs::create_dir_all(&dir)?;
                Ok(BoxMakeWriter::new(tracing_appender::rolling::never(
                    dir, file_name,
                )))
            }
            None if self.console => Ok(BoxMakeWriter::new(std::io::stderr)),
            None => Ok(BoxMakeWriter::new(std::io::sink)),
        }
    }

    fn use_ansi(&self) -> bool {
        self.file.is_none()
            && self.console
            && self.format != LogFormat::Json
            && std::io::stderr().is_terminal()
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::config(format!("Invalid log filter '{}': {}", config.level, e)))?;
    let writer = config.writer()?;
    let ansi = config.use_ansi();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_ansi(ansi)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let installed = match config.format {
        LogFormat::Compact => tracing::subscriber::set_global_default(builder.compact().finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
        LogFormat::Full => tracing::subscriber::set_global_default(builder.finish()),
    };
    installed.map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    let request_id = generate_request_id();
    REQUEST_ID
        .set(request_id.clone())
        .map_err(|_| Error::other("Request ID already initialized"))?;

    tracing::debug!(
        request_id = %request_id,
        level = %config.level,
        format = ?config.format,
        "Logging system initialized"
    );

    Ok(())
}

/// Generate a unique request ID for this invocation
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Get the current request ID
pub fn current_request_id() -> Option<&'static str> {
    REQUEST_ID.get().map(|s| s.as_str())
}

/// Create a span with request ID and timing
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        request_id = current_request_id().unwrap_or("unknown"),
        details = details.unwrap_or(""),
        duration_ms = field::Empty,
    )
}

/// Sensitive data redaction utilities
pub mod redaction {
    use regex::Regex;
    use serde_json::Value;
    use std::sync::OnceLock;

    static PASSWORD_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

    const MASK: &str = "***";

    fn password_regex() -> Option<&'static Regex> {
        PASSWORD_REGEX
            .get_or_init(|| {
                Regex::new(r#"(?i)("?(?:password|passwd|pwd)"?)(\s*[=:]\s*)("[^"]*"|[^\s,}]+)"#).ok()
            })
            .as_ref()
    }

    /// Redact password assignments (`password=...`, `"password": "..."`) in free text
    pub fn redact_sensitive(input: &str) -> String {
        match password_regex() {
            Some(regex) => regex
                .replace_all(input, |caps: &regex::Captures<'_>| {
                    format!("{}{}\"{}\"", &caps[1], &caps[2], MASK)
                })
                .into_owned(),
            None => input.to_string(),
        }
    }

    /// Redact sensitive fields from JSON values, in place
    pub fn redact_json_value(value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    if is_sensitive_key(key) {
                        *val = Value::String(MASK.to_string());
                    } else {
                        redact_json_value(val);
                    }
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    redact_json_value(item);
                }
            }
            Value::String(s) => {
                *s = redact_sensitive(s);
            }
            _ => {}
        }
    }

    /// Redacted copy of a JSON value
    pub fn redacted(value: &Value) -> Value {
        let mut copy = value.clone();
        redact_json_value(&mut copy);
        copy
    }

    fn is_sensitive_key(key: &str) -> bool {
        let key_lower = key.to_lowercase();
        key_lower.contains("password")
            || key_lower.contains("passwd")
            || key_lower.contains("secret")
            || key_lower.contains("token")
    }
}

/// Performance timing utilities
pub mod timing {
    use std::time::Instant;
    use tracing::Span;

    /// A timer that logs its duration when dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, None),
                operation: operation.to_string(),
            }
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, Some(details)),
                operation: operation.to_string(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);

            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed"
            );
        }
    }
}
