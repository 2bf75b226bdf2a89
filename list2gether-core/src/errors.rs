//! Error types shared across list2gether.
//!
//! The backend reports every failure with the same JSON shape:
//!
//! ```json
//! { "error": "Invalid or expired refresh token", "code": "TOKEN_INVALID", "details": [], "timestamp": "2025-01-01T00:00:00Z" }
//! ```
//!
//! [`ApiErrorPayload`] is that shape. Every field is optional on the wire: a body that
//! carries only a `code` still parses, and `"details": null` reads as no details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Error code the backend uses for a missing, expired, or revoked token.
pub const TOKEN_INVALID: &str = "TOKEN_INVALID";

/// Prefix shared by every token-related error code.
pub const TOKEN_CODE_PREFIX: &str = "TOKEN";

/// Structured error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    /// Human-readable message. Empty when the server sent none.
    #[serde(default)]
    pub error: String,
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Additional detail strings (validation messages, upstream errors).
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub details: Vec<String>,
    /// RFC 3339 timestamp of when the server produced the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApiErrorPayload {
    /// Create a payload with just a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            details: Vec::new(),
            timestamp: None,
        }
    }

    /// Set the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add a detail string.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Check the error code.
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }

    /// Whether the server rejected the access token as invalid.
    pub fn is_token_invalid(&self) -> bool {
        self.has_code(TOKEN_INVALID)
    }

    /// Whether the code is any token-related code.
    pub fn has_token_code(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| code.starts_with(TOKEN_CODE_PREFIX))
    }

    /// Parse the timestamp, if present and well-formed.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }
}

impl fmt::Display for ApiErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if !self.details.is_empty() {
            write!(f, ": {}", self.details.join("; "))?;
        }
        Ok(())
    }
}

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a stored value is not valid JSON.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
