//! Client error types.

use list2gether_core::{ApiErrorPayload, StorageError};
use thiserror::Error;

/// Errors returned by the request client and every service built on it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Payload message, or a generic one when there was no payload.
        message: String,
        /// Structured error body, when the response carried one.
        payload: Option<ApiErrorPayload>,
    },

    /// Network or protocol failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The transport gave up waiting for the server.
    #[error("Request timed out")]
    Timeout,

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// A JSON success body did not match the expected type.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A JSON body was required but the response had none.
    #[error("Expected a JSON response body (status {status})")]
    EmptyResponse {
        /// HTTP status code of the empty response.
        status: u16,
    },

    /// Credential storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid client configuration or request options.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(err)
        }
    }
}

impl ClientError {
    /// Build an API error from a status and optional payload.
    ///
    /// The message is the payload's `error` field, falling back to a generic
    /// "Request failed with status N".
    pub fn api(status: u16, payload: Option<ApiErrorPayload>) -> Self {
        let message = payload
            .as_ref()
            .map(|p| p.error.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        Self::Api {
            status,
            message,
            payload,
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status, for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::EmptyResponse { status } => Some(*status),
            _ => None,
        }
    }

    /// Structured error body, if the server sent one.
    pub fn payload(&self) -> Option<&ApiErrorPayload> {
        match self {
            Self::Api { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Machine-readable error code from the payload.
    pub fn code(&self) -> Option<&str> {
        self.payload().and_then(|p| p.code.as_deref())
    }

    /// Whether the server answered 401. Callers use this to send the user back to login.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the caller cancelled the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
