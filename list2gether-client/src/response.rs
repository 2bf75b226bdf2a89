//! Buffered responses and payload decoding.

use crate::error::{ClientError, ClientResult};
use list2gether_core::ApiErrorPayload;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub is_json: bool,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Read status, content type, and the whole body.
    pub async fn read(response: Response) -> ClientResult<Self> {
        let status = response.status().as_u16();
        let is_json = is_json_content_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        let body = response.bytes().await?.to_vec();
        Ok(Self {
            status,
            is_json,
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Structured error body. Non-JSON or unparsable bodies yield `None`.
    pub fn error_payload(&self) -> Option<ApiErrorPayload> {
        if !self.is_json {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }

    /// Parse a success body. Responses without a JSON content type yield `None`.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<Option<T>> {
        if !self.is_json {
            return Ok(None);
        }
        serde_json::from_slice(&self.body)
            .map(Some)
            .map_err(ClientError::Decode)
    }
}

/// Whether a `Content-Type` header value declares JSON.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}
