//! Request options.

use crate::error::{ClientError, ClientResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Options for a single [`ApiClient::request_json`](crate::ApiClient::request_json) call.
///
/// `Content-Type: application/json` is always sent unless a caller header overrides it.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Caller headers. A `Content-Type` here replaces the default.
    pub headers: HeaderMap,
    /// JSON body.
    pub body: Option<serde_json::Value>,
    /// Abort signal.
    pub cancel: Option<CancellationToken>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    /// Options for the given method.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
            cancel: None,
        }
    }

    /// A GET request.
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// A POST request.
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// A PUT request.
    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    /// A PATCH request.
    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    /// A DELETE request.
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Add or replace a header.
    pub fn header(mut self, name: &str, value: &str) -> ClientResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::Config(format!("Invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::Config(format!("Invalid header value for {}: {}", name, e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set `Authorization: Bearer <token>`, replacing any previous value.
    ///
    /// Tokens that are not valid header values are dropped.
    #[must_use]
    pub fn bearer(mut self, token: &str) -> Self {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                self.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("Dropping bearer token that is not a valid header value");
            }
        }
        self
    }

    /// Set a JSON body.
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize a value as the JSON body.
    pub fn body<T: Serialize + ?Sized>(self, body: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(body).map_err(ClientError::Serialize)?;
        Ok(self.json(value))
    }

    /// Abort the request when `token` is cancelled.
    #[must_use]
    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Whether an `Authorization` header is set.
    pub fn has_authorization(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    /// Final header set: caller headers with every value kept, plus the JSON content
    /// type unless the caller set one.
    pub(crate) fn effective_headers(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers
    }
}
