//! # list2gether-client
//!
//! The authenticated JSON request client for the list2gether backend.
//!
//! Every backend call goes through [`ApiClient::request_json`], which:
//!
//! - joins the configured base URL and the request path
//! - serializes the body as JSON and sends `Content-Type: application/json`
//! - turns non-success responses into a typed [`ClientError`] with status and payload
//! - refreshes an expired access token once and retries, sharing a single refresh
//!   between all concurrent callers
//!
//! ## Example
//!
//! ```ignore
//! use list2gether_client::{ApiClient, ClientConfig, RequestOptions};
//! use list2gether_core::{AuthEvents, CredentialStore, MemoryStore};
//! use std::sync::Arc;
//!
//! let credentials = CredentialStore::new(Arc::new(MemoryStore::new()), AuthEvents::new());
//! let client = ApiClient::new(ClientConfig::from_env(), credentials)?;
//!
//! let lists: Option<serde_json::Value> = client
//!     .request_json("/api/lists", client.authorized(RequestOptions::get()))
//!     .await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod refresh;
pub mod request;
mod response;

pub use api::ApiClient;
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_ENV};
pub use error::{ClientError, ClientResult};
pub use refresh::{RefreshCoordinator, RefreshFailure, RefreshOutcome, TokenResponse, REFRESH_PATH};
pub use request::RequestOptions;
pub use response::is_json_content_type;

pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        ApiClient, CancellationToken, ClientConfig, ClientError, ClientResult, RequestOptions,
    };
}
