//! # list2gether
//!
//! Client SDK for list2gether, a shared movie and TV watchlist service. Users create or
//! join lists, add titles found through catalogue search, rate and comment on them, and
//! get recommendations.
//!
//! ## Quick Start
//!
//! ```ignore
//! use list2gether::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = list2gether::session::from_env()?;
//!
//!     auth::login(&client, "ana@example.com", "hunter22").await?;
//!     let page = lists::get_user_lists(&client, Default::default()).await?;
//!     println!("{} lists", page.pagination.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Sessions
//!
//! Every call goes through one [`ApiClient`]. When the backend rejects an expired access
//! token the client refreshes it once, shares that refresh between all concurrent
//! requests, and retries. If the session cannot be recovered the stored credentials are
//! cleared and the call fails with a `401`/`403` [`ClientError`]; callers typically send
//! the user back to a login screen.
//!
//! Subscribe to [`ApiClient::events`] to react when credentials are stored, refreshed, or
//! cleared.
//!
//! ## Architecture
//!
//! - [`list2gether_core`] - error payload, credential storage, change notifications
//! - [`list2gether_client`] - the authenticated JSON request client
//! - [`list2gether_services`] - typed backend endpoints and debounced search

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod session;

/// Core types, storage, and notifications.
pub use list2gether_core as core;
/// The authenticated request client.
pub use list2gether_client as client;
/// Typed backend services.
pub use list2gether_services as services;

pub use list2gether_client::{
    ApiClient, CancellationToken, ClientConfig, ClientError, ClientResult, RequestOptions,
};
pub use list2gether_core::{
    ApiErrorPayload, AuthEvent, AuthEvents, CredentialStore, JsonFileStore, KeyValueStore,
    Language, MemoryStore, Preferences, StoredUser,
};
pub use list2gether_services::{
    auth, comments, lists, movies, recommendations, search, SearchOutcome, SearchSession,
};

/// Convenient prelude for common imports.
///
/// ```ignore
/// use list2gether::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        auth, comments, lists, movies, recommendations, search, ApiClient, AuthEvent,
        ClientConfig, ClientError, ClientResult, RequestOptions, SearchOutcome, SearchSession,
        StoredUser,
    };
    pub use list2gether_services::{ListRole, MediaType, MovieStatus, PageParams};
}

/// Returns the current version of list2gether.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
