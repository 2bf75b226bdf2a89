//! # list2gether-services
//!
//! Typed wrappers for every list2gether backend endpoint.
//!
//! Each service function takes an [`ApiClient`](list2gether_client::ApiClient), attaches
//! the stored bearer token, and returns a typed DTO or a
//! [`ClientError`](list2gether_client::ClientError). Expired tokens are refreshed by the
//! client; services never deal with it.
//!
//! ## Modules
//!
//! - [`auth`]: login, registration, logout, profile
//! - [`lists`]: the caller's lists, create, join, leave, delete
//! - [`movies`]: list entries, status and rating updates, reordering
//! - [`comments`]: comments on entries
//! - [`recommendations`]: titles suggested from a list
//! - [`search`]: catalogue search and the debounced [`SearchSession`]
//!
//! ## Example
//!
//! ```ignore
//! use list2gether_services::{auth, lists};
//!
//! auth::login(&client, "ana@example.com", "hunter22").await?;
//! let page = lists::get_user_lists(&client, Default::default()).await?;
//! for list in page.lists {
//!     println!("{} ({} entries)", list.name, list.movie_count);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod comments;
pub mod lists;
pub mod movies;
pub mod recommendations;
pub mod search;
pub mod types;

pub use search::{SearchOutcome, SearchSession};
pub use types::{
    ListRole, MediaType, MessageResponse, MovieStatus, PageParams, Pagination, UserSummary,
};
