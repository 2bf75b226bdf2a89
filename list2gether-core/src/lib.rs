//! # list2gether-core
//!
//! Core types shared by every list2gether crate.
//!
//! - **Errors**: the structured API error payload returned by the backend
//! - **Storage**: a persistent key-value store (the native stand-in for browser storage)
//! - **Credentials**: the access token / refresh token / cached user triple
//! - **Events**: change notifications emitted whenever credentials are written or cleared
//! - **Preferences**: the persisted UI language choice
//!
//! ## Example
//!
//! ```rust
//! use list2gether_core::{AuthEvent, AuthEvents, CredentialStore, MemoryStore, StoredUser};
//! use std::sync::Arc;
//!
//! let events = AuthEvents::new();
//! let mut rx = events.subscribe();
//! let store = CredentialStore::new(Arc::new(MemoryStore::new()), events);
//!
//! let user = StoredUser::new(1, "ana", "ana@example.com");
//! store.set_credentials("access", "refresh", &user).unwrap();
//!
//! assert!(store.is_authenticated());
//! assert_eq!(rx.try_recv().unwrap(), AuthEvent::CredentialsStored);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod credentials;
pub mod errors;
pub mod events;
pub mod preferences;
pub mod storage;

pub use credentials::{CredentialStore, StoredUser};
pub use errors::{ApiErrorPayload, StorageError, TOKEN_CODE_PREFIX, TOKEN_INVALID};
pub use events::{AuthEvent, AuthEvents};
pub use preferences::{Language, Preferences};
pub use storage::{keys, JsonFileStore, KeyValueStore, MemoryStore, StorageResult};
