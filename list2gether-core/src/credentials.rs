//! Stored credentials.
//!
//! The access token, refresh token, and cached user profile are kept as three flat keys.
//! They are created at login, read on every request, replaced on refresh, and removed
//! together on logout or when a refresh cannot recover the session. Every write or clear
//! emits exactly one [`AuthEvent`].

use crate::events::{AuthEvent, AuthEvents};
use crate::storage::{keys, KeyValueStore, StorageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Cached user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Account creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last profile update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredUser {
    /// Create a user record with the required fields.
    pub fn new(id: i64, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            avatar_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// Credential triple on top of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
    events: AuthEvents,
}

impl CredentialStore {
    /// Wrap a store; `events` receives every change.
    pub fn new(store: Arc<dyn KeyValueStore>, events: AuthEvents) -> Self {
        Self { store, events }
    }

    /// The underlying key-value store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// The change notification emitter.
    pub fn events(&self) -> &AuthEvents {
        &self.events
    }

    /// Current access token.
    pub fn access_token(&self) -> Option<String> {
        self.read(keys::ACCESS_TOKEN)
    }

    /// Current refresh token.
    pub fn refresh_token(&self) -> Option<String> {
        self.read(keys::REFRESH_TOKEN)
    }

    /// Cached user. A record that no longer parses reads as signed out.
    pub fn user(&self) -> Option<StoredUser> {
        let raw = self.read(keys::USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Ignoring unparsable stored user");
                None
            }
        }
    }

    /// Whether an access token is present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Store all three credentials after login or registration.
    pub fn set_credentials(
        &self,
        access_token: &str,
        refresh_token: &str,
        user: &StoredUser,
    ) -> StorageResult<()> {
        let user = serde_json::to_string(user)?;
        self.store.set_many(&[
            (keys::ACCESS_TOKEN, access_token.to_string()),
            (keys::REFRESH_TOKEN, refresh_token.to_string()),
            (keys::USER, user),
        ])?;
        self.events.emit(AuthEvent::CredentialsStored);
        Ok(())
    }

    /// Replace the cached user only.
    pub fn set_user(&self, user: &StoredUser) -> StorageResult<()> {
        self.store.set(keys::USER, serde_json::to_string(user)?)?;
        self.events.emit(AuthEvent::UserUpdated);
        Ok(())
    }

    /// Persist the result of a token refresh.
    ///
    /// The refresh token is only replaced when the server rotated it.
    pub fn store_refreshed_tokens(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> StorageResult<()> {
        let mut entries = vec![(keys::ACCESS_TOKEN, access_token.to_string())];
        if let Some(refresh) = refresh_token {
            entries.push((keys::REFRESH_TOKEN, refresh.to_string()));
        }
        self.store.set_many(&entries)?;
        self.events.emit(AuthEvent::TokensRefreshed);
        Ok(())
    }

    /// Remove all three credentials.
    ///
    /// The notification is emitted even if the store failed, so listeners resync
    /// against whatever state is actually left.
    pub fn clear(&self) -> StorageResult<()> {
        let result = self.store.remove_many(&keys::CREDENTIALS);
        self.events.emit(AuthEvent::CredentialsCleared);
        result
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "Failed to read credential");
                None
            }
        }
    }
}
