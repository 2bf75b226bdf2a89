//! Credential change notifications.
//!
//! Any part of an application that shows who is signed in (a header, a profile menu)
//! subscribes here and resynchronizes when credentials change, instead of polling storage.

use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 32;

/// What changed in the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthEvent {
    /// Access token, refresh token, and user were written after login.
    CredentialsStored,
    /// A refresh replaced the access token (and possibly the refresh token).
    TokensRefreshed,
    /// Only the cached user profile changed.
    UserUpdated,
    /// All credentials were removed.
    CredentialsCleared,
}

/// Broadcast emitter for [`AuthEvent`]s.
///
/// Clones share the same channel. Emitting with no subscribers is not an error.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthEvent>,
}

impl AuthEvents {
    /// Create a new emitter.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    /// Notify all current subscribers.
    pub fn emit(&self, event: AuthEvent) {
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(?event, receivers, "Auth state changed");
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}
