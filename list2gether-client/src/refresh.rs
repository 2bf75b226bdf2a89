//! Single-flight access token refresh.
//!
//! When several requests hit an expired token at the same time they must not each mint
//! a new one. [`RefreshCoordinator`] keeps at most one refresh in flight; every caller
//! that arrives while it is pending awaits the same shared future and observes the same
//! outcome.
//!
//! The refresh runs on its own task, so it settles and persists the new tokens even when
//! every caller waiting on it is dropped. The pending slot is filled before that task
//! starts and emptied by the task when it settles, success or failure. A stale
//! completion never clears a newer refresh because slots are tagged with a generation id.

use futures::future::{BoxFuture, FutureExt, Shared};
use list2gether_core::{ApiErrorPayload, CredentialStore};
use parking_lot::Mutex;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::response::RawResponse;

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Body of a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// New access token.
    pub access_token: String,
    /// Rotated refresh token, when the server issues one.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Access token expiry as a Unix timestamp.
    #[serde(default)]
    pub access_token_expires_at: Option<i64>,
}

/// Why a refresh did not produce a new access token.
///
/// Cloneable so every waiter on a shared refresh receives it.
#[derive(Debug, Clone, Error)]
pub enum RefreshFailure {
    /// No refresh token is stored; nothing was sent.
    #[error("No refresh token stored")]
    MissingRefreshToken,

    /// The refresh endpoint rejected the token.
    #[error("Refresh rejected with status {status}")]
    Rejected {
        /// HTTP status of the refresh response.
        status: u16,
        /// Error body of the refresh response.
        payload: Option<ApiErrorPayload>,
    },

    /// The refresh request never got a response.
    #[error("Refresh request failed: {0}")]
    Transport(String),

    /// The refresh response was not a valid token body.
    #[error("Invalid refresh response: {0}")]
    InvalidResponse(String),

    /// The new tokens could not be stored.
    #[error("Failed to store refreshed tokens: {0}")]
    Storage(String),

    /// The refresh task panicked or was aborted before settling.
    #[error("Refresh task did not complete: {0}")]
    Interrupted(String),
}

impl RefreshFailure {
    /// HTTP status of the refresh response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Outcome shared between all waiters of one refresh.
pub type RefreshOutcome = Result<String, RefreshFailure>;

type SharedRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

struct Pending {
    id: u64,
    future: SharedRefresh,
}

/// Keeps at most one token refresh in flight.
#[derive(Default)]
pub struct RefreshCoordinator {
    slot: Arc<Mutex<Option<Pending>>>,
    next_id: AtomicU64,
}

impl fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl RefreshCoordinator {
    /// Create an idle coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Join the in-flight refresh, or start one with `start`.
    ///
    /// `start` is only called when no refresh is pending. The operation it returns is
    /// spawned onto the runtime, so dropping the returned future does not cancel it.
    pub async fn run<F, Fut>(&self, start: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome> + Send + 'static,
    {
        let shared = {
            let mut slot = self.slot.lock();
            match slot.as_ref() {
                Some(pending) => {
                    debug!(refresh_id = pending.id, "Joining in-flight token refresh");
                    pending.future.clone()
                }
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let weak_slot = Arc::downgrade(&self.slot);
                    let operation = start();
                    debug!(refresh_id = id, "Starting token refresh");

                    let task = tokio::spawn(async move {
                        let _release = ReleaseOnDrop {
                            slot: weak_slot,
                            id,
                        };
                        operation.await
                    });
                    let future = async move {
                        task.await.unwrap_or_else(|e| {
                            warn!(refresh_id = id, error = %e, "Token refresh task failed");
                            Err(RefreshFailure::Interrupted(e.to_string()))
                        })
                    }
                    .boxed()
                    .shared();

                    *slot = Some(Pending {
                        id,
                        future: future.clone(),
                    });
                    future
                }
            }
        };
        shared.await
    }
}

/// Empties the pending slot when the refresh task ends, including by panic.
struct ReleaseOnDrop {
    slot: Weak<Mutex<Option<Pending>>>,
    id: u64,
}

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        let mut slot = slot.lock();
        if slot.as_ref().is_some_and(|pending| pending.id == self.id) {
            *slot = None;
        }
    }
}

/// Owns everything needed to perform one refresh, independent of the client.
#[derive(Debug, Clone)]
pub(crate) struct Refresher {
    pub http: Client,
    pub config: ClientConfig,
    pub credentials: CredentialStore,
}

impl Refresher {
    /// Exchange the stored refresh token for a new access token.
    ///
    /// On success the new tokens are stored. On any failure all credentials are cleared,
    /// since the session cannot be recovered.
    pub async fn refresh(self) -> RefreshOutcome {
        let outcome = self.exchange().await;
        match outcome {
            Ok(ref tokens) => {
                if let Err(e) = self
                    .credentials
                    .store_refreshed_tokens(&tokens.access_token, tokens.refresh_token.as_deref())
                {
                    warn!(error = %e, "Failed to store refreshed tokens");
                    self.clear_credentials();
                    return Err(RefreshFailure::Storage(e.to_string()));
                }
                info!(
                    rotated = tokens.refresh_token.is_some(),
                    expires_in = tokens.expires_in,
                    "Access token refreshed"
                );
                Ok(tokens.access_token.clone())
            }
            Err(failure) => {
                warn!(error = %failure, "Token refresh failed, clearing credentials");
                self.clear_credentials();
                Err(failure)
            }
        }
    }

    async fn exchange(&self) -> Result<TokenResponse, RefreshFailure> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .ok_or(RefreshFailure::MissingRefreshToken)?;

        let body = serde_json::json!({ "refresh_token": refresh_token });
        let response = self
            .http
            .post(self.config.url_for(REFRESH_PATH))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;

        let raw = RawResponse::read(response)
            .await
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;

        if !raw.is_success() {
            return Err(RefreshFailure::Rejected {
                status: raw.status,
                payload: raw.error_payload(),
            });
        }

        let tokens: Option<TokenResponse> = raw
            .json()
            .map_err(|e| RefreshFailure::InvalidResponse(e.to_string()))?;
        let tokens = tokens.ok_or_else(|| {
            RefreshFailure::InvalidResponse("response is not JSON".to_string())
        })?;
        if tokens.access_token.is_empty() {
            return Err(RefreshFailure::InvalidResponse(
                "empty access token".to_string(),
            ));
        }
        Ok(tokens)
    }

    fn clear_credentials(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear credentials");
        }
    }
}
