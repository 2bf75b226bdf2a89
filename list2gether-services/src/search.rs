//! Catalogue search, plus a debounced search session for type-ahead inputs.
//!
//! [`SearchSession`] gives each keystroke its own cancellation token. A new search
//! cancels the previous one whether it is still waiting out the debounce delay or
//! already on the wire; the superseded call resolves to [`SearchOutcome::Superseded`].

use list2gether_client::{ApiClient, CancellationToken, ClientResult, RequestOptions};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::types::{MediaType, Query};

/// Delay between the last keystroke and the request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shortest query, after trimming, that is sent to the server.
pub const MIN_QUERY_CHARS: usize = 2;

/// A catalogue hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Media id.
    pub id: i64,
    /// Localized name.
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Movie or series.
    pub media_type: MediaType,
}

/// Search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Hits.
    pub results: Vec<SearchResult>,
    /// Total hits on the server.
    pub total_results: u64,
    /// The query the server ran.
    pub query: String,
}

impl SearchResponse {
    /// No results for `query`.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Search movies and series.
pub async fn search_media(
    client: &ApiClient,
    query: &str,
    cancel: Option<CancellationToken>,
) -> ClientResult<SearchResponse> {
    let mut params = Query::new();
    params.push("q", query);

    let mut options = client.authorized(RequestOptions::get());
    if let Some(token) = cancel {
        options = options.cancel_with(token);
    }
    client
        .request_required(&params.to_path("/api/search/media"), options)
        .await
}

/// What a [`SearchSession::search`] call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results for this query. Too-short queries yield empty results without a request.
    Results(SearchResponse),
    /// A newer search replaced this one.
    Superseded,
}

impl SearchOutcome {
    /// The results, unless superseded.
    pub fn into_results(self) -> Option<SearchResponse> {
        match self {
            Self::Results(response) => Some(response),
            Self::Superseded => None,
        }
    }
}

/// Debounced search where only the latest query wins.
#[derive(Debug)]
pub struct SearchSession {
    client: ApiClient,
    debounce: Duration,
    current: Mutex<Option<CancellationToken>>,
}

impl SearchSession {
    /// Create a session with the default debounce delay.
    pub fn new(client: ApiClient) -> Self {
        Self::with_debounce(client, DEFAULT_DEBOUNCE)
    }

    /// Create a session with a custom debounce delay.
    pub fn with_debounce(client: ApiClient, debounce: Duration) -> Self {
        Self {
            client,
            debounce,
            current: Mutex::new(None),
        }
    }

    /// Debounce delay.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Search for `query`, superseding any earlier search on this session.
    pub async fn search(&self, query: &str) -> ClientResult<SearchOutcome> {
        let token = self.replace_current();

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchOutcome::Results(SearchResponse::empty(query)));
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(query, "Search superseded while debouncing");
                return Ok(SearchOutcome::Superseded);
            }
            _ = tokio::time::sleep(self.debounce) => {}
        }

        match search_media(&self.client, query, Some(token)).await {
            Ok(response) => Ok(SearchOutcome::Results(response)),
            Err(e) if e.is_cancelled() => {
                debug!(query, "Search superseded in flight");
                Ok(SearchOutcome::Superseded)
            }
            Err(e) => Err(e),
        }
    }

    /// Cancel the pending search, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
    }

    fn replace_current(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            previous.cancel();
        }
        token
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
