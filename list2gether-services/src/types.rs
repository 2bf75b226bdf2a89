//! Types shared across services.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Kind of media tracked in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// A movie.
    Movie,
    /// A TV series.
    Tv,
}

impl MediaType {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Watch status of a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieStatus {
    /// Not watched yet.
    NotWatched,
    /// Currently watching.
    Watching,
    /// Finished.
    Watched,
    /// Gave up.
    Dropped,
}

impl MovieStatus {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotWatched => "not_watched",
            Self::Watching => "watching",
            Self::Watched => "watched",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller's role in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListRole {
    /// Created the list.
    Owner,
    /// Joined through an invite code.
    Participant,
}

impl ListRole {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Participant => "participant",
        }
    }
}

/// Page metadata returned by paginated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of items.
    pub total: u64,
    /// Page size the server applied.
    pub limit: u32,
    /// Offset the server applied.
    pub offset: u32,
    /// Whether another page exists.
    pub has_more: bool,
}

/// Optional `limit`/`offset` query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Page size.
    pub limit: Option<u32>,
    /// Items to skip.
    pub offset: Option<u32>,
}

impl PageParams {
    /// A page of `limit` items starting at `offset`.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    pub(crate) fn append_to(&self, query: &mut Query) {
        query.push_nonzero("limit", self.limit);
        query.push_nonzero("offset", self.offset);
    }
}

/// Another user as embedded in list, movie, and comment payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id.
    pub id: i64,
    /// Display name.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Generic `{ success, message }` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the server reported success.
    #[serde(default)]
    pub success: bool,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Server timestamp, when sent.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Query string builder. Values are form-encoded; empty queries add nothing to the path.
#[derive(Debug, Default)]
pub(crate) struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    /// Skip missing and zero values, which the backend treats as "use the default".
    pub fn push_nonzero(&mut self, key: &'static str, value: Option<u32>) {
        if let Some(n) = value.filter(|n| *n > 0) {
            self.push(key, n.to_string());
        }
    }

    pub fn to_path(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        format!("{}?{}", path, serializer.finish())
    }
}
