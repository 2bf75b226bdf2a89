//! Recommendations generated from a list's entries.

use chrono::{DateTime, Utc};
use list2gether_client::{ApiClient, ClientResult, RequestOptions};
use serde::{Deserialize, Serialize};

use crate::movies::Genre;
use crate::types::{MediaType, Query};

/// Largest `limit` the server honors.
pub const MAX_RECOMMENDATIONS: u32 = 50;

/// A recommended title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Media id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Movie or series.
    pub media_type: MediaType,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Synopsis.
    #[serde(default)]
    pub overview: Option<String>,
    /// Relevance to the list.
    pub score: f64,
    /// Catalogue popularity.
    pub popularity: f64,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Recommendations for a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    /// Recommended titles, best first.
    pub recommendations: Vec<Recommendation>,
    /// Number of recommendations.
    pub count: usize,
    /// When they were generated.
    pub generated_at: DateTime<Utc>,
}

/// Recommendations for a list. The server needs at least two entries to produce any.
///
/// `limit` is capped at [`MAX_RECOMMENDATIONS`]; `None` or zero uses the server default
/// of 15.
pub async fn get_list_recommendations(
    client: &ApiClient,
    list_id: i64,
    limit: Option<u32>,
) -> ClientResult<RecommendationsResponse> {
    let mut query = Query::new();
    query.push_nonzero("limit", limit.map(|n| n.min(MAX_RECOMMENDATIONS)));

    let options = client.authorized(RequestOptions::get());
    client
        .request_required(
            &query.to_path(&format!("/api/lists/{}/recommendations", list_id)),
            options,
        )
        .await
}
