//! Entries of a list: movies and series, with per-user status and ratings.

use chrono::{DateTime, Utc};
use list2gether_client::{ApiClient, ClientError, ClientResult, RequestOptions};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::{MediaType, MessageResponse, MovieStatus, PageParams, Pagination, Query, UserSummary};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 10;

/// A genre tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre id.
    pub id: i64,
    /// Genre name, when the server includes it.
    #[serde(default)]
    pub name: Option<String>,
}

/// Title metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Media id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original language.
    #[serde(default)]
    pub original_lang: Option<String>,
    /// Synopsis.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date as sent by the server.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Movie or series.
    pub media_type: MediaType,
    /// Number of seasons, for series.
    #[serde(default)]
    pub seasons_count: Option<u32>,
    /// Number of episodes, for series.
    #[serde(default)]
    pub episodes_count: Option<u32>,
    /// Airing status, for series.
    #[serde(default)]
    pub series_status: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Streaming availability, passed through untyped.
    #[serde(default)]
    pub watch_providers: Option<serde_json::Value>,
}

/// One member's rating and notes for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    /// Member id.
    pub user_id: i64,
    /// Rating, 1 to 10.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// The member.
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// An entry of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMovieItem {
    /// Entry id.
    pub id: i64,
    /// List id.
    pub list_id: i64,
    /// Media id.
    pub movie_id: i64,
    /// Shared watch status.
    pub status: MovieStatus,
    /// Id of the member who added it.
    pub added_by: i64,
    /// The member who added it.
    #[serde(default)]
    pub added_by_user: Option<UserSummary>,
    /// When it was added.
    pub added_at: DateTime<Utc>,
    /// When it was marked watched.
    #[serde(default)]
    pub watched_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Position in the list.
    #[serde(default)]
    pub display_order: Option<i32>,
    /// The caller's rating.
    #[serde(default)]
    pub rating: Option<u8>,
    /// The caller's notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Mean of all members' ratings.
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// The caller's entry.
    #[serde(default)]
    pub your_entry: Option<UserEntry>,
    /// Every member's entry.
    #[serde(default)]
    pub user_entries: Vec<UserEntry>,
    /// Title metadata.
    pub movie: MovieDetails,
}

/// Entries of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMoviesResponse {
    /// Entries.
    pub movies: Vec<ListMovieItem>,
    /// Number of entries returned.
    pub count: usize,
    /// Page metadata, for search results.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// The member who added an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedBy {
    /// Member id.
    pub id: i64,
}

/// An entry as returned right after adding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedMovie {
    /// Media id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Movie or series.
    pub media_type: MediaType,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Release date as sent by the server.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Initial watch status.
    pub status: MovieStatus,
    /// When it was added.
    pub added_at: DateTime<Utc>,
    /// Who added it.
    pub added_by: AddedBy,
    /// Number of seasons, for series.
    #[serde(default)]
    pub seasons_count: Option<u32>,
    /// Number of episodes, for series.
    #[serde(default)]
    pub episodes_count: Option<u32>,
    /// Airing status, for series.
    #[serde(default)]
    pub series_status: Option<String>,
}

/// Envelope of mutation responses: `{ success, message, data }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Whether the server reported success.
    #[serde(default)]
    pub success: bool,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload.
    pub data: T,
}

/// Changes to an entry. At least one field must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieUpdate {
    /// New shared status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MovieStatus>,
    /// The caller's new rating, 1 to 10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl MovieUpdate {
    /// Change the status.
    pub fn status(status: MovieStatus) -> Self {
        Self {
            status: Some(status),
            rating: None,
        }
    }

    /// Change the caller's rating.
    pub fn rating(rating: u8) -> Self {
        Self {
            status: None,
            rating: Some(rating),
        }
    }

    fn validate(&self) -> ClientResult<()> {
        if self.status.is_none() && self.rating.is_none() {
            return Err(ClientError::validation(
                "at least one of status or rating is required",
            ));
        }
        if let Some(rating) = self.rating {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(ClientError::validation(format!(
                    "rating must be between {} and {}",
                    MIN_RATING, MAX_RATING
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieUpdateResult {
    /// List id.
    pub list_id: i64,
    /// Media id.
    pub movie_id: i64,
    /// Title.
    pub title: String,
    /// Movie or series.
    pub media_type: MediaType,
    /// Status before the update.
    #[serde(default)]
    pub old_status: Option<MovieStatus>,
    /// Status after the update.
    pub new_status: MovieStatus,
    /// The caller's rating before the update.
    #[serde(default)]
    pub old_rating: Option<u8>,
    /// The caller's rating after the update.
    #[serde(default)]
    pub new_rating: Option<u8>,
    /// Mean of all members' ratings after the update.
    #[serde(default)]
    pub average_rating: Option<f64>,
}

/// Outcome of a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedMovie {
    /// List id.
    pub list_id: i64,
    /// Media id.
    pub movie_id: i64,
    /// When it was removed.
    pub removed_at: DateTime<Utc>,
}

/// New position of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieOrder {
    /// Media id.
    pub movie_id: i64,
    /// New position.
    pub display_order: i32,
}

fn movies_path(list_id: i64) -> String {
    format!("/api/lists/{}/movies", list_id)
}

/// Entries of a list, optionally filtered by status.
pub async fn get_list_movies(
    client: &ApiClient,
    list_id: i64,
    status: Option<MovieStatus>,
) -> ClientResult<ListMoviesResponse> {
    let mut query = Query::new();
    if let Some(status) = status {
        query.push("status", status.as_str());
    }
    let options = client.authorized(RequestOptions::get());
    client
        .request_required(&query.to_path(&movies_path(list_id)), options)
        .await
}

/// Search the entries of a list by title. The query must have at least two characters.
pub async fn search_list_movies(
    client: &ApiClient,
    list_id: i64,
    text: &str,
    page: PageParams,
) -> ClientResult<ListMoviesResponse> {
    let text = text.trim();
    if text.chars().count() < 2 {
        return Err(ClientError::validation(
            "query must be at least 2 characters",
        ));
    }
    let mut query = Query::new();
    query.push("q", text);
    page.append_to(&mut query);

    let path = format!("{}/search", movies_path(list_id));
    let options = client.authorized(RequestOptions::get());
    client.request_required(&query.to_path(&path), options).await
}

/// Add a movie or series by its catalogue id.
pub async fn add_list_movie(
    client: &ApiClient,
    list_id: i64,
    media_id: i64,
    media_type: MediaType,
) -> ClientResult<DataResponse<AddedMovie>> {
    let options = client
        .authorized(RequestOptions::post())
        .json(json!({ "id": media_id.to_string(), "media_type": media_type }));
    client.request_required(&movies_path(list_id), options).await
}

/// Change an entry's status and/or the caller's rating.
pub async fn update_list_movie(
    client: &ApiClient,
    list_id: i64,
    movie_id: i64,
    update: MovieUpdate,
) -> ClientResult<DataResponse<MovieUpdateResult>> {
    update.validate()?;
    let options = client.authorized(RequestOptions::patch()).body(&update)?;
    client
        .request_required(&format!("{}/{}", movies_path(list_id), movie_id), options)
        .await
}

/// Remove an entry.
pub async fn delete_list_movie(
    client: &ApiClient,
    list_id: i64,
    movie_id: i64,
) -> ClientResult<DataResponse<RemovedMovie>> {
    let options = client.authorized(RequestOptions::delete());
    client
        .request_required(&format!("{}/{}", movies_path(list_id), movie_id), options)
        .await
}

/// Reorder entries. `orders` must not be empty.
pub async fn reorder_list_movies(
    client: &ApiClient,
    list_id: i64,
    orders: &[MovieOrder],
) -> ClientResult<MessageResponse> {
    if orders.is_empty() {
        return Err(ClientError::validation("movie_orders cannot be empty"));
    }
    let options = client
        .authorized(RequestOptions::patch())
        .json(json!({ "movie_orders": orders }));
    client
        .request_required(&format!("{}/reorder", movies_path(list_id)), options)
        .await
}
