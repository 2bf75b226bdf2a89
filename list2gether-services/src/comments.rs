//! Comments on list entries.

use chrono::{DateTime, Utc};
use list2gether_client::{ApiClient, ClientError, ClientResult, RequestOptions};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::{MessageResponse, PageParams, Pagination, Query, UserSummary};

/// Longest comment the backend accepts, in characters.
pub const MAX_COMMENT_CHARS: usize = 2000;

/// A comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id.
    pub id: i64,
    /// Author id.
    pub user_id: i64,
    /// Text.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
    /// Author.
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// A page of comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsResponse {
    /// Comments on this page.
    pub comments: Vec<Comment>,
    /// Page metadata.
    pub pagination: Pagination,
}

/// A created or edited comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    /// Whether the server reported success.
    #[serde(default)]
    pub success: bool,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// The comment.
    pub comment: Comment,
}

fn comments_path(list_id: i64, movie_id: i64) -> String {
    format!("/api/lists/{}/movies/{}/comments", list_id, movie_id)
}

/// Trim, then reject blank or overlong content.
fn validate_content(content: &str) -> ClientResult<&str> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ClientError::validation("comment must not be blank"));
    }
    if content.chars().count() > MAX_COMMENT_CHARS {
        return Err(ClientError::validation(format!(
            "comment must be at most {} characters",
            MAX_COMMENT_CHARS
        )));
    }
    Ok(content)
}

/// Comments on an entry.
pub async fn get_comments(
    client: &ApiClient,
    list_id: i64,
    movie_id: i64,
    page: PageParams,
) -> ClientResult<CommentsResponse> {
    let mut query = Query::new();
    page.append_to(&mut query);
    let options = client.authorized(RequestOptions::get());
    client
        .request_required(&query.to_path(&comments_path(list_id, movie_id)), options)
        .await
}

/// Comment on an entry.
pub async fn create_comment(
    client: &ApiClient,
    list_id: i64,
    movie_id: i64,
    content: &str,
) -> ClientResult<CommentResponse> {
    let content = validate_content(content)?;
    let options = client
        .authorized(RequestOptions::post())
        .json(json!({ "content": content }));
    client
        .request_required(&comments_path(list_id, movie_id), options)
        .await
}

/// Edit one of the caller's comments.
pub async fn update_comment(
    client: &ApiClient,
    list_id: i64,
    movie_id: i64,
    comment_id: i64,
    content: &str,
) -> ClientResult<CommentResponse> {
    let content = validate_content(content)?;
    let options = client
        .authorized(RequestOptions::patch())
        .json(json!({ "content": content }));
    client
        .request_required(
            &format!("{}/{}", comments_path(list_id, movie_id), comment_id),
            options,
        )
        .await
}

/// Delete one of the caller's comments.
pub async fn delete_comment(
    client: &ApiClient,
    list_id: i64,
    movie_id: i64,
    comment_id: i64,
) -> ClientResult<MessageResponse> {
    let options = client.authorized(RequestOptions::delete());
    client
        .request_required(
            &format!("{}/{}", comments_path(list_id, movie_id), comment_id),
            options,
        )
        .await
}
