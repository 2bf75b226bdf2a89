//! Watchlists: listing, creating, joining, leaving, deleting.

use chrono::{DateTime, Utc};
use list2gether_client::{ApiClient, ClientError, ClientResult, RequestOptions};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::types::{ListRole, MessageResponse, Pagination, Query, UserSummary};

/// Longest list name the backend accepts.
pub const MAX_NAME_LEN: usize = 255;
/// Longest list description the backend accepts.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// A list the caller belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
    /// List id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Code others use to join.
    pub invite_code: String,
    /// The caller's role.
    pub your_role: ListRole,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Number of members.
    pub member_count: u32,
    /// Number of entries.
    pub movie_count: u32,
}

/// A page of the caller's lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListsResponse {
    /// Lists on this page.
    pub lists: Vec<UserList>,
    /// Page metadata.
    pub pagination: Pagination,
}

/// Filters for [`get_user_lists`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Only lists where the caller has this role.
    pub role: Option<ListRole>,
    /// Page size.
    pub limit: Option<u32>,
    /// Items to skip.
    pub offset: Option<u32>,
}

/// A newly created list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedList {
    /// List id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Creator's user id.
    pub created_by: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// The list returned after joining.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedList {
    /// List id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Creator's user id.
    pub created_by: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// The list's creator.
    pub creator: UserSummary,
    /// Number of members, including the caller.
    pub member_count: u32,
}

/// Result of joining a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinListResponse {
    /// Server message. Also sent when the caller was already a member.
    #[serde(default)]
    pub message: Option<String>,
    /// The joined list.
    pub list: JoinedList,
    /// The caller's role.
    pub your_role: ListRole,
}

/// List the caller's lists.
pub async fn get_user_lists(client: &ApiClient, params: ListQuery) -> ClientResult<ListsResponse> {
    let mut query = Query::new();
    if let Some(role) = params.role {
        query.push("role", role.as_str());
    }
    query.push_nonzero("limit", params.limit);
    query.push_nonzero("offset", params.offset);

    let options = client.authorized(RequestOptions::get());
    client.request_required(&query.to_path("/api/lists"), options).await
}

/// Create a list. The name is trimmed and must not be blank.
pub async fn create_list(
    client: &ApiClient,
    name: &str,
    description: Option<&str>,
) -> ClientResult<CreatedList> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(ClientError::validation(format!(
            "name is required and must be 1-{} characters",
            MAX_NAME_LEN
        )));
    }
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN) {
        return Err(ClientError::validation(format!(
            "description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }

    let options = client
        .authorized(RequestOptions::post())
        .json(json!({ "name": name, "description": description }));
    client.request_required("/api/lists", options).await
}

/// Join a list by invite code. The code is trimmed and must not be blank.
pub async fn join_list(client: &ApiClient, invite_code: &str) -> ClientResult<JoinListResponse> {
    let invite_code = invite_code.trim();
    if invite_code.is_empty() {
        return Err(ClientError::validation("invite_code is required"));
    }
    debug!(invite_code, "Joining list");
    let options = client
        .authorized(RequestOptions::post())
        .json(json!({ "invite_code": invite_code }));
    client.request_required("/api/lists/join", options).await
}

/// Delete a list. Only the owner may.
pub async fn delete_list(client: &ApiClient, list_id: i64) -> ClientResult<()> {
    let options = client.authorized(RequestOptions::delete());
    client
        .request_json::<Value>(&format!("/api/lists/{}", list_id), options)
        .await?;
    Ok(())
}

/// Leave a list the caller joined.
pub async fn leave_list(client: &ApiClient, list_id: i64) -> ClientResult<MessageResponse> {
    let options = client.authorized(RequestOptions::post());
    client
        .request_required(&format!("/api/lists/{}/leave", list_id), options)
        .await
}
