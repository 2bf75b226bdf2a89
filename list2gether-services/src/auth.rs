//! Authentication endpoints.
//!
//! [`login`] and [`update_profile`] persist what the server returns. [`logout`] always
//! clears local credentials, whatever the server says.

use list2gether_client::{ApiClient, ClientError, ClientResult, RequestOptions, TokenResponse};
use list2gether_core::StoredUser;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// The signed-in user.
    pub user: StoredUser,
    /// Bearer credential.
    pub access_token: String,
    /// Credential used to mint new access tokens.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Access token expiry as a Unix timestamp.
    #[serde(default)]
    pub access_token_expires_at: Option<i64>,
}

/// New account details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Response carrying a user, optionally with a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// The user.
    pub user: StoredUser,
}

/// Profile changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub username: String,
    /// New avatar URL.
    pub avatar_url: String,
}

/// Log in and store the returned credentials.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> ClientResult<LoginResponse> {
    let options = RequestOptions::post().json(json!({ "email": email, "password": password }));
    let response: LoginResponse = client.request_required("/auth/login", options).await?;

    client.credentials().set_credentials(
        &response.access_token,
        &response.refresh_token,
        &response.user,
    )?;
    info!(user_id = response.user.id, "Logged in");
    Ok(response)
}

/// Create an account. Does not sign in.
pub async fn register(client: &ApiClient, body: &RegisterRequest) -> ClientResult<UserResponse> {
    let options = RequestOptions::post().body(body)?;
    client.request_required("/auth/register", options).await
}

/// Exchange a refresh token directly, without touching stored credentials.
pub async fn refresh(client: &ApiClient, refresh_token: &str) -> ClientResult<TokenResponse> {
    let options = RequestOptions::post().json(json!({ "refresh_token": refresh_token }));
    client.request_required("/auth/refresh", options).await
}

/// Revoke the session on the server and clear local credentials.
///
/// Without a stored refresh token nothing is sent. Local credentials are cleared even when
/// the server call fails; that failure is still returned.
pub async fn logout(client: &ApiClient) -> ClientResult<Option<String>> {
    let Some(refresh_token) = client.credentials().refresh_token() else {
        client.reset()?;
        return Ok(None);
    };

    let options = client
        .authorized(RequestOptions::post())
        .json(json!({ "refresh_token": refresh_token }));
    let result = client
        .request_json::<UserMessage>("/auth/logout", options)
        .await;

    client.reset()?;
    match result {
        Ok(body) => {
            info!("Logged out");
            Ok(body.and_then(|b| b.message))
        }
        Err(e) => {
            warn!(error = %e, "Server logout failed, local session cleared anyway");
            Err(e)
        }
    }
}

/// Fetch the signed-in user.
pub async fn me(client: &ApiClient) -> ClientResult<StoredUser> {
    let options = client.authorized(RequestOptions::get());
    let response: UserResponse = client.request_required("/auth/me", options).await?;
    Ok(response.user)
}

/// Update the profile and store the returned user.
pub async fn update_profile(
    client: &ApiClient,
    body: &UpdateProfileRequest,
) -> ClientResult<UserResponse> {
    if body.username.trim().is_empty() {
        return Err(ClientError::validation("username must not be blank"));
    }
    let options = client.authorized(RequestOptions::put()).body(body)?;
    let response: UserResponse = client.request_required("/auth/profile", options).await?;
    client.credentials().set_user(&response.user)?;
    Ok(response)
}

#[derive(Debug, Deserialize)]
struct UserMessage {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mock_client, signed_in_client};
    use list2gether_core::AuthEvent;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn user_json() -> serde_json::Value {
        json!({
            "id": 7,
            "username": "ana",
            "email": "ana@example.com",
            "avatar_url": null,
            "created_at": "2025-01-10T12:00:00Z",
            "updated_at": "2025-01-10T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_login_persists_credentials() {
        let (server, client) = mock_client().await;
        let mut events = client.events().subscribe();

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "email": "ana@example.com", "password": "hunter22" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Login successful",
                "user": user_json(),
                "access_token": "acc",
                "refresh_token": "ref",
                "expires_in": 900
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = login(&client, "ana@example.com", "hunter22").await.unwrap();

        assert_eq!(response.user.username, "ana");
        assert_eq!(client.credentials().access_token().as_deref(), Some("acc"));
        assert_eq!(client.credentials().refresh_token().as_deref(), Some("ref"));
        assert_eq!(client.credentials().user().map(|u| u.id), Some(7));
        assert_eq!(events.try_recv().unwrap(), AuthEvent::CredentialsStored);
    }

    #[tokio::test]
    async fn test_login_failure_stores_nothing() {
        let (server, client) = mock_client().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "Invalid credentials",
                "code": "INVALID_CREDENTIALS"
            })))
            .mount(&server)
            .await;

        let err = login(&client, "ana@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.code(), Some("INVALID_CREDENTIALS"));
        assert!(!client.credentials().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let (server, client) = signed_in_client().await;

        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .and(header("Authorization", "Bearer access-1"))
            .and(body_json(json!({ "refresh_token": "refresh-1" })))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
            .expect(1)
            .mount(&server)
            .await;

        let err = logout(&client).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!client.credentials().is_authenticated());
        assert!(client.credentials().user().is_none());
    }

    #[tokio::test]
    async fn test_logout_without_refresh_token_sends_nothing() {
        let (server, client) = mock_client().await;

        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert_eq!(logout(&client).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_returns_message() {
        let (server, client) = signed_in_client().await;

        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": "Logged out successfully" })),
            )
            .mount(&server)
            .await;

        let message = logout(&client).await.unwrap();
        assert_eq!(message.as_deref(), Some("Logged out successfully"));
        assert!(!client.credentials().is_authenticated());
    }

    #[tokio::test]
    async fn test_update_profile_persists_user() {
        let (server, client) = signed_in_client().await;

        Mock::given(method("PUT"))
            .and(path("/auth/profile"))
            .and(body_json(json!({ "username": "ana.b", "avatar_url": "https://img/a.png" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Profile updated successfully",
                "user": {
                    "id": 7,
                    "username": "ana.b",
                    "email": "ana@example.com",
                    "avatar_url": "https://img/a.png"
                }
            })))
            .mount(&server)
            .await;

        let body = UpdateProfileRequest {
            username: "ana.b".into(),
            avatar_url: "https://img/a.png".into(),
        };
        update_profile(&client, &body).await.unwrap();

        let stored = client.credentials().user().unwrap();
        assert_eq!(stored.username, "ana.b");
        assert_eq!(stored.avatar_url.as_deref(), Some("https://img/a.png"));
    }

    #[tokio::test]
    async fn test_me() {
        let (server, client) = signed_in_client().await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("Authorization", "Bearer access-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
            .mount(&server)
            .await;

        let user = me(&client).await.unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert!(user.created_at.is_some());
    }
}
