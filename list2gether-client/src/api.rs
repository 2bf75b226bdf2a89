//! The authenticated JSON request client.
//!
//! Every backend call goes through [`ApiClient::request_json`]. The pipeline is linear:
//!
//! 1. send the request
//! 2. on `401`/`403` with code `TOKEN_INVALID`, refresh the access token once
//!    (joining a refresh that is already in flight)
//! 3. retry the original request with the new bearer token
//! 4. parse the JSON body, or return `None` when the response is not JSON
//!
//! Any other failure is returned as-is with its status and payload.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::refresh::{RefreshCoordinator, RefreshOutcome, Refresher};
use crate::request::RequestOptions;
use crate::response::RawResponse;
use list2gether_core::{ApiErrorPayload, AuthEvents, CredentialStore};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the list2gether backend.
///
/// Cheap to clone; clones share credentials and the refresh coordinator.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    config: ClientConfig,
    http: Client,
    credentials: CredentialStore,
    refresh: RefreshCoordinator,
}

impl ApiClient {
    /// Create a client. Fails if the base URL is not an http(s) URL.
    pub fn new(config: ClientConfig, credentials: CredentialStore) -> ClientResult<Self> {
        config.validate()?;
        let http = config.build_http_client()?;
        Ok(Self::with_http_client(config, http, credentials))
    }

    /// Create a client around an existing reqwest client.
    pub fn with_http_client(
        config: ClientConfig,
        http: Client,
        credentials: CredentialStore,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                http,
                credentials,
                refresh: RefreshCoordinator::new(),
            }),
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Stored credentials.
    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    /// Credential change notifications.
    pub fn events(&self) -> &AuthEvents {
        self.inner.credentials.events()
    }

    /// Whether a token refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh.is_pending()
    }

    /// Drop the session. A refresh already in flight settles on its own.
    pub fn reset(&self) -> ClientResult<()> {
        debug!("Resetting session");
        self.inner.credentials.clear()?;
        Ok(())
    }

    /// Attach the stored access token, if any, as a bearer token.
    pub fn authorized(&self, options: RequestOptions) -> RequestOptions {
        match self.inner.credentials.access_token() {
            Some(token) => options.bearer(&token),
            None => options,
        }
    }

    /// Refresh the access token now, or join the refresh already in flight.
    ///
    /// Failure clears all stored credentials.
    pub async fn refresh_session(&self) -> RefreshOutcome {
        let refresher = Refresher {
            http: self.inner.http.clone(),
            config: self.inner.config.clone(),
            credentials: self.inner.credentials.clone(),
        };
        self.inner.refresh.run(move || refresher.refresh()).await
    }

    /// Perform a request and parse its JSON body.
    ///
    /// Returns `Ok(None)` when the success response does not declare JSON content.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<Option<T>> {
        self.dispatch(path, options).await?.json()
    }

    /// Like [`request_json`](Self::request_json), but a missing body is an error.
    pub async fn request_required<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let response = self.dispatch(path, options).await?;
        let status = response.status;
        response
            .json()?
            .ok_or(ClientError::EmptyResponse { status })
    }

    /// Run the request pipeline up to a successful response.
    async fn dispatch(&self, path: &str, options: RequestOptions) -> ClientResult<RawResponse> {
        let url = self.inner.config.url_for(path);

        let response = self.execute(&url, &options).await?;
        if response.is_success() {
            return Ok(response);
        }

        let status = response.status;
        let payload = response.error_payload();
        if !should_refresh(status, payload.as_ref()) {
            return Err(ClientError::api(status, payload));
        }

        debug!(status, url = %url, "Access token rejected, refreshing");
        let refreshed = match options.cancel {
            Some(ref cancel) => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        debug!(url = %url, "Request cancelled while waiting for refresh");
                        return Err(ClientError::Cancelled);
                    }
                    outcome = self.refresh_session() => outcome,
                }
            }
            None => self.refresh_session().await,
        };
        let token = match refreshed {
            Ok(token) => token,
            Err(failure) => {
                warn!(status, error = %failure, "Refresh failed, giving up on request");
                return Err(ClientError::api(status, payload));
            }
        };

        let options = options.bearer(&token);
        let retry = self.execute(&url, &options).await?;
        if retry.is_success() {
            return Ok(retry);
        }

        let retry_payload = retry.error_payload();
        if is_auth_failure(retry.status, retry_payload.as_ref()) {
            warn!(status = retry.status, url = %url, "Retry rejected after refresh, clearing credentials");
            if let Err(e) = self.inner.credentials.clear() {
                warn!(error = %e, "Failed to clear credentials");
            }
        }
        Err(ClientError::api(retry.status, retry_payload))
    }

    /// Send once and buffer the response. Honors the caller's cancellation token.
    async fn execute(&self, url: &str, options: &RequestOptions) -> ClientResult<RawResponse> {
        let mut request = self
            .inner
            .http
            .request(options.method.clone(), url)
            .headers(options.effective_headers());
        if let Some(ref body) = options.body {
            request = request.body(serde_json::to_vec(body).map_err(ClientError::Serialize)?);
        }

        debug!(method = %options.method, url = %url, "Making HTTP request");

        let send = async {
            let response = request.send().await?;
            RawResponse::read(response).await
        };

        let response = match options.cancel {
            Some(ref cancel) => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        debug!(url = %url, "Request cancelled");
                        return Err(ClientError::Cancelled);
                    }
                    result = send => result?,
                }
            }
            None => send.await?,
        };

        debug!(status = response.status, url = %url, "Received response");
        Ok(response)
    }
}

/// `401` or `403` carrying `TOKEN_INVALID`.
fn should_refresh(status: u16, payload: Option<&ApiErrorPayload>) -> bool {
    matches!(status, 401 | 403) && payload.is_some_and(ApiErrorPayload::is_token_invalid)
}

/// Any `401`, or a `403` whose code starts with `TOKEN`.
fn is_auth_failure(status: u16, payload: Option<&ApiErrorPayload>) -> bool {
    match status {
        401 => true,
        403 => payload.is_some_and(ApiErrorPayload::has_token_code),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list2gether_core::{keys, AuthEvent, KeyValueStore, MemoryStore, StoredUser};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, ApiClient, Arc<MemoryStore>) {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let credentials = CredentialStore::new(store.clone(), AuthEvents::new());
        let config = ClientConfig::new().with_base_url(server.uri());
        let client = ApiClient::new(config, credentials).unwrap();
        (server, client, store)
    }

    fn sign_in(client: &ApiClient) {
        client
            .credentials()
            .set_credentials("stale", "refresh-1", &StoredUser::new(1, "ana", "ana@example.com"))
            .unwrap();
    }

    fn token_invalid() -> Value {
        json!({ "error": "token expired", "code": "TOKEN_INVALID" })
    }

    async fn mount_refresh(server: &MockServer, response: ResponseTemplate, expected: u64) {
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(body_json(json!({ "refresh_token": "refresh-1" })))
            .respond_with(response)
            .expect(expected)
            .mount(server)
            .await;
    }

    fn refreshed() -> ResponseTemplate {
        ResponseTemplate::new(200)
            .set_body_json(json!({ "access_token": "new", "refresh_token": "new-r", "expires_in": 900 }))
    }

    async fn refresh_calls(server: &MockServer) -> usize {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/auth/refresh")
            .count()
    }

    #[tokio::test]
    async fn test_stale_token_is_refreshed_transparently() {
        let (server, client, _store) = setup().await;
        sign_in(&client);
        let mut events = client.events().subscribe();

        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401).set_body_json(token_invalid()))
            .expect(1)
            .mount(&server)
            .await;
        mount_refresh(&server, refreshed(), 1).await;
        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer new"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "lists": [{ "id": 1 }] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let body: Option<Value> = client
            .request_json("/api/lists", client.authorized(RequestOptions::get()))
            .await
            .unwrap();

        assert_eq!(body, Some(json!({ "lists": [{ "id": 1 }] })));
        assert_eq!(client.credentials().access_token().as_deref(), Some("new"));
        assert_eq!(client.credentials().refresh_token().as_deref(), Some("new-r"));
        assert!(client.credentials().user().is_some());
        assert_eq!(events.try_recv().unwrap(), AuthEvent::TokensRefreshed);
        assert!(!client.is_refreshing());
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_refresh() {
        let (server, client, _store) = setup().await;
        sign_in(&client);

        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401).set_body_json(token_invalid()))
            .mount(&server)
            .await;
        mount_refresh(&server, refreshed().set_delay(Duration::from_millis(300)), 1).await;
        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lists": [] })))
            .expect(5)
            .mount(&server)
            .await;

        let requests = (0..5).map(|_| {
            let client = client.clone();
            async move {
                client
                    .request_json::<Value>("/api/lists", client.authorized(RequestOptions::get()))
                    .await
            }
        });
        let results = futures::future::join_all(requests).await;

        for result in results {
            assert_eq!(result.unwrap(), Some(json!({ "lists": [] })));
        }
        assert_eq!(refresh_calls(&server).await, 1);
        assert!(!client.is_refreshing());
    }

    #[tokio::test]
    async fn test_success_without_json_is_none() {
        let (server, client, _store) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/api/lists/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let deleted: Option<Value> = client
            .request_json("api/lists/7", RequestOptions::delete())
            .await
            .unwrap();
        assert_eq!(deleted, None);

        let health: Option<Value> = client
            .request_json("/health", RequestOptions::get())
            .await
            .unwrap();
        assert_eq!(health, None);
    }

    #[tokio::test]
    async fn test_request_required_rejects_empty_body() {
        let (server, client, _store) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/api/lists/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = client
            .request_required::<Value>("/api/lists/7", RequestOptions::delete())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse { status: 204 }));
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_credentials() {
        let (server, client, store) = setup().await;
        sign_in(&client);
        let mut events = client.events().subscribe();

        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .respond_with(ResponseTemplate::new(403).set_body_json(token_invalid()))
            .mount(&server)
            .await;
        mount_refresh(
            &server,
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": "invalid refresh token", "code": "TOKEN_INVALID" })),
            1,
        )
        .await;

        let err = client
            .request_json::<Value>("/api/lists", client.authorized(RequestOptions::get()))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "token expired");
        assert_eq!(err.code(), Some("TOKEN_INVALID"));
        assert!(store.is_empty());
        assert!(!client.credentials().is_authenticated());
        assert_eq!(events.try_recv().unwrap(), AuthEvent::CredentialsCleared);
    }

    #[tokio::test]
    async fn test_missing_refresh_token_skips_network() {
        let (server, client, store) = setup().await;
        store.set(keys::ACCESS_TOKEN, "stale".to_string()).unwrap();

        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .respond_with(ResponseTemplate::new(401).set_body_json(token_invalid()))
            .mount(&server)
            .await;
        mount_refresh(&server, refreshed(), 0).await;

        let err = client
            .request_json::<Value>("/api/lists", client.authorized(RequestOptions::get()))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(store.is_empty());
    }

    #[rstest]
    #[case::unauthorized(401, json!({ "error": "nope", "code": "UNAUTHORIZED" }), true)]
    #[case::unauthorized_without_body(401, Value::Null, true)]
    #[case::forbidden_token_code(403, json!({ "error": "nope", "code": "TOKEN_EXPIRED" }), true)]
    #[case::forbidden_other_code(403, json!({ "error": "not a member", "code": "FORBIDDEN" }), false)]
    #[case::server_error(500, json!({ "error": "boom" }), false)]
    #[tokio::test]
    async fn test_retry_failure_cleanup(
        #[case] status: u16,
        #[case] body: Value,
        #[case] cleared: bool,
    ) {
        let (server, client, _store) = setup().await;
        sign_in(&client);

        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401).set_body_json(token_invalid()))
            .mount(&server)
            .await;
        mount_refresh(&server, refreshed(), 1).await;
        let retry = if body.is_null() {
            ResponseTemplate::new(status)
        } else {
            ResponseTemplate::new(status).set_body_json(body.clone())
        };
        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer new"))
            .respond_with(retry)
            .expect(1)
            .mount(&server)
            .await;

        let err = client
            .request_json::<Value>("/api/lists", client.authorized(RequestOptions::get()))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(status));
        assert_eq!(err.payload().is_some(), !body.is_null());
        assert_eq!(client.credentials().is_authenticated(), !cleared);
        if !cleared {
            assert_eq!(client.credentials().access_token().as_deref(), Some("new"));
        }
    }

    #[rstest]
    #[case::not_found(404, json!({ "error": "List not found", "code": "NOT_FOUND" }))]
    #[case::server_error(500, json!({ "error": "Internal server error", "code": "INTERNAL_ERROR" }))]
    #[case::unauthorized_other_code(401, json!({ "error": "Missing token", "code": "UNAUTHORIZED" }))]
    #[case::forbidden_other_code(403, json!({ "error": "Forbidden", "code": "FORBIDDEN" }))]
    #[tokio::test]
    async fn test_non_matching_errors_pass_through(#[case] status: u16, #[case] body: Value) {
        let (server, client, _store) = setup().await;
        sign_in(&client);

        Mock::given(method("GET"))
            .and(path("/api/lists/9"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;
        mount_refresh(&server, refreshed(), 0).await;

        let err = client
            .request_json::<Value>("/api/lists/9", client.authorized(RequestOptions::get()))
            .await
            .unwrap_err();

        let expected: ApiErrorPayload = serde_json::from_value(body).unwrap();
        assert_eq!(err.status(), Some(status));
        assert_eq!(err.payload(), Some(&expected));
        assert_eq!(client.credentials().access_token().as_deref(), Some("stale"));
        assert_eq!(refresh_calls(&server).await, 0);
    }

    #[tokio::test]
    async fn test_non_json_error_gets_generic_message() {
        let (server, client, _store) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client
            .request_json::<Value>("/api/lists", RequestOptions::get())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert!(err.payload().is_none());
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[tokio::test]
    async fn test_refresh_keeps_refresh_token_when_not_rotated() {
        let (server, client, _store) = setup().await;
        sign_in(&client);

        mount_refresh(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "new" })),
            1,
        )
        .await;

        let token = client.refresh_session().await.unwrap();
        assert_eq!(token, "new");
        assert_eq!(client.credentials().refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_body_and_headers_sent() {
        let (server, client, _store) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/lists/join"))
            .and(header("Content-Type", "application/json"))
            .and(header("X-Request-Id", "abc"))
            .and(body_json(json!({ "invite_code": "ABCDE12345" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "your_role": "participant" })))
            .expect(1)
            .mount(&server)
            .await;

        let options = RequestOptions::post()
            .json(json!({ "invite_code": "ABCDE12345" }))
            .header("X-Request-Id", "abc")
            .unwrap();
        let body: Value = client
            .request_required("/api/lists/join", options)
            .await
            .unwrap();
        assert_eq!(body["your_role"], "participant");
    }

    #[tokio::test]
    async fn test_cancelled_request() {
        let (server, client, _store) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/search/media"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "results": [] }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = client
            .request_json::<Value>(
                "/api/search/media?q=alien",
                RequestOptions::get().cancel_with(cancel),
            )
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.status(), None);
    }

    async fn mount_stale_lists(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401).set_body_json(token_invalid()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_cancel_while_waiting_for_refresh() {
        let (server, client, _store) = setup().await;
        sign_in(&client);
        mount_stale_lists(&server).await;
        mount_refresh(&server, refreshed().set_delay(Duration::from_millis(500)), 1).await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let started = tokio::time::Instant::now();
        let err = client
            .request_json::<Value>(
                "/api/lists",
                client.authorized(RequestOptions::get()).cancel_with(cancel),
            )
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(started.elapsed() < Duration::from_millis(400));

        // the refresh itself still completes and is stored
        tokio::time::sleep(Duration::from_millis(800)).await;
        assert!(!client.is_refreshing());
        assert_eq!(client.credentials().access_token().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_abandoned_request_still_stores_refresh() {
        let (server, client, _store) = setup().await;
        sign_in(&client);
        mount_stale_lists(&server).await;
        mount_refresh(&server, refreshed().set_delay(Duration::from_millis(200)), 1).await;

        let abandoned = tokio::time::timeout(
            Duration::from_millis(100),
            client.request_json::<Value>("/api/lists", client.authorized(RequestOptions::get())),
        )
        .await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(refresh_calls(&server).await, 1);
        assert!(!client.is_refreshing());
        assert_eq!(client.credentials().access_token().as_deref(), Some("new"));
        assert_eq!(client.credentials().refresh_token().as_deref(), Some("new-r"));
    }

    #[tokio::test]
    async fn test_token_invalid_without_message_still_refreshes() {
        let (server, client, _store) = setup().await;
        sign_in(&client);

        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer stale"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({ "code": "TOKEN_INVALID", "details": null })),
            )
            .mount(&server)
            .await;
        mount_refresh(&server, refreshed(), 1).await;
        Mock::given(method("GET"))
            .and(path("/api/lists"))
            .and(header("Authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lists": [] })))
            .mount(&server)
            .await;

        let body: Option<Value> = client
            .request_json("/api/lists", client.authorized(RequestOptions::get()))
            .await
            .unwrap();

        assert_eq!(body, Some(json!({ "lists": [] })));
    }

    #[tokio::test]
    async fn test_transport_error_has_no_status() {
        let store = Arc::new(MemoryStore::new());
        let credentials = CredentialStore::new(store, AuthEvents::new());
        let config = ClientConfig::new().with_base_url("http://127.0.0.1:1");
        let client = ApiClient::new(config, credentials).unwrap();

        let err = client
            .request_json::<Value>("/api/lists", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.status(), None);
        assert!(err.payload().is_none());
    }

    #[tokio::test]
    async fn test_reset_clears_session() {
        let (_server, client, store) = setup().await;
        sign_in(&client);

        client.reset().unwrap();
        assert!(store.is_empty());
        assert!(!client.authorized(RequestOptions::get()).has_authorization());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()), AuthEvents::new());
        let result = ApiClient::new(ClientConfig::new().with_base_url("ftp://files"), credentials);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[rstest]
    #[case(401, Some("TOKEN_INVALID"), true)]
    #[case(403, Some("TOKEN_INVALID"), true)]
    #[case(401, Some("TOKEN_EXPIRED"), false)]
    #[case(401, None, false)]
    #[case(404, Some("TOKEN_INVALID"), false)]
    fn test_should_refresh(#[case] status: u16, #[case] code: Option<&str>, #[case] expected: bool) {
        let payload = code.map(|c| ApiErrorPayload::new("x").with_code(c));
        assert_eq!(should_refresh(status, payload.as_ref()), expected);
    }
}
