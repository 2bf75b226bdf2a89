//! Transparent token refresh against a local fake backend.
//!
//! Five concurrent requests hit an expired access token. The client makes a single call
//! to `/auth/refresh`, stores the rotated tokens, and retries every request.
//!
//! Run with:
//! ```bash
//! RUST_LOG=list2gether_client=debug cargo run --example refresh_flow
//! ```

use list2gether::prelude::*;
use serde_json::json;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server = fake_backend().await;
    let client = list2gether::session::in_memory(ClientConfig::new().with_base_url(server.uri()))?;
    client.credentials().set_credentials(
        "stale",
        "refresh-1",
        &StoredUser::new(1, "ana", "ana@example.com"),
    )?;

    let mut events = client.events().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("auth event: {:?}", event);
        }
    });

    let mut tasks = Vec::new();
    for i in 0..5 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let page = lists::get_user_lists(&client, Default::default()).await?;
            println!("request {} saw {} lists", i, page.lists.len());
            Ok::<_, ClientError>(())
        }));
    }
    for task in tasks {
        task.await??;
    }

    let refreshes = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/auth/refresh")
        .count();
    println!("refresh calls: {}", refreshes);
    println!(
        "stored access token: {}",
        client.credentials().access_token().unwrap_or_default()
    );
    Ok(())
}

async fn fake_backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lists"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "token expired",
            "code": "TOKEN_INVALID"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "access_token": "new",
                    "refresh_token": "new-r",
                    "expires_in": 900
                }))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/lists"))
        .and(header("Authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lists": [],
            "pagination": { "total": 0, "limit": 50, "offset": 0, "has_more": false }
        })))
        .mount(&server)
        .await;

    server
}
