//! Debounced type-ahead search against a local fake backend.
//!
//! Simulates a user typing "alien" one key at a time. Only the last query reaches the
//! server; the earlier ones are superseded.
//!
//! Run with:
//! ```bash
//! cargo run --example search_session
//! ```

use list2gether::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/media"))
        .respond_with(|req: &Request| {
            let query = req
                .url
                .query_pairs()
                .find(|(k, _)| k == "q")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": 348, "name": "Alien", "media_type": "movie" }],
                "total_results": 1,
                "query": query
            }))
        })
        .mount(&server)
        .await;

    let client = list2gether::session::in_memory(ClientConfig::new().with_base_url(server.uri()))?;
    let session = Arc::new(SearchSession::new(client));

    let mut handles = Vec::new();
    for typed in ["a", "al", "ali", "alie", "alien"] {
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            let outcome = session.search(typed).await;
            (typed, outcome)
        }));
        tokio::time::sleep(Duration::from_millis(80)).await;
    }

    for handle in handles {
        let (typed, outcome) = handle.await?;
        match outcome? {
            SearchOutcome::Results(response) => {
                println!("{:>6}: {} result(s)", typed, response.results.len())
            }
            SearchOutcome::Superseded => println!("{:>6}: superseded", typed),
        }
    }

    let sent = server.received_requests().await.unwrap_or_default().len();
    println!("requests sent: {}", sent);
    Ok(())
}
