//! Test harness for end-to-end storefront tests.
//!
//! Each test spawns its own placeholder upstream and its own storefront on
//! ephemeral ports, so tests never touch the network and never share a
//! session store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mockshop-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::collections::HashMap;

use axum::{Json, Router, http::StatusCode, routing::get};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use mockshop_storefront::config::StorefrontConfig;
use mockshop_storefront::routes;
use mockshop_storefront::state::AppState;

/// Title given to source record 7, so searches have one unambiguous hit.
pub const UNIQUE_TITLE: &str = "sunflower desk lamp";

/// A running storefront plus a cookie-keeping client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Storefront backed by a healthy upstream serving `records` posts.
    pub async fn new(records: usize) -> Self {
        Self::with_source(&spawn_source(records).await, &[]).await
    }

    /// Storefront backed by an upstream that always fails.
    pub async fn failing_upstream() -> Self {
        let upstream = spawn(failing_router()).await;
        Self::with_source(&format!("{upstream}/posts"), &[]).await
    }

    /// Storefront reading from `source_url`, with extra config variables.
    pub async fn with_source(source_url: &str, vars: &[(&str, &str)]) -> Self {
        let mut env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        env.insert("CATALOG_SOURCE_URL".to_string(), source_url.to_string());
        env.entry("CATALOG_CACHE_TTL_SECS".to_string())
            .or_insert_with(|| "0".to_string());

        let config = StorefrontConfig::from_lookup(|key| env.get(key).cloned())
            .expect("test config is valid");
        let base_url = spawn(routes::app(AppState::new(config))).await;

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// GET a path and return status and body.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("request failed");
        let status = StatusCode::from_u16(resp.status().as_u16()).expect("valid status");
        (status, resp.text().await.expect("Failed to read response"))
    }
}

/// Placeholder posts in the shape of the public list endpoint.
#[must_use]
pub fn source_records(count: usize) -> Value {
    let records: Vec<Value> = (1..=count)
        .map(|id| {
            let title = if id == 7 {
                UNIQUE_TITLE.to_string()
            } else {
                format!("placeholder post {id}")
            };
            json!({
                "userId": 1,
                "id": id,
                "title": title,
                "body": format!("body of post {id}"),
            })
        })
        .collect();
    Value::Array(records)
}

/// Serve `records` placeholder posts and return the list endpoint URL.
pub async fn spawn_source(records: usize) -> String {
    let body = source_records(records);
    let app = Router::new().route("/posts", get(move || async move { Json(body) }));
    format!("{}/posts", spawn(app).await)
}

fn failing_router() -> Router {
    Router::new().route(
        "/posts",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }),
    )
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    format!("http://{addr}")
}

/// The text inside the first `<p class="price">` on a page.
#[must_use]
pub fn first_price(body: &str) -> Option<&str> {
    let start = body.find("class=\"price\">")? + "class=\"price\">".len();
    let rest = body.get(start..)?;
    rest.get(..rest.find('<')?)
}
