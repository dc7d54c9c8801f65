// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use ampup_relay::config::Config;
use ampup_relay::routes::create_router;
use ampup_relay::AppState;
use axum::body::Body;
use axum::http::Response;
use std::sync::Arc;
use std::time::Duration;

/// `Authorization` the relay sends when the caller has none (see
/// `Config::test_default`).
#[allow(dead_code)]
pub const SERVICE_AUTHORIZATION: &str = "Basic dGVzdF9jbGllbnQ6dGVzdF9zZWNyZXQ=";

/// Create a test config pointing both upstreams at the given mock origins.
#[allow(dead_code)]
pub fn test_config(ampup_url: &str, identity_url: &str) -> Config {
    Config {
        ampup_base_url: ampup_url.trim_end_matches('/').to_string(),
        identity_toolkit_url: identity_url.trim_end_matches('/').to_string(),
        upstream_timeout: Duration::from_millis(500),
        ..Config::test_default()
    }
}

/// Create a test app from a config.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> axum::Router {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    create_router(state)
}

/// Create a test app with both upstreams unreachable.
#[allow(dead_code)]
pub fn create_offline_test_app() -> axum::Router {
    create_test_app(Config::test_default())
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Response body should be JSON")
}
