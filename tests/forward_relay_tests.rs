// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic pass-through tests against a mock AmpUp server.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use httpmock::MockServer;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_get_preserves_path_query_and_bearer() {
    let ampup = MockServer::start_async().await;

    let mock = ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/places/3881")
                .query_param("is_public", "false")
                .header("authorization", "Bearer XYZ")
                .header("x-api-version", "2.9.2")
                .header("tz", "-300")
                .header("user-agent", "ampUp/2.9.2")
                .header("accept-language", "en")
                .body("");
            then.status(200)
                .header("content-type", "application/json; charset=utf-8")
                .body(json!({"status": "OK", "data": {"id": 3881}}).to_string());
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/ampup/places/3881?is_public=false")
                .header(header::AUTHORIZATION, "Bearer XYZ")
                .body(Body::from(r#"{"ignored":true}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        common::json_body(response).await,
        json!({"status": "OK", "data": {"id": 3881}})
    );
}

#[tokio::test]
async fn test_missing_authorization_uses_service_credential() {
    let ampup = MockServer::start_async().await;

    let mock = ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/chargers")
                .header("authorization", common::SERVICE_AUTHORIZATION);
            then.status(200)
                .header("content-type", "application/json")
                .body("[]");
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/ampup/chargers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_post_forwards_json_body() {
    let ampup = MockServer::start_async().await;

    let mock = ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/sessions/start")
                .header("content-type", "application/json")
                .json_body(json!({"charger_id": 12, "connector": "A"}));
            then.status(201)
                .header("content-type", "application/json")
                .body(json!({"status": "OK", "data": {"session_id": 99}}).to_string());
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ampup/sessions/start")
                .header(header::AUTHORIZATION, "Bearer XYZ")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"charger_id":12,"connector":"A"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        common::json_body(response).await,
        json!({"status": "OK", "data": {"session_id": 99}})
    );
}

#[tokio::test]
async fn test_empty_body_sent_as_empty_object() {
    let ampup = MockServer::start_async().await;

    let mock = ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::DELETE)
                .path("/favorites/5")
                .json_body(json!({}));
            then.status(200)
                .header("content-type", "application/json")
                .body(json!({"status": "OK"}).to_string());
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/ampup/favorites/5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upstream_json_error_passes_through() {
    let ampup = MockServer::start_async().await;

    let upstream_body = json!({"status": "FAIL", "reason": "Token expired"});
    ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/user");
            then.status(403)
                .header("content-type", "application/json")
                .body(upstream_body.to_string());
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/ampup/user")
                .header(header::AUTHORIZATION, "Bearer stale")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(common::json_body(response).await, upstream_body);
}

#[tokio::test]
async fn test_non_json_response_is_normalized() {
    let ampup = MockServer::start_async().await;

    let html = format!("<html><body>{}</body></html>", "Service Unavailable ".repeat(20));
    ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/places");
            then.status(503)
                .header("content-type", "text/html")
                .body(html.clone());
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/ampup/places")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = common::json_body(response).await;
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["message"], "Non-JSON response received (Status: 503).");
    let raw = body["raw_response"].as_str().unwrap();
    assert_eq!(raw, format!("{}...", &html[..100]));
}

#[tokio::test]
async fn test_trailing_slash_forwards_to_upstream_root() {
    let ampup = MockServer::start_async().await;

    let mock = ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/");
            then.status(200)
                .header("content-type", "application/json")
                .body(json!({"status": "OK"}).to_string());
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/ampup/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    mock.assert_calls_async(1).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::json_body(response).await, json!({"status": "OK"}));
}

#[tokio::test]
async fn test_double_slash_path_kept() {
    let ampup = MockServer::start_async().await;

    let mock = ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("//places");
            then.status(200)
                .header("content-type", "application/json")
                .body("[]");
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/ampup//places")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    mock.assert_calls_async(1).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_head_with_json_content_type_is_not_an_error() {
    let ampup = MockServer::start_async().await;

    let mock = ampup
        .mock_async(|when, then| {
            when.method(httpmock::Method::HEAD).path("/places");
            then.status(200).header("content-type", "application/json");
        })
        .await;

    let app = common::create_test_app(common::test_config(&ampup.base_url(), &ampup.base_url()));
    let response = app
        .oneshot(
            Request::builder()
                .method("HEAD")
                .uri("/api/ampup/places")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    mock.assert_calls_async(1).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_json_body_rejected_without_forwarding() {
    // Upstream is unreachable, so forwarding would turn into a 500.
    let app = common::create_offline_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/ampup/user")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::json_body(response).await,
        json!({"error": "Invalid JSON body"})
    );
}

#[tokio::test]
async fn test_unreachable_upstream_is_proxy_error() {
    let app = common::create_offline_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/ampup/places")
                .header(header::AUTHORIZATION, "Bearer XYZ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::json_body(response).await;
    assert_eq!(body["error"], "Proxy server error");
    assert!(body["details"].is_string());
    assert!(!body["details"].as_str().unwrap().contains("XYZ"));
}
