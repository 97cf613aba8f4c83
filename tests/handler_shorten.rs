mod common;

use common::{API_TOKEN, HOST, InMemoryShortLinkRepository, UnreachableRepository};
use axum::http::Method;
use serde_json::{Value, json};
use shortlink_api::AppState;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn test_shorten_success() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&json!({ "originalUrl": "https://example.com", "token": API_TOKEN }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    assert_eq!(json["error"], false);
    assert_eq!(json["originalUrl"], "https://example.com");

    let short_url = json["shortUrl"].as_str().unwrap();
    assert_eq!(short_url.len(), 8);
    assert_eq!(
        json["completeUrl"],
        format!("http://{}/{}", HOST, short_url)
    );

    let stored = repo.get(short_url).unwrap();
    assert_eq!(stored.original_url, "https://example.com");
    assert_eq!(
        stored.complete_url,
        Some(format!("http://{}/{}", HOST, short_url))
    );
}

#[tokio::test]
async fn test_shorten_missing_token() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": true, "error_txt": "API Token obrigatório" })
    );
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_empty_token_is_missing() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&json!({ "originalUrl": "https://example.com", "token": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error_txt"], "API Token obrigatório");
}

#[tokio::test]
async fn test_shorten_invalid_token() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&json!({ "originalUrl": "https://example.com", "token": "wrong" }))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": true, "error_txt": "API Token inválido" })
    );
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_token_checked_before_store() {
    let repo = Arc::new(UnreachableRepository::new("connection refused"));
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&json!({ "originalUrl": "https://example.com", "token": "wrong" }))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_shorten_does_not_validate_url() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&json!({ "originalUrl": "definitely not a url", "token": API_TOKEN }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["originalUrl"], "definitely not a url");
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_shorten_without_original_url_fails_to_store() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&json!({ "token": API_TOKEN }))
        .await;

    assert_eq!(response.status_code(), 500);

    let json = response.json::<Value>();
    assert_eq!(json["error"], true);
    assert_eq!(json["error_txt"], "originalUrl is required");
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_store_failure() {
    let repo = Arc::new(UnreachableRepository::new(
        "Timed out connecting to database after 5s",
    ));
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .json(&json!({ "originalUrl": "https://example.com", "token": API_TOKEN }))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": true, "error_txt": "Timed out connecting to database after 5s" })
    );
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .text("{ not json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), 400);

    let json = response.json::<Value>();
    assert_eq!(json["error"], true);
    assert!(json["error_txt"].is_string());
}

#[tokio::test]
async fn test_shorten_uses_forwarded_origin_behind_proxy() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let state = AppState::new(repo, API_TOKEN.to_string(), true);
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Host", "10.0.0.5:3000")
        .add_header("X-Forwarded-Proto", "https")
        .add_header("X-Forwarded-Host", "sho.rt")
        .json(&json!({ "originalUrl": "https://example.com", "token": API_TOKEN }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    let short_url = json["shortUrl"].as_str().unwrap();
    assert_eq!(json["completeUrl"], format!("https://sho.rt/{}", short_url));
}

#[tokio::test]
async fn test_shorten_produces_unique_short_urls() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let mut seen = HashSet::new();

    for i in 0..50 {
        let response = server
            .post("/api/shorten")
            .add_header("Host", HOST)
            .json(&json!({ "originalUrl": format!("https://example.com/{}", i), "token": API_TOKEN }))
            .await;

        assert_eq!(response.status_code(), 201);
        let json = response.json::<Value>();
        assert!(seen.insert(json["shortUrl"].as_str().unwrap().to_string()));
    }

    assert_eq!(repo.len(), 50);
}

#[tokio::test]
async fn test_shorten_same_url_twice_creates_two_links() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    for _ in 0..2 {
        server
            .post("/api/shorten")
            .add_header("Host", HOST)
            .json(&json!({ "originalUrl": "https://example.com", "token": API_TOKEN }))
            .await;
    }

    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_shorten_body_without_json_content_type_is_ignored() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let body = json!({ "originalUrl": "https://example.com", "token": API_TOKEN }).to_string();

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": true, "error_txt": "API Token obrigatório" })
    );
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_preflight_allows_any_origin() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_app_test_server(common::create_test_state(repo));

    let response = server
        .method(Method::OPTIONS, "/api/shorten")
        .add_header("Host", HOST)
        .add_header("Origin", "https://client.example")
        .add_header("Access-Control-Request-Method", "POST")
        .add_header("Access-Control-Request-Headers", "content-type")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_shorten_cross_origin_response_allows_any_origin() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_app_test_server(common::create_test_state(repo));

    let response = server
        .post("/api/shorten")
        .add_header("Host", HOST)
        .add_header("Origin", "https://client.example")
        .json(&json!({ "originalUrl": "https://example.com", "token": API_TOKEN }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_shorten_with_trailing_slash() {
    let repo = Arc::new(InMemoryShortLinkRepository::default());
    let server = common::create_app_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorten/")
        .add_header("Host", HOST)
        .json(&json!({ "originalUrl": "https://example.com", "token": API_TOKEN }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(repo.len(), 1);
}
