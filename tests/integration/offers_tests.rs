//! Offers integration tests.
//!
//! Tests verify:
//! - The current token is served offers on /v1/token
//! - The current token is redirected from /v1/token/display
//! - Wrong, stale and missing tokens are rejected with 401
//! - Reads do not change state

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};

use offer_gate::{
    create_router_with_tokens, RouterConfig, StaticContent, StaticOffers, Token, TokenStore,
};

use super::test_utils::{
    body_bytes, issue_token, offers_payload, send, test_router, test_router_with_config,
    token_form, CountingOffers, FailingSource,
};

// =============================================================================
// Success Paths
// =============================================================================

#[tokio::test]
async fn test_offers_ok() {
    let (router, _) = test_router();
    let token = issue_token(&router).await;

    let response = send(&router, token_form("/v1/token", token.key())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, offers_payload());
}

#[tokio::test]
async fn test_offers_display_redirect() {
    let (router, _) = test_router();
    let token = issue_token(&router).await;

    let response = send(&router, token_form("/v1/token/display", token.key())).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers().get("location").unwrap(), "/display");
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_offers_display_redirect_custom_endpoint() {
    let (router, _) = test_router_with_config(
        RouterConfig::new()
            .with_display_endpoint("/show")
            .with_tracing(false),
    );
    let token = issue_token(&router).await;

    let response = send(&router, token_form("/v1/token/display", token.key())).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers().get("location").unwrap(), "/show");
}

#[tokio::test]
async fn test_offers_with_preinstalled_token() {
    let tokens = TokenStore::new();
    let token = Token::from_key("0123456789abcdef0123456789abcdef01234567").unwrap();
    tokens.replace(token.clone()).await;

    let router = create_router_with_tokens(
        tokens,
        StaticContent::default(),
        StaticOffers::new(offers_payload()),
        RouterConfig::new().with_tracing(false),
    );

    let response = send(&router, token_form("/v1/token", token.key())).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_offers_idempotent() {
    let offers = CountingOffers::new(offers_payload());
    let tokens = TokenStore::new();
    let router = create_router_with_tokens(
        tokens.clone(),
        StaticContent::default(),
        offers.clone(),
        RouterConfig::new().with_tracing(false),
    );
    let token = issue_token(&router).await;

    let first = send(&router, token_form("/v1/token", token.key())).await;
    let second = send(&router, token_form("/v1/token", token.key())).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_bytes(first).await, body_bytes(second).await);

    assert_eq!(offers.calls(), 2);
    assert_eq!(tokens.current().await, Some(token));
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn test_offers_unauthorized() {
    let (router, _) = test_router();
    issue_token(&router).await;

    let response = send(&router, token_form("/v1/token", "wrong")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(response).await.is_empty());

    let response = send(&router, token_form("/v1/token/display", "wrong")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_offers_before_any_issuance() {
    let (router, _) = test_router();

    let response = send(&router, token_form("/v1/token", &"a".repeat(40))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_offers_empty_token() {
    let (router, _) = test_router();
    issue_token(&router).await;

    let response = send(&router, token_form("/v1/token", "")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_superseded_token_rejected() {
    let (router, _) = test_router();
    let old = issue_token(&router).await;
    let new = issue_token(&router).await;

    let response = send(&router, token_form("/v1/token", old.key())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&router, token_form("/v1/token", new.key())).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_display_path_without_token_field() {
    let (router, _) = test_router();
    issue_token(&router).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/token/display")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::empty())
        .unwrap();

    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejected_request_does_not_fetch_offers() {
    let offers = CountingOffers::new(offers_payload());
    let router = create_router_with_tokens(
        TokenStore::new(),
        StaticContent::default(),
        offers.clone(),
        RouterConfig::new().with_tracing(false),
    );
    issue_token(&router).await;

    send(&router, token_form("/v1/token", "wrong")).await;
    send(&router, token_form("/v1/token/display", "wrong")).await;
    assert_eq!(offers.calls(), 0);
}

#[tokio::test]
async fn test_offers_failure_is_server_error() {
    let tokens = TokenStore::new();
    let router = create_router_with_tokens(
        tokens,
        StaticContent::default(),
        FailingSource,
        RouterConfig::new().with_tracing(false),
    );
    let token = issue_token(&router).await;

    let response = send(&router, token_form("/v1/token", token.key())).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}
