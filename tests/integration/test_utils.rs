//! Test utilities for integration tests.
//!
//! Mock providers, request builders and response helpers shared by the test
//! modules.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use offer_gate::error::ContentError;
use offer_gate::token::Token;
use offer_gate::{
    create_router_with_tokens, ContentSource, OffersSource, RouterConfig, StaticContent,
    StaticOffers, TokenStore,
};

pub const INDEX_BODY: &str = "<h1>index</h1>";
pub const DISPLAY_BODY: &str = "<h1>display</h1>";

pub fn offers_payload() -> serde_json::Value {
    json!({
        "offers": [
            { "id": 1, "title": "Spring sale", "discount": 20 },
            { "id": 2, "title": "Free shipping", "discount": 0 }
        ]
    })
}

// =============================================================================
// Mock Providers
// =============================================================================

/// Offers source that counts how often it is asked for the payload.
#[derive(Clone)]
pub struct CountingOffers {
    payload: serde_json::Value,
    calls: Arc<AtomicUsize>,
}

impl CountingOffers {
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OffersSource for CountingOffers {
    async fn offers(&self) -> Result<serde_json::Value, ContentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }
}

/// Content and offers source whose every call fails.
pub struct FailingSource;

#[async_trait]
impl ContentSource for FailingSource {
    async fn index(&self) -> Result<Bytes, ContentError> {
        Err(ContentError::Io {
            path: "index.html".to_string(),
            message: "unavailable".to_string(),
        })
    }

    async fn display(&self) -> Result<Bytes, ContentError> {
        Err(ContentError::Io {
            path: "display.html".to_string(),
            message: "unavailable".to_string(),
        })
    }
}

#[async_trait]
impl OffersSource for FailingSource {
    async fn offers(&self) -> Result<serde_json::Value, ContentError> {
        Err(ContentError::InvalidPayload("unavailable".to_string()))
    }
}

// =============================================================================
// Routers
// =============================================================================

/// A router with known content and offers, plus a handle on its token store.
pub fn test_router() -> (Router, TokenStore) {
    test_router_with_config(RouterConfig::new().with_tracing(false))
}

pub fn test_router_with_config(config: RouterConfig) -> (Router, TokenStore) {
    let tokens = TokenStore::new();
    let router = create_router_with_tokens(
        tokens.clone(),
        StaticContent::new(INDEX_BODY, DISPLAY_BODY),
        StaticOffers::new(offers_payload()),
        config,
    );
    (router, tokens)
}

// =============================================================================
// Requests
// =============================================================================

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// POST a URL-encoded form with a single `token` field.
pub fn token_form(uri: &str, token: &str) -> Request<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("token", token)
        .finish();

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Issue a token through the router and decode it from the response body.
pub async fn issue_token(router: &Router) -> Token {
    let response = send(router, request(Method::POST, "/v1/token")).await;
    assert_eq!(response.status(), 200);
    Token::decode(&body_bytes(response).await).unwrap()
}

/// Assert that the three baseline headers are present.
pub fn assert_base_headers<B>(response: &Response<B>) {
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization"
    );
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
}
