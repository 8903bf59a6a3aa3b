//! Router configuration for the offers service.
//!
//! # Route Structure
//!
//! ```text
//! /                      - Index page (GET)
//! <display-endpoint>     - Display page (GET)
//! /v1/token              - Issue token / redeem for offers (POST only)
//! /v1/token/display      - Redeem for redirect to display (POST only)
//! ```
//!
//! Every route, and the 404 fallback, runs behind `base_middleware`. The two
//! token routes additionally run behind `post_middleware`.
//!
//! # Example
//!
//! ```ignore
//! use offer_gate::content::{StaticContent, StaticOffers};
//! use offer_gate::server::routes::{create_router, RouterConfig};
//!
//! let config = RouterConfig::new().with_display_endpoint("/show");
//! let router = create_router(StaticContent::default(), StaticOffers::default(), config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

use axum::{middleware, routing::any, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{
    display_handler, index_handler, not_found_handler, offers_handler, token_endpoint_handler,
    AppState, DEFAULT_DISPLAY_ENDPOINT, INDEX_PATH, TOKEN_DISPLAY_PATH, TOKEN_PATH,
};
use super::middleware::{base_middleware, post_middleware};
use crate::content::{ContentSource, OffersSource, StaticContent, StaticOffers};
use crate::token::TokenStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Path the display page is served on and redirected to
    pub display_endpoint: String,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration with defaults:
    /// display page on `/display`, tracing enabled.
    pub fn new() -> Self {
        Self {
            display_endpoint: DEFAULT_DISPLAY_ENDPOINT.to_string(),
            enable_tracing: true,
        }
    }

    /// Serve the display page on `endpoint`.
    pub fn with_display_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.display_endpoint = endpoint.into();
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// Check that the configured display endpoint can be routed.
    pub fn validate(&self) -> Result<(), String> {
        validate_display_endpoint(&self.display_endpoint)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `endpoint` is a literal absolute path that does not shadow
/// another route.
pub fn validate_display_endpoint(endpoint: &str) -> Result<(), String> {
    if !endpoint.starts_with('/') {
        return Err(format!(
            "display endpoint must start with '/', got '{}'",
            endpoint
        ));
    }

    if [INDEX_PATH, TOKEN_PATH, TOKEN_DISPLAY_PATH].contains(&endpoint) {
        return Err(format!(
            "display endpoint '{}' collides with a built-in route",
            endpoint
        ));
    }

    if endpoint
        .chars()
        .any(|c| matches!(c, '{' | '}' | '*' | '?' | '#') || c.is_whitespace())
    {
        return Err(format!(
            "display endpoint '{}' must be a literal path",
            endpoint
        ));
    }

    // axum 0.8 panics on `:` segments left over from 0.7 capture syntax
    if endpoint.split('/').any(|segment| segment.starts_with(':')) {
        return Err(format!(
            "display endpoint '{}' has a segment starting with ':'",
            endpoint
        ));
    }

    Ok(())
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router with a fresh token store.
///
/// # Panics
///
/// Panics if the display endpoint is not a valid route; check it with
/// [`RouterConfig::validate`] first.
pub fn create_router<C, O>(content: C, offers: O, config: RouterConfig) -> Router
where
    C: ContentSource + 'static,
    O: OffersSource + 'static,
{
    create_router_with_tokens(TokenStore::new(), content, offers, config)
}

/// Create the application router around an existing token store.
///
/// The caller keeps a clone of `tokens` and sees every issuance made through
/// the router.
pub fn create_router_with_tokens<C, O>(
    tokens: TokenStore,
    content: C,
    offers: O,
    config: RouterConfig,
) -> Router
where
    C: ContentSource + 'static,
    O: OffersSource + 'static,
{
    let app_state = AppState::new(content, offers)
        .with_tokens(tokens)
        .with_display_endpoint(config.display_endpoint.as_str());

    // Method gate only wraps matched token routes; unmatched paths still fall
    // through to the fallback.
    let token_routes = Router::new()
        .route(TOKEN_PATH, any(token_endpoint_handler::<C, O>))
        .route(TOKEN_DISPLAY_PATH, any(offers_handler::<C, O>))
        .route_layer(middleware::from_fn(post_middleware));

    let static_routes = Router::new()
        .route(INDEX_PATH, any(index_handler::<C, O>))
        .route(&config.display_endpoint, any(display_handler::<C, O>));

    let router = Router::new()
        .merge(token_routes)
        .merge(static_routes)
        .fallback(not_found_handler)
        .with_state(app_state)
        .layer(middleware::from_fn(base_middleware));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Create a router with built-in content, empty offers and default settings.
pub fn create_default_router() -> Router {
    create_router(
        StaticContent::default(),
        StaticOffers::default(),
        RouterConfig::new(),
    )
}

// =============================================================================
// Tests
// =============================================================================
