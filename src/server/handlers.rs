//! HTTP request handlers for the offers service.
//!
//! # Endpoints
//!
//! - `GET /` - Index page
//! - `GET <display-endpoint>` - Display page
//! - `POST /v1/token` - Issue a token, or redeem one for offers when the form
//!   body carries a `token` field
//! - `POST /v1/token/display` - Redeem a token for a redirect to the display page
//!
//! Every handler terminates either with a response or with a [`ServiceError`],
//! which renders as a bare status code.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use http::{header, HeaderMap, Method, StatusCode, Uri};
use tracing::{debug, error, info, warn};
use url::form_urlencoded;

use crate::content::{ContentSource, OffersSource};
use crate::error::ServiceError;
use crate::token::{Token, TokenStore};

/// Path of the index page.
pub const INDEX_PATH: &str = "/";

/// Path used both to issue tokens and to redeem them for offers.
pub const TOKEN_PATH: &str = "/v1/token";

/// Path that redeems a token for a redirect to the display endpoint.
pub const TOKEN_DISPLAY_PATH: &str = "/v1/token/display";

/// Default path of the display page.
pub const DEFAULT_DISPLAY_ENDPOINT: &str = "/display";

/// Form field carrying a submitted token.
pub const TOKEN_FIELD: &str = "token";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// Passed to all handlers via Axum's State extractor. The token store is the
/// only mutable piece; content and offers providers are read-only.
pub struct AppState<C: ContentSource, O: OffersSource> {
    /// Slot holding the current token
    pub tokens: TokenStore,

    /// Provider of the index and display pages
    pub content: Arc<C>,

    /// Provider of the offers payload
    pub offers: Arc<O>,

    /// Path the display page is served on and redirected to
    pub display_endpoint: Arc<str>,
}

impl<C: ContentSource, O: OffersSource> AppState<C, O> {
    /// Create state with an empty token store and the default display endpoint.
    pub fn new(content: C, offers: O) -> Self {
        Self {
            tokens: TokenStore::new(),
            content: Arc::new(content),
            offers: Arc::new(offers),
            display_endpoint: Arc::from(DEFAULT_DISPLAY_ENDPOINT),
        }
    }

    /// Use an existing token store, sharing its current token.
    pub fn with_tokens(mut self, tokens: TokenStore) -> Self {
        self.tokens = tokens;
        self
    }

    /// Serve the display page on `endpoint` instead of the default.
    pub fn with_display_endpoint(mut self, endpoint: impl Into<Arc<str>>) -> Self {
        self.display_endpoint = endpoint.into();
        self
    }
}

impl<C: ContentSource, O: OffersSource> Clone for AppState<C, O> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            content: Arc::clone(&self.content),
            offers: Arc::clone(&self.offers),
            display_endpoint: Arc::clone(&self.display_endpoint),
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ServiceError to an HTTP response with an empty body.
///
/// - 404s are logged at DEBUG (common and expected)
/// - 401s are logged at WARN (could be probing)
/// - 5xx errors are logged at ERROR
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ServiceError::RouteNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ServiceError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ServiceError::Token(_) => (StatusCode::INTERNAL_SERVER_ERROR, "token_error"),
            ServiceError::Content(_) => (StatusCode::INTERNAL_SERVER_ERROR, "content_error"),
        };

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                self
            );
        } else if status == StatusCode::UNAUTHORIZED {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                self
            );
        } else {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                self
            );
        }

        status.into_response()
    }
}

fn route_not_found(method: &Method, uri: &Uri) -> ServiceError {
    ServiceError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

// =============================================================================
// Offers Decision
// =============================================================================

/// Result of evaluating an offers request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffersOutcome {
    /// Serve the offers payload (200)
    Serve,

    /// Redirect to the display endpoint (301)
    Redirect,

    /// Submitted token is not the current one (401)
    Unauthorized,

    /// Valid token on a path that carries no offers (404)
    NotFound,
}

/// Decide how to answer an offers request.
///
/// Rules are evaluated in order, first match wins:
///
/// 1. `/v1/token/display` with the current token → [`OffersOutcome::Redirect`]
/// 2. `/v1/token` with the current token → [`OffersOutcome::Serve`]
/// 3. anything without the current token → [`OffersOutcome::Unauthorized`]
/// 4. otherwise → [`OffersOutcome::NotFound`]
///
/// A missing submission, or no token having been issued yet, never matches.
pub fn decide_offers(
    path: &str,
    submitted: Option<&str>,
    current: Option<&Token>,
) -> OffersOutcome {
    let valid = match (submitted, current) {
        (Some(submitted), Some(current)) => current.matches(submitted),
        _ => false,
    };

    match (path, valid) {
        (TOKEN_DISPLAY_PATH, true) => OffersOutcome::Redirect,
        (TOKEN_PATH, true) => OffersOutcome::Serve,
        (_, false) => OffersOutcome::Unauthorized,
        (_, true) => OffersOutcome::NotFound,
    }
}

/// Media type a redemption body must be sent as.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Whether the request declares a URL-encoded form body.
fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// Extract the first `token` field from a URL-encoded form body.
///
/// Bodies with any other content type carry no token.
fn submitted_token(headers: &HeaderMap, body: &[u8]) -> Option<String> {
    if !is_form(headers) {
        return None;
    }

    form_urlencoded::parse(body)
        .find(|(key, _)| key == TOKEN_FIELD)
        .map(|(_, value)| value.into_owned())
}

async fn respond_offers<C: ContentSource, O: OffersSource>(
    state: &AppState<C, O>,
    method: &Method,
    uri: &Uri,
    submitted: Option<&str>,
) -> Result<Response, ServiceError> {
    let current = state.tokens.current().await;
    let path = uri.path();

    match decide_offers(path, submitted, current.as_ref()) {
        OffersOutcome::Serve => {
            let payload = state.offers.offers().await?;
            debug!(path = path, "Serving offers");
            Ok(Json(payload).into_response())
        }
        OffersOutcome::Redirect => {
            debug!(
                path = path,
                location = &*state.display_endpoint,
                "Redirecting to display"
            );
            Ok((
                StatusCode::MOVED_PERMANENTLY,
                [(header::LOCATION, state.display_endpoint.to_string())],
            )
                .into_response())
        }
        OffersOutcome::Unauthorized => Err(ServiceError::Unauthorized {
            path: path.to_string(),
        }),
        OffersOutcome::NotFound => Err(route_not_found(method, uri)),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle index page requests.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// - `200 OK`: index content
/// - `404 Not Found`: any other method or path
pub async fn index_handler<C: ContentSource, O: OffersSource>(
    State(state): State<AppState<C, O>>,
    method: Method,
    uri: Uri,
) -> Result<Response, ServiceError> {
    if method != Method::GET || uri.path() != INDEX_PATH {
        return Err(route_not_found(&method, &uri));
    }

    let body = state.content.index().await?;
    Ok(Response::new(Body::from(body)))
}

/// Handle display page requests.
///
/// # Endpoint
///
/// `GET <display-endpoint>`
///
/// # Response
///
/// - `200 OK`: display content
/// - `404 Not Found`: any other method or path
pub async fn display_handler<C: ContentSource, O: OffersSource>(
    State(state): State<AppState<C, O>>,
    method: Method,
    uri: Uri,
) -> Result<Response, ServiceError> {
    if method != Method::GET || uri.path() != &*state.display_endpoint {
        return Err(route_not_found(&method, &uri));
    }

    let body = state.content.display().await?;
    Ok(Response::new(Body::from(body)))
}

/// Issue a new token.
///
/// The new token replaces the current one and is returned as
/// `{"Key": "<40 hex chars>"}` with `200 OK`.
pub async fn token_handler<C: ContentSource, O: OffersSource>(
    State(state): State<AppState<C, O>>,
) -> Result<Response, ServiceError> {
    let token = state.tokens.issue().await?;
    let body = token.encode()?;

    info!("Issued token");
    Ok(Response::new(Body::from(body)))
}

/// Redeem a token submitted as the `token` form field.
///
/// # Response
///
/// - `301 Moved Permanently`: current token on `/v1/token/display`,
///   `Location` points at the display endpoint
/// - `200 OK`: current token on `/v1/token`, body is the offers payload
/// - `401 Unauthorized`: token missing or not current
pub async fn offers_handler<C: ContentSource, O: OffersSource>(
    State(state): State<AppState<C, O>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let submitted = submitted_token(&headers, &body);
    respond_offers(&state, &method, &uri, submitted.as_deref()).await
}

/// Dispatch `POST /v1/token`.
///
/// A URL-encoded form body with a `token` field is an offers request;
/// anything else is a request for a new token.
pub async fn token_endpoint_handler<C: ContentSource, O: OffersSource>(
    state: State<AppState<C, O>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError> {
    match submitted_token(&headers, &body) {
        Some(submitted) => {
            respond_offers(&state.0, &method, &uri, Some(submitted.as_str())).await
        }
        None => token_handler(state).await,
    }
}

/// Fallback for unmatched paths.
pub async fn not_found_handler(method: Method, uri: Uri) -> ServiceError {
    route_not_found(&method, &uri)
}

// =============================================================================
// Tests
// =============================================================================
