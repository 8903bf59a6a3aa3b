//! Request interceptors wrapped around the handlers.
//!
//! Two interceptors make up the chain, outermost first:
//!
//! ```text
//! request ──► base_middleware ──► post_middleware ──► handler
//!             (every route)       (token routes)
//! ```
//!
//! - [`base_middleware`] decorates every response with the CORS and content
//!   type headers, whatever the status.
//! - [`post_middleware`] lets only `POST` through and answers everything else
//!   with an empty `404 Not Found`.

use axum::{extract::Request, middleware::Next, response::Response};
use http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};

use crate::error::ServiceError;

/// Value of `Access-Control-Allow-Origin`.
pub const ALLOW_ORIGIN: &str = "*";

/// Value of `Access-Control-Allow-Headers`.
pub const ALLOW_HEADERS: &str =
    "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// Value of `Content-Type`.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Overwrite the baseline headers on `headers`.
pub fn apply_base_headers(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
}

/// Decorate every response with the baseline headers.
///
/// Never fails and never short-circuits.
pub async fn base_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply_base_headers(response.headers_mut());
    response
}

/// Only let `POST` requests reach the wrapped handler.
///
/// Any other method gets `404 Not Found` rather than `405`.
pub async fn post_middleware(request: Request, next: Next) -> Result<Response, ServiceError> {
    if request.method() != Method::POST {
        return Err(ServiceError::RouteNotFound {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
        });
    }

    Ok(next.run(request).await)
}
