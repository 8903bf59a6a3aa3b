use thiserror::Error;

/// Errors produced while creating, encoding or decoding a token.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// Payload is not well-formed JSON or has no key field
    #[error("Failed to decode token: {0}")]
    Decode(String),

    /// Decoded key does not have the fixed key length
    #[error("Invalid key length: expected {expected} characters, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Token could not be serialized
    #[error("Failed to encode token: {0}")]
    Encode(String),

    /// The random source could not produce key material
    #[error("Random source unavailable: {0}")]
    Entropy(String),
}

/// Errors returned by content and offers providers.
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    /// Underlying file could not be read
    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },

    /// Offers payload is not valid JSON
    #[error("Invalid offers payload: {0}")]
    InvalidPayload(String),
}

/// Errors a request handler can terminate with.
///
/// Each variant maps to exactly one HTTP status and is always rendered with an
/// empty body.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Wrong method or unmatched path (404)
    #[error("Route not found: {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// Submitted token does not match the current token (401)
    #[error("Unauthorized token submission on {path}")]
    Unauthorized { path: String },

    /// Token issuance failed (500)
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// A content provider failed (500)
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}
