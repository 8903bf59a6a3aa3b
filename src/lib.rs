//! # offer-gate
//!
//! A small HTTP service that issues a single-use-at-a-time token and gates an
//! "offers" resource behind it.
//!
//! ## Features
//!
//! - **Token issuance**: `POST /v1/token` returns a fresh 40-character key and
//!   makes it the only key the service accepts
//! - **Token-gated offers**: posting the current key back as the `token` form
//!   field returns the offers payload, or a redirect to the display page
//! - **Static pages**: index and display pages served on exact `GET` matches
//! - **Uniform decoration**: every response carries permissive CORS headers and
//!   `Content-Type: application/json`
//!
//! ## Architecture
//!
//! - [`token`] - Token value type and the single-slot token store
//! - [`content`] - Page and offers providers
//! - [`server`] - Axum handlers, middleware and router
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use offer_gate::{create_router, RouterConfig, StaticContent, StaticOffers};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = create_router(
//!         StaticContent::default(),
//!         StaticOffers::default(),
//!         RouterConfig::new(),
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod token;

// Re-export commonly used types
pub use config::Config;
pub use content::{ContentSource, OffersSource, StaticContent, StaticOffers};
pub use error::{ContentError, ServiceError, TokenError};
pub use server::{
    create_default_router, create_router, create_router_with_tokens, decide_offers, AppState,
    OffersOutcome, RouterConfig,
};
pub use token::{Token, TokenStore, KEY_LENGTH};
