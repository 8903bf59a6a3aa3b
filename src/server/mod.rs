//! HTTP server layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │ middleware  │  │  handlers   │  │        routes           │  │
//! │  │ (Base/Post) │  │ (requests)  │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::{
    decide_offers, display_handler, index_handler, not_found_handler, offers_handler,
    token_endpoint_handler, token_handler, AppState, OffersOutcome, DEFAULT_DISPLAY_ENDPOINT,
    INDEX_PATH, TOKEN_DISPLAY_PATH, TOKEN_FIELD, TOKEN_PATH,
};
pub use middleware::{apply_base_headers, base_middleware, post_middleware, ALLOW_HEADERS};
pub use routes::{
    create_default_router, create_router, create_router_with_tokens, validate_display_endpoint,
    RouterConfig,
};
