//! Content providers for the static pages and the offers payload.
//!
//! The HTTP layer never builds page bodies or offers itself; it asks a
//! [`ContentSource`] for the index and display pages and an [`OffersSource`]
//! for the offers payload. Both are invoked with no request-specific input.
//!
//! Two ready-made implementations are provided:
//!
//! - [`StaticContent`]: page bodies held in memory, optionally loaded once from
//!   a directory containing `index.html` and `display.html`
//! - [`StaticOffers`]: a fixed JSON payload, optionally loaded from a file

mod fixed;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ContentError;

pub use fixed::{StaticContent, StaticOffers, DISPLAY_FILE, INDEX_FILE};

/// Provides the bodies of the index and display pages.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Body served for `GET /`.
    async fn index(&self) -> Result<Bytes, ContentError>;

    /// Body served for `GET <display-endpoint>`.
    async fn display(&self) -> Result<Bytes, ContentError>;
}

/// Provides the offers payload served to holders of the current token.
#[async_trait]
pub trait OffersSource: Send + Sync {
    /// The offers payload as a JSON value.
    async fn offers(&self) -> Result<serde_json::Value, ContentError>;
}
