//! In-memory content and offers providers.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use tracing::info;

use super::{ContentSource, OffersSource};
use crate::error::ContentError;

/// File name of the index page inside a content directory.
pub const INDEX_FILE: &str = "index.html";

/// File name of the display page inside a content directory.
pub const DISPLAY_FILE: &str = "display.html";

const DEFAULT_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Offers</title></head>
<body>
<h1>Offers</h1>
<p>POST /v1/token to obtain a token, then POST it back as the <code>token</code> form field.</p>
</body>
</html>
"#;

const DEFAULT_DISPLAY: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Offers - Display</title></head>
<body>
<h1>Display</h1>
</body>
</html>
"#;

// =============================================================================
// StaticContent
// =============================================================================

/// Page bodies held in memory.
#[derive(Debug, Clone)]
pub struct StaticContent {
    index: Bytes,
    display: Bytes,
}

impl StaticContent {
    pub fn new(index: impl Into<Bytes>, display: impl Into<Bytes>) -> Self {
        Self {
            index: index.into(),
            display: display.into(),
        }
    }

    /// Load `index.html` and `display.html` from `dir`.
    ///
    /// Files are read once; later edits on disk are not picked up.
    pub async fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ContentError> {
        let dir = dir.as_ref();
        let index = read_file(&dir.join(INDEX_FILE)).await?;
        let display = read_file(&dir.join(DISPLAY_FILE)).await?;

        info!(dir = %dir.display(), "Loaded page content");
        Ok(Self::new(index, display))
    }
}

impl Default for StaticContent {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX, DEFAULT_DISPLAY)
    }
}

#[async_trait]
impl ContentSource for StaticContent {
    async fn index(&self) -> Result<Bytes, ContentError> {
        Ok(self.index.clone())
    }

    async fn display(&self) -> Result<Bytes, ContentError> {
        Ok(self.display.clone())
    }
}

// =============================================================================
// StaticOffers
// =============================================================================

/// A fixed offers payload.
#[derive(Debug, Clone)]
pub struct StaticOffers {
    payload: serde_json::Value,
}

impl StaticOffers {
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }

    /// Load the payload from a JSON file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let data = read_file(path).await?;
        let payload = serde_json::from_slice(&data)
            .map_err(|e| ContentError::InvalidPayload(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), "Loaded offers payload");
        Ok(Self::new(payload))
    }
}

impl Default for StaticOffers {
    fn default() -> Self {
        Self::new(json!({ "offers": [] }))
    }
}

#[async_trait]
impl OffersSource for StaticOffers {
    async fn offers(&self) -> Result<serde_json::Value, ContentError> {
        Ok(self.payload.clone())
    }
}

async fn read_file(path: &Path) -> Result<Bytes, ContentError> {
    tokio::fs::read(path)
        .await
        .map(Bytes::from)
        .map_err(|e| ContentError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
