//! Single-slot store for the current token.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::Token;
use crate::error::TokenError;

/// Holds the one token that is currently accepted.
///
/// Cloning is cheap and every clone shares the same slot. Writers replace the
/// slot wholesale (last writer wins); readers never observe a partially
/// written token.
#[derive(Clone, Default)]
pub struct TokenStore {
    current: Arc<RwLock<Option<Token>>>,
}

impl TokenStore {
    /// Create an empty store. No submission validates until a token is issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new token and make it the current one.
    ///
    /// Every previously issued token stops validating once this returns.
    pub async fn issue(&self) -> Result<Token, TokenError> {
        let token = Token::generate()?;
        let previous = self.replace(token.clone()).await;
        debug!(superseded = previous.is_some(), "Issued new token");
        Ok(token)
    }

    /// Install `token` as current, returning the token it replaced.
    pub async fn replace(&self, token: Token) -> Option<Token> {
        self.current.write().await.replace(token)
    }

    /// The current token, if one has been issued.
    pub async fn current(&self) -> Option<Token> {
        self.current.read().await.clone()
    }

    /// Check a submitted key against the current token.
    pub async fn validate(&self, submitted: &str) -> bool {
        match self.current.read().await.as_ref() {
            Some(token) => token.matches(submitted),
            None => false,
        }
    }
}
