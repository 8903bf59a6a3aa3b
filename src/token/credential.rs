//! The token value type and its JSON wire format.

use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::TokenError;

/// Number of random bytes behind a key.
pub const KEY_BYTES: usize = 20;

/// Length of a hex-encoded key in characters.
pub const KEY_LENGTH: usize = KEY_BYTES * 2;

/// An issued credential.
///
/// Encodes as `{"Key": "<40 hex chars>"}`. Immutable once created; the only
/// ways to obtain one are [`Token::generate`], [`Token::from_key`] and
/// [`Token::decode`], all of which enforce [`KEY_LENGTH`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "Key")]
    key: String,
}

/// Wire shape accepted by [`Token::decode`].
#[derive(Deserialize)]
struct TokenRepr {
    #[serde(rename = "Key", alias = "key")]
    key: String,
}

impl Token {
    /// Generate a fresh token from the operating system RNG.
    pub fn generate() -> Result<Self, TokenError> {
        let mut bytes = [0u8; KEY_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::Entropy(e.to_string()))?;

        Ok(Self {
            key: hex::encode(bytes),
        })
    }

    /// Wrap an existing key, rejecting anything that is not [`KEY_LENGTH`] long.
    pub fn from_key(key: impl Into<String>) -> Result<Self, TokenError> {
        let key = key.into();
        let actual = key.chars().count();
        if actual != KEY_LENGTH {
            return Err(TokenError::InvalidKeyLength {
                expected: KEY_LENGTH,
                actual,
            });
        }
        Ok(Self { key })
    }

    /// The key string.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Compare a submitted key against this token in constant time.
    pub fn matches(&self, submitted: &str) -> bool {
        self.key.as_bytes().ct_eq(submitted.as_bytes()).into()
    }

    /// Encode as a JSON document.
    pub fn encode(&self) -> Result<Vec<u8>, TokenError> {
        serde_json::to_vec(self).map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Decode a JSON document produced by [`Token::encode`].
    ///
    /// Fails on malformed JSON, a missing key field, or a key of the wrong
    /// length. Never returns an empty token.
    pub fn decode(data: &[u8]) -> Result<Self, TokenError> {
        let repr: TokenRepr =
            serde_json::from_slice(data).map_err(|e| TokenError::Decode(e.to_string()))?;
        Self::from_key(repr.key)
    }
}
