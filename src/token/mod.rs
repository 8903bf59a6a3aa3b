//! Token issuance and validation.
//!
//! A [`Token`] is an opaque, fixed-length credential. The service keeps exactly
//! one of them as the "current" token inside a [`TokenStore`]; issuing a new
//! token replaces the previous one, so only the most recently issued key is
//! ever accepted.
//!
//! ```text
//! ┌──────────────┐  issue()   ┌──────────────────────┐  validate()  ┌───────────────┐
//! │ TokenHandler │ ─────────► │      TokenStore      │ ◄─────────── │ OffersHandler │
//! └──────────────┘            │  RwLock<Option<Tok>> │              └───────────────┘
//!                             └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use offer_gate::token::{Token, TokenStore, KEY_LENGTH};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = TokenStore::new();
//!     let token = store.issue().await.unwrap();
//!     assert_eq!(token.key().len(), KEY_LENGTH);
//!
//!     let body = token.encode().unwrap();
//!     assert_eq!(Token::decode(&body).unwrap(), token);
//!
//!     assert!(store.validate(token.key()).await);
//! }
//! ```

mod credential;
mod store;

pub use credential::{Token, KEY_BYTES, KEY_LENGTH};
pub use store::TokenStore;
