//! Authentication module
//!
//! Supports: no auth, HTTP Basic, caller-managed bearer tokens, and IAM
//! API keys.
//!
//! The `Authenticator` handles all auth types and caches IAM access tokens
//! until shortly before they expire.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{iam_token_url, AuthConfig, CachedToken, DEFAULT_IAM_URL, IAM_TOKEN_PATH};
