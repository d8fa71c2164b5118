//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing IAM token refresh.

use super::types::{iam_token_url, AuthConfig, CachedToken};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

const IAM_APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached token for IAM auth
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::NoAuth => Ok(req),

            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::BearerToken { token } => Ok(req.bearer_auth(token)),

            AuthConfig::Iam { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_iam_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange the configured API key for an IAM access token
    async fn fetch_iam_token(&self) -> Result<CachedToken> {
        let AuthConfig::Iam {
            apikey,
            url,
            client_id,
            client_secret,
            scope,
        } = &self.config
        else {
            return Err(Error::auth(
                "Token refresh not supported for this auth type",
            ));
        };

        let token_url = iam_token_url(url.as_deref());
        debug!("Requesting IAM access token from {}", token_url);

        let mut form = vec![
            ("grant_type", IAM_APIKEY_GRANT_TYPE.to_string()),
            ("apikey", apikey.clone()),
            ("response_type", "cloud_iam".to_string()),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope.clone()));
        }

        let mut req = self
            .http_client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&form);

        if let (Some(id), Some(secret)) = (client_id, client_secret) {
            req = req.basic_auth(id, Some(secret));
        }

        let response = req.send().await.map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRequest {
                status,
                message: body,
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }

    /// Clear the cached token, forcing the next request to fetch a new one
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("auth_type", &self.config.auth_type())
            .finish_non_exhaustive()
    }
}

/// IAM token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}
