//! HTTP client with optional retries
//!
//! Provides the transport shared by every service:
//! - Path template resolution against the service URL
//! - SDK and default headers
//! - Authentication via [`Authenticator`]
//! - Opt-in retries with capped backoff
//! - Mapping of non-2xx responses to [`Error::HttpStatus`]

use super::request::{user_agent, DetailedResponse, ServiceRequest};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Service URL that request paths are resolved against
    pub service_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Whether failed requests are retried
    pub enable_retries: bool,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for a single retry
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Skip TLS certificate verification
    pub disable_ssl_verification: bool,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            timeout: Duration::from_secs(60),
            enable_retries: false,
            max_retries: 4,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            backoff_type: BackoffType::Exponential,
            disable_ssl_verification: false,
            default_headers: HashMap::new(),
            user_agent: user_agent(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the service URL
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.config.service_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enable retries with the given maximum number of attempts after the first
    pub fn enable_retries(mut self, max_retries: u32) -> Self {
        self.config.enable_retries = true;
        self.config.max_retries = max_retries;
        self
    }

    /// Disable retries
    pub fn disable_retries(mut self) -> Self {
        self.config.enable_retries = false;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Skip TLS certificate verification
    pub fn disable_ssl_verification(mut self, disable: bool) -> Self {
        self.config.disable_ssl_verification = disable;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Authenticated HTTP transport shared by the service clients
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(config.disable_ssl_verification)
            .build()?;

        Ok(Self {
            client,
            config,
            authenticator: None,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_authenticator(auth_config);
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, auth_config: AuthConfig) {
        self.authenticator = Some(Authenticator::with_client(auth_config, self.client.clone()));
    }

    /// Get the authenticator, if one is configured
    pub fn authenticator(&self) -> Option<&Authenticator> {
        self.authenticator.as_ref()
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Get the service URL
    pub fn service_url(&self) -> Option<&str> {
        self.config.service_url.as_deref()
    }

    /// Send a request and decode the JSON body
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: ServiceRequest,
    ) -> Result<DetailedResponse<T>> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        let result = serde_json::from_slice(&bytes)
            .map_err(|e| Error::decode(format!("unexpected response body: {e}")))?;

        Ok(DetailedResponse {
            result,
            status,
            headers,
        })
    }

    /// Send a request, retrying when enabled
    pub async fn send(&self, request: ServiceRequest) -> Result<Response> {
        let url = self.build_url(&request)?;
        let max_retries = if self.config.enable_retries {
            self.config.max_retries
        } else {
            0
        };

        let mut attempt = 0;

        loop {
            let req = self.build_request(&request, &url).await?;

            let error = match req.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        debug!("{} {} -> {}", request.method, url, status.as_u16());
                        return Ok(response);
                    }

                    let retry_after = extract_retry_after(&response);
                    let body = response.text().await.unwrap_or_default();
                    let error = Error::http_status(status.as_u16(), body);

                    if error.is_retryable() && attempt < max_retries {
                        let delay = retry_after
                            .map(|secs| std::cmp::min(Duration::from_secs(secs), self.config.max_backoff))
                            .unwrap_or_else(|| self.calculate_backoff(attempt));
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    error
                }
                Err(e) if e.is_timeout() => Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                },
                Err(e) => Error::Http(e),
            };

            if error.status_code().is_none() && error.is_retryable() && attempt < max_retries {
                let delay = self.calculate_backoff(attempt);
                warn!(
                    "{}, attempt {}/{}, retrying in {:?}",
                    error,
                    attempt + 1,
                    max_retries + 1,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(error);
        }
    }

    async fn build_request(
        &self,
        request: &ServiceRequest,
        url: &Url,
    ) -> Result<reqwest::RequestBuilder> {
        let mut req = self.client.request(request.method.into(), url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        req = req.header("Accept", "application/json");

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        if let Some(ref auth) = self.authenticator {
            req = auth.apply(req).await?;
        }

        Ok(req)
    }

    /// Resolve a request's path template and query against the service URL
    pub fn build_url(&self, request: &ServiceRequest) -> Result<Url> {
        let base = self
            .config
            .service_url
            .as_deref()
            .ok_or_else(|| Error::missing_field("service_url"))?;
        let mut url = Url::parse(base)?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::config(format!("service URL cannot be a base: {base}")))?;
            segments.pop_if_empty();

            for segment in request.path.split('/').filter(|s| !s.is_empty()) {
                match segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                {
                    Some(name) => {
                        let value = request
                            .path_param_value(name)
                            .filter(|v| !v.is_empty())
                            .ok_or_else(|| Error::missing_parameter(name))?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}

/// Extract a numeric `Retry-After` header value, in seconds
fn extract_retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
