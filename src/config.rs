//! Service configuration
//!
//! A [`ServiceConfig`] describes how to reach one service: its URL,
//! credentials and transport settings. It can be loaded from YAML or from
//! `<SERVICE>_*` environment variables.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Service Config
// ============================================================================

/// Connection settings for a single service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service endpoint; falls back to the service's default URL
    #[serde(default)]
    pub service_url: Option<String>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Retry failed requests
    #[serde(default)]
    pub enable_retries: bool,

    /// Maximum number of retries when enabled
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Cap on a single retry delay, in seconds
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,

    /// Request timeout, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub disable_ssl_verification: bool,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_max_retries() -> u32 {
    4
}

fn default_retry_interval() -> u64 {
    30
}

fn default_timeout() -> u64 {
    60
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            auth: AuthConfig::default(),
            enable_retries: false,
            max_retries: default_max_retries(),
            retry_interval_seconds: default_retry_interval(),
            timeout_seconds: default_timeout(),
            disable_ssl_verification: false,
            headers: HashMap::new(),
        }
    }
}

impl ServiceConfig {
    /// Create a config with the given auth and default settings
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            ..Self::default()
        }
    }

    /// Set the service URL
    #[must_use]
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    /// Load configuration for `service_name` from the process environment
    pub fn from_env(service_name: &str) -> Result<Self> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Load configuration for `service_name` using a variable lookup function
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = env_prefix(service_name);
        let var = |suffix: &str| lookup(&format!("{prefix}_{suffix}")).none_if_empty();

        let apikey = var("APIKEY");
        let auth_type = match var("AUTH_TYPE") {
            Some(t) => t.to_lowercase(),
            None if apikey.is_some() => "iam".to_string(),
            None => "noauth".to_string(),
        };

        let auth = match auth_type.as_str() {
            "iam" => AuthConfig::Iam {
                apikey: apikey.ok_or_else(|| Error::missing_field(format!("{prefix}_APIKEY")))?,
                url: var("AUTH_URL"),
                client_id: var("CLIENT_ID"),
                client_secret: var("CLIENT_SECRET"),
                scope: var("SCOPE"),
            },
            "bearertoken" => AuthConfig::BearerToken {
                token: var("BEARER_TOKEN")
                    .ok_or_else(|| Error::missing_field(format!("{prefix}_BEARER_TOKEN")))?,
            },
            "basic" => AuthConfig::Basic {
                username: var("USERNAME")
                    .ok_or_else(|| Error::missing_field(format!("{prefix}_USERNAME")))?,
                password: var("PASSWORD")
                    .ok_or_else(|| Error::missing_field(format!("{prefix}_PASSWORD")))?,
            },
            "noauth" => AuthConfig::NoAuth,
            other => {
                return Err(Error::invalid_value(
                    format!("{prefix}_AUTH_TYPE"),
                    format!("unsupported auth type '{other}'"),
                ))
            }
        };

        let mut config = Self {
            service_url: var("URL"),
            auth,
            ..Self::default()
        };

        if let Some(value) = var("ENABLE_RETRIES") {
            config.enable_retries = parse_bool(&format!("{prefix}_ENABLE_RETRIES"), &value)?;
        }
        if let Some(value) = var("MAX_RETRIES") {
            config.max_retries = parse_number(&format!("{prefix}_MAX_RETRIES"), &value)?;
        }
        if let Some(value) = var("RETRY_INTERVAL") {
            config.retry_interval_seconds =
                parse_number(&format!("{prefix}_RETRY_INTERVAL"), &value)?;
        }
        if let Some(value) = var("DISABLE_SSL") {
            config.disable_ssl_verification = parse_bool(&format!("{prefix}_DISABLE_SSL"), &value)?;
        }

        Ok(config)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Check that the configured credentials are complete
    pub fn validate(&self) -> Result<()> {
        match &self.auth {
            AuthConfig::Iam { apikey, .. } if apikey.trim().is_empty() => {
                Err(Error::missing_field("auth.apikey"))
            }
            AuthConfig::BearerToken { token } if token.trim().is_empty() => {
                Err(Error::missing_field("auth.token"))
            }
            AuthConfig::Basic { username, .. } if username.trim().is_empty() => {
                Err(Error::missing_field("auth.username"))
            }
            AuthConfig::Basic { password, .. } if password.is_empty() => {
                Err(Error::missing_field("auth.password"))
            }
            _ => Ok(()),
        }
    }

    /// Transport settings for this service
    pub fn http_config(&self, default_service_url: &str) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .service_url(
                self.service_url
                    .clone()
                    .unwrap_or_else(|| default_service_url.to_string()),
            )
            .timeout(Duration::from_secs(self.timeout_seconds))
            .backoff(
                BackoffType::Exponential,
                Duration::from_secs(1),
                Duration::from_secs(self.retry_interval_seconds),
            )
            .disable_ssl_verification(self.disable_ssl_verification);

        if self.enable_retries {
            builder = builder.enable_retries(self.max_retries);
        }

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }

    /// Build an authenticated transport for this service
    pub fn into_client(self, default_service_url: &str) -> Result<HttpClient> {
        self.validate()?;
        let http_config = self.http_config(default_service_url);
        HttpClient::with_auth(http_config, self.auth)
    }
}

/// Environment variable prefix for a service name
pub fn env_prefix(service_name: &str) -> String {
    service_name.to_uppercase().replace('-', "_")
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::invalid_value(field, format!("expected a boolean, got '{value}'"))),
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_value(field, format!("expected a number, got '{value}'")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use test_case::test_case;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.auth, AuthConfig::NoAuth);
        assert!(!config.enable_retries);
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.retry_interval_seconds, 30);
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(env_prefix("case_management"), "CASE_MANAGEMENT");
        assert_eq!(env_prefix("iam-access-groups"), "IAM_ACCESS_GROUPS");
    }

    #[test]
    fn test_from_lookup_iam_defaults_when_apikey_present() {
        let lookup = lookup_from(&[
            ("USAGE_REPORTS_APIKEY", "my-key"),
            ("USAGE_REPORTS_URL", "https://billing.test.cloud.ibm.com"),
            ("USAGE_REPORTS_AUTH_URL", "https://iam.test.cloud.ibm.com"),
        ]);
        let config = ServiceConfig::from_lookup("usage_reports", lookup).unwrap();

        assert_eq!(
            config.service_url.as_deref(),
            Some("https://billing.test.cloud.ibm.com")
        );
        assert_eq!(
            config.auth,
            AuthConfig::Iam {
                apikey: "my-key".to_string(),
                url: Some("https://iam.test.cloud.ibm.com".to_string()),
                client_id: None,
                client_secret: None,
                scope: None,
            }
        );
    }

    #[test]
    fn test_from_lookup_noauth_when_nothing_set() {
        let config = ServiceConfig::from_lookup("case_management", |_| None).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test_case("bearertoken" ; "lowercase")]
    #[test_case("BEARERTOKEN" ; "uppercase")]
    #[test_case("BearerToken" ; "mixed case")]
    fn test_from_lookup_bearer_auth_type(auth_type: &str) {
        let lookup = lookup_from(&[
            ("USER_MANAGEMENT_AUTH_TYPE", auth_type),
            ("USER_MANAGEMENT_BEARER_TOKEN", "tok"),
        ]);
        let config = ServiceConfig::from_lookup("user_management", lookup).unwrap();
        assert_eq!(config.auth, AuthConfig::bearer("tok"));
    }

    #[test]
    fn test_from_lookup_basic_auth() {
        let lookup = lookup_from(&[
            ("RC_AUTH_TYPE", "basic"),
            ("RC_USERNAME", "user"),
            ("RC_PASSWORD", "pass"),
        ]);
        let config = ServiceConfig::from_lookup("rc", lookup).unwrap();
        assert_eq!(
            config.auth,
            AuthConfig::Basic {
                username: "user".to_string(),
                password: "pass".to_string(),
            }
        );
    }

    #[test]
    fn test_from_lookup_missing_credentials() {
        let lookup = lookup_from(&[("CASE_MANAGEMENT_AUTH_TYPE", "iam")]);
        let err = ServiceConfig::from_lookup("case_management", lookup).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "CASE_MANAGEMENT_APIKEY"));

        let lookup = lookup_from(&[("X_AUTH_TYPE", "bearertoken")]);
        let err = ServiceConfig::from_lookup("x", lookup).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_from_lookup_unknown_auth_type() {
        let lookup = lookup_from(&[("X_AUTH_TYPE", "cp4d")]);
        let err = ServiceConfig::from_lookup("x", lookup).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_from_lookup_retry_settings() {
        let lookup = lookup_from(&[
            ("X_ENABLE_RETRIES", "true"),
            ("X_MAX_RETRIES", "2"),
            ("X_RETRY_INTERVAL", "5"),
            ("X_DISABLE_SSL", "TRUE"),
        ]);
        let config = ServiceConfig::from_lookup("x", lookup).unwrap();
        assert!(config.enable_retries);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_interval_seconds, 5);
        assert!(config.disable_ssl_verification);
    }

    #[test]
    fn test_from_lookup_invalid_number() {
        let lookup = lookup_from(&[("X_MAX_RETRIES", "lots")]);
        let err = ServiceConfig::from_lookup("x", lookup).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "X_MAX_RETRIES"));
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
service_url: https://iam.test.cloud.ibm.com
auth:
  type: iam
  apikey: my-key
enable_retries: true
headers:
  X-Trace: "1"
"#;
        let config = ServiceConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.service_url.as_deref(),
            Some("https://iam.test.cloud.ibm.com")
        );
        assert_eq!(config.auth, AuthConfig::iam("my-key"));
        assert!(config.enable_retries);
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.headers.get("X-Trace"), Some(&"1".to_string()));
    }

    #[test]
    fn test_yaml_validation_rejects_empty_apikey() {
        let yaml = "auth:\n  type: iam\n  apikey: \"\"\n";
        let err = ServiceConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "auth:\n  type: bearertoken\n  token: abc").unwrap();

        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.auth, AuthConfig::bearer("abc"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ServiceConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_http_config_uses_default_url_and_retry_cap() {
        let mut config = ServiceConfig::default();
        config.enable_retries = true;
        config.retry_interval_seconds = 5;

        let http = config.http_config("https://billing.cloud.ibm.com");
        assert_eq!(
            http.service_url.as_deref(),
            Some("https://billing.cloud.ibm.com")
        );
        assert!(http.enable_retries);
        assert_eq!(http.max_retries, 4);
        assert_eq!(http.max_backoff, Duration::from_secs(5));

        let http = config
            .with_service_url("http://localhost:1234")
            .http_config("https://billing.cloud.ibm.com");
        assert_eq!(http.service_url.as_deref(), Some("http://localhost:1234"));
    }
}
