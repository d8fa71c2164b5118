//! Auth configuration types
//!
//! These types describe how requests to a service are authenticated.
//! They deserialize from the `auth` section of a YAML service config and
//! are also produced from `<SERVICE>_AUTH_TYPE` style environment variables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default IAM endpoint used to exchange API keys for access tokens
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Path of the IAM token operation, relative to the IAM endpoint
pub const IAM_TOKEN_PATH: &str = "/identity/token";

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    NoAuth,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// A caller-managed bearer token
    BearerToken {
        /// The bearer token
        token: String,
    },

    /// IAM API key exchanged for short-lived access tokens
    Iam {
        /// The IAM API key
        apikey: String,
        /// IAM endpoint (defaults to [`DEFAULT_IAM_URL`])
        #[serde(default)]
        url: Option<String>,
        /// Optional client id sent as basic credentials to the token endpoint
        #[serde(default)]
        client_id: Option<String>,
        /// Optional client secret sent as basic credentials to the token endpoint
        #[serde(default)]
        client_secret: Option<String>,
        /// Optional space-separated scopes
        #[serde(default)]
        scope: Option<String>,
    },
}

impl AuthConfig {
    /// Create an IAM config with the default endpoint
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: None,
            client_id: None,
            client_secret: None,
            scope: None,
        }
    }

    /// Create a bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken {
            token: token.into(),
        }
    }

    /// Short name of the auth type, as used in `<SERVICE>_AUTH_TYPE`
    pub fn auth_type(&self) -> &'static str {
        match self {
            AuthConfig::NoAuth => "noauth",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::BearerToken { .. } => "bearertoken",
            AuthConfig::Iam { .. } => "iam",
        }
    }
}

/// Resolve the full token URL for an IAM endpoint
pub fn iam_token_url(url: Option<&str>) -> String {
    let base = url.unwrap_or(DEFAULT_IAM_URL).trim_end_matches('/');
    if base.ends_with(IAM_TOKEN_PATH) {
        base.to_string()
    } else {
        format!("{base}{IAM_TOKEN_PATH}")
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test".to_string(), -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_inside_refresh_window() {
        let token = CachedToken::expires_in("test".to_string(), 10);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_auth_config_default() {
        assert_eq!(AuthConfig::default(), AuthConfig::NoAuth);
        assert_eq!(AuthConfig::default().auth_type(), "noauth");
    }

    #[test]
    fn test_iam_token_url() {
        assert_eq!(iam_token_url(None), "https://iam.cloud.ibm.com/identity/token");
        assert_eq!(
            iam_token_url(Some("https://iam.test.cloud.ibm.com/")),
            "https://iam.test.cloud.ibm.com/identity/token"
        );
        assert_eq!(
            iam_token_url(Some("http://localhost:8080/identity/token")),
            "http://localhost:8080/identity/token"
        );
    }

    #[test]
    fn test_auth_config_from_yaml() {
        let yaml = r#"
type: iam
apikey: my-api-key
url: https://iam.test.cloud.ibm.com
"#;
        let auth: AuthConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            auth,
            AuthConfig::Iam {
                apikey: "my-api-key".to_string(),
                url: Some("https://iam.test.cloud.ibm.com".to_string()),
                client_id: None,
                client_secret: None,
                scope: None,
            }
        );

        let auth: AuthConfig = serde_yaml::from_str("type: bearertoken\ntoken: abc\n").unwrap();
        assert_eq!(auth, AuthConfig::bearer("abc"));
    }
}
