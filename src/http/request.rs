//! Request descriptors and response envelopes
//!
//! A [`ServiceRequest`] is everything a service operation knows about one
//! call: method, path template, parameters, headers and body. The
//! [`HttpClient`](super::HttpClient) turns it into a concrete HTTP request.

use crate::types::{JsonValue, Method};
use reqwest::header::HeaderMap;

/// SDK name reported in the `User-Agent` header
pub const SDK_NAME: &str = "platform-services-rust-sdk";

/// Header carrying per-operation analytics
pub const SDK_ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

/// Default `User-Agent` for every request sent by this SDK
pub fn user_agent() -> String {
    format!(
        "{}/{} ({}; {})",
        SDK_NAME,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Value of the analytics header for one operation
pub fn sdk_analytics(service_name: &str, service_version: &str, operation_id: &str) -> String {
    format!("service_name={service_name};service_version={service_version};operation_id={operation_id}")
}

/// A fully described request for one service operation
#[derive(Debug, Clone, Default)]
pub struct ServiceRequest {
    /// HTTP method
    pub method: Method,
    /// Path template relative to the service URL, e.g. `/v2/groups/{access_group_id}`
    pub path: String,
    /// Values substituted into the path template
    pub path_params: Vec<(String, String)>,
    /// Query parameters, in the order they are sent
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<JsonValue>,
}

impl ServiceRequest {
    /// Create a request with the given method and path template
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Bind a path parameter
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter if a value is present
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add a comma-joined list query parameter if the list is present and non-empty
    #[must_use]
    pub fn query_list(self, key: impl Into<String>, values: Option<&[String]>) -> Self {
        match values {
            Some(values) if !values.is_empty() => self.query(key, values.join(",")),
            _ => self,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add a header if a value is present
    #[must_use]
    pub fn header_opt(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.header(key, value),
            None => self,
        }
    }

    /// Add the SDK analytics header for an operation
    #[must_use]
    pub fn sdk_headers(
        self,
        service_name: &str,
        service_version: &str,
        operation_id: &str,
    ) -> Self {
        self.header(
            SDK_ANALYTICS_HEADER,
            sdk_analytics(service_name, service_version, operation_id),
        )
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a bound path parameter
    pub fn path_param_value(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The result of a service operation: decoded body plus transport metadata
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    /// Decoded response body
    pub result: T,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
}

impl<T> DetailedResponse<T> {
    /// Consume the response, keeping only the body
    pub fn into_result(self) -> T {
        self.result
    }
}
