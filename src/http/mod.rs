//! HTTP transport module
//!
//! Turns service request descriptors into authenticated HTTP calls.
//!
//! # Features
//!
//! - **Request descriptors**: path templates, ordered query parameters, headers
//! - **Detailed responses**: decoded body plus status and headers
//! - **Optional retries**: capped backoff, honouring `Retry-After`
//! - **Authentication**: integration with the auth module

mod client;
mod request;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use request::{
    sdk_analytics, user_agent, DetailedResponse, ServiceRequest, SDK_ANALYTICS_HEADER, SDK_NAME,
};
