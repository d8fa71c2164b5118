//! Service clients
//!
//! Each service exposes its paginated list operations three ways:
//! - a plain async method returning one [`DetailedResponse`] page
//! - a bound-operation struct implementing [`ListOperation`]
//! - a `*_pager` constructor returning a ready [`Pager`]
//!
//! [`DetailedResponse`]: crate::http::DetailedResponse
//! [`ListOperation`]: crate::pagination::ListOperation
//! [`Pager`]: crate::pagination::Pager

pub mod case_management;
pub mod enterprise_usage_reports;
pub mod iam_access_groups;
pub mod partner_usage_reports;
pub mod resource_controller;
pub mod usage_reports;
pub mod user_management;

pub use case_management::CaseManagementV1;
pub use enterprise_usage_reports::EnterpriseUsageReportsV1;
pub use iam_access_groups::IamAccessGroupsV2;
pub use partner_usage_reports::PartnerUsageReportsV1;
pub use resource_controller::ResourceControllerV2;
pub use usage_reports::UsageReportsV4;
pub use user_management::UserManagementV1;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use std::sync::Arc;

/// Build the shared transport for a service
pub(crate) fn build_client(config: ServiceConfig, default_url: &str) -> Result<Arc<HttpClient>> {
    Ok(Arc::new(config.into_client(default_url)?))
}

/// Reject an empty required parameter before any I/O
pub(crate) fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::missing_parameter(name));
    }
    Ok(value)
}
