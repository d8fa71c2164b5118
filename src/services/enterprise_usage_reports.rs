//! Enterprise Usage Reports API v1
//!
//! Usage reports for an enterprise, an account group or a single account.
//! Pages are linked through `next.href` and its `offset` query parameter.

use super::build_client;
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::http::{DetailedResponse, HttpClient, ServiceRequest};
use crate::pagination::{ListOperation, PageEnvelope, PageLinks, PageParams, Pager, TokenRule};
use crate::types::JsonObject;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default service endpoint
pub const DEFAULT_SERVICE_URL: &str = "https://enterprise.cloud.ibm.com";

/// Service name used for external configuration
pub const DEFAULT_SERVICE_NAME: &str = "enterprise_usage_reports";

const SERVICE_VERSION: &str = "v1";

/// Enterprise Usage Reports client
#[derive(Debug, Clone)]
pub struct EnterpriseUsageReportsV1 {
    client: Arc<HttpClient>,
}

impl EnterpriseUsageReportsV1 {
    /// Create a client from explicit configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, DEFAULT_SERVICE_URL)?,
        })
    }

    /// Create a client from `ENTERPRISE_USAGE_REPORTS_*` environment variables
    pub fn new_from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Service URL requests are sent to
    pub fn service_url(&self) -> Option<&str> {
        self.client.service_url()
    }

    /// Get one page of usage reports
    pub async fn get_resource_usage_report(
        &self,
        params: &GetResourceUsageReportParams,
    ) -> Result<DetailedResponse<Reports>> {
        let request = ServiceRequest::get("/v1/resource-usage-reports")
            .query_opt("enterprise_id", params.enterprise_id.as_deref())
            .query_opt("account_group_id", params.account_group_id.as_deref())
            .query_opt("account_id", params.account_id.as_deref())
            .query_opt("children", params.children)
            .query_opt("month", params.month.as_deref())
            .query_opt("billing_unit_id", params.billing_unit_id.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("offset", params.offset.as_deref())
            .sdk_headers(
                DEFAULT_SERVICE_NAME,
                SERVICE_VERSION,
                "get_resource_usage_report",
            );

        self.client.send_json(request).await
    }

    /// Pager over all usage reports matching `params`
    pub fn get_resource_usage_report_pager(
        &self,
        params: GetResourceUsageReportParams,
    ) -> Result<GetResourceUsageReportPager> {
        Pager::new(GetResourceUsageReport(self.clone()), params)
    }
}

/// Parameters for [`EnterpriseUsageReportsV1::get_resource_usage_report`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetResourceUsageReportParams {
    pub enterprise_id: Option<String>,
    pub account_group_id: Option<String>,
    pub account_id: Option<String>,
    /// Include reports for child entities
    pub children: Option<bool>,
    /// Billing month, `yyyy-mm`
    pub month: Option<String>,
    pub billing_unit_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<String>,
}

impl PageParams for GetResourceUsageReportParams {
    const CONTINUATION_FIELD: &'static str = "offset";

    fn continuation(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    fn set_continuation(&mut self, token: String) {
        self.offset = Some(token);
    }
}

/// One page of usage reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reports {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub reports: Vec<ResourceUsageReport>,
}

impl PageEnvelope for Reports {
    type Item = ResourceUsageReport;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<ResourceUsageReport> {
        self.reports
    }
}

/// Usage report for one entity and month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsageReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_billable_cost: Option<f64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// [`EnterpriseUsageReportsV1::get_resource_usage_report`] bound to a client
#[derive(Debug, Clone)]
pub struct GetResourceUsageReport(pub EnterpriseUsageReportsV1);

#[async_trait]
impl ListOperation for GetResourceUsageReport {
    type Params = GetResourceUsageReportParams;
    type Page = Reports;

    const OPERATION_ID: &'static str = "get_resource_usage_report";
    const TOKEN_RULE: TokenRule = TokenRule::NextHref { param: "offset" };

    async fn fetch_page(
        &self,
        params: &GetResourceUsageReportParams,
    ) -> Result<DetailedResponse<Reports>> {
        self.0.get_resource_usage_report(params).await
    }
}

/// Pager over [`EnterpriseUsageReportsV1::get_resource_usage_report`]
pub type GetResourceUsageReportPager = Pager<GetResourceUsageReport>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::config_for;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_resource_usage_report_pager() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/resource-usage-reports"))
            .and(query_param("enterprise_id", "abc"))
            .and(query_param("children", "true"))
            .and(query_param("month", "2024-01"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "limit": 1,
                "next": {"href": "https://myhost.com/somePath?offset=1"},
                "reports": [{"entity_id": "e1", "billable_cost": 12.5, "resources": []}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/resource-usage-reports"))
            .and(query_param("enterprise_id", "abc"))
            .and(query_param("offset", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "limit": 1,
                "reports": [{"entity_id": "e2"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = EnterpriseUsageReportsV1::new(config_for(&mock_server)).unwrap();
        let mut pager = service
            .get_resource_usage_report_pager(GetResourceUsageReportParams {
                enterprise_id: Some("abc".to_string()),
                children: Some(true),
                month: Some("2024-01".to_string()),
                limit: Some(1),
                ..GetResourceUsageReportParams::default()
            })
            .unwrap();

        let first = pager.get_next().await.unwrap();
        assert_eq!(first[0].billable_cost, Some(12.5));
        assert!(first[0].extra.contains_key("resources"));
        assert!(pager.has_next());

        let second = pager.get_next().await.unwrap();
        assert_eq!(second[0].entity_id.as_deref(), Some("e2"));
        assert!(!pager.has_next());
    }
}
