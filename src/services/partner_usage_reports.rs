//! Partner Usage Reports API v1
//!
//! Usage reports for a partner and its resellers and customers. Unlike the
//! other billing APIs, pages carry the next offset directly in `next.offset`.

use super::{build_client, require};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::http::{DetailedResponse, HttpClient, ServiceRequest};
use crate::pagination::{ListOperation, PageEnvelope, PageLinks, PageParams, Pager, TokenRule};
use crate::types::JsonObject;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default service endpoint
pub const DEFAULT_SERVICE_URL: &str = "https://partner.cloud.ibm.com";

/// Service name used for external configuration
pub const DEFAULT_SERVICE_NAME: &str = "partner_usage_reports";

const SERVICE_VERSION: &str = "v1";

/// Partner Usage Reports client
#[derive(Debug, Clone)]
pub struct PartnerUsageReportsV1 {
    client: Arc<HttpClient>,
}

impl PartnerUsageReportsV1 {
    /// Create a client from explicit configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, DEFAULT_SERVICE_URL)?,
        })
    }

    /// Create a client from `PARTNER_USAGE_REPORTS_*` environment variables
    pub fn new_from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Service URL requests are sent to
    pub fn service_url(&self) -> Option<&str> {
        self.client.service_url()
    }

    /// Get one page of partner usage reports
    pub async fn get_resource_usage_report(
        &self,
        params: &GetPartnerUsageReportParams,
    ) -> Result<DetailedResponse<PartnerUsageReportSummary>> {
        let partner_id = require("partner_id", &params.partner_id)?;

        let request = ServiceRequest::get("/v1/resource-usage-reports")
            .query("partner_id", partner_id)
            .query_opt("reseller_id", params.reseller_id.as_deref())
            .query_opt("customer_id", params.customer_id.as_deref())
            .query_opt("children", params.children)
            .query_opt("month", params.month.as_deref())
            .query_opt("viewpoint", params.viewpoint.as_deref())
            .query_opt("recurse", params.recurse)
            .query_opt("limit", params.limit)
            .query_opt("offset", params.offset.as_deref())
            .sdk_headers(
                DEFAULT_SERVICE_NAME,
                SERVICE_VERSION,
                "get_resource_usage_report",
            );

        self.client.send_json(request).await
    }

    /// Pager over all partner usage reports matching `params`
    pub fn get_resource_usage_report_pager(
        &self,
        params: GetPartnerUsageReportParams,
    ) -> Result<PartnerUsageReportPager> {
        Pager::new(GetPartnerUsageReport(self.clone()), params)
    }
}

/// Parameters for [`PartnerUsageReportsV1::get_resource_usage_report`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPartnerUsageReportParams {
    /// Partner to report on (required)
    pub partner_id: String,
    pub reseller_id: Option<String>,
    pub customer_id: Option<String>,
    pub children: Option<bool>,
    /// Billing month, `yyyy-mm`
    pub month: Option<String>,
    /// `DISTRIBUTOR`, `RESELLER` or `END_CUSTOMER`
    pub viewpoint: Option<String>,
    pub recurse: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<String>,
}

impl GetPartnerUsageReportParams {
    /// Parameters for the given partner
    pub fn new(partner_id: impl Into<String>) -> Self {
        Self {
            partner_id: partner_id.into(),
            ..Self::default()
        }
    }
}

impl PageParams for GetPartnerUsageReportParams {
    const CONTINUATION_FIELD: &'static str = "offset";

    fn continuation(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    fn set_continuation(&mut self, token: String) {
        self.offset = Some(token);
    }
}

/// One page of partner usage reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerUsageReportSummary {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub reports: Vec<PartnerUsageReport>,
}

impl PageEnvelope for PartnerUsageReportSummary {
    type Item = PartnerUsageReport;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<PartnerUsageReport> {
        self.reports
    }
}

/// Usage report for one partner entity and month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerUsageReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_partner_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable_cost: Option<f64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// [`PartnerUsageReportsV1::get_resource_usage_report`] bound to a client
#[derive(Debug, Clone)]
pub struct GetPartnerUsageReport(pub PartnerUsageReportsV1);

#[async_trait]
impl ListOperation for GetPartnerUsageReport {
    type Params = GetPartnerUsageReportParams;
    type Page = PartnerUsageReportSummary;

    const OPERATION_ID: &'static str = "get_resource_usage_report";
    const TOKEN_RULE: TokenRule = TokenRule::NextOffset;

    async fn fetch_page(
        &self,
        params: &GetPartnerUsageReportParams,
    ) -> Result<DetailedResponse<PartnerUsageReportSummary>> {
        self.0.get_resource_usage_report(params).await
    }
}

/// Pager over [`PartnerUsageReportsV1::get_resource_usage_report`]
pub type PartnerUsageReportPager = Pager<GetPartnerUsageReport>;
