//! Usage Reports API v4
//!
//! Per-instance usage of an account for a billing month, and the billing
//! report snapshots configured for an account. Both collections link pages
//! through `next.href`; the continuation travels as the `_start` query
//! parameter.

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
pub const DEFAULT_SERVICE_URL: &str = "https://billing.cloud.ibm.com";

/// Service name used for external configuration
pub const DEFAULT_SERVICE_NAME: &str = "usage_reports";

const SERVICE_VERSION: &str = "v4";

const START_RULE: TokenRule = TokenRule::NextHref { param: "_start" };

// ============================================================================
// Client
// ============================================================================

/// Usage Reports client
#[derive(Debug, Clone)]
pub struct UsageReportsV4 {
    client: Arc<HttpClient>,
}

impl UsageReportsV4 {
    /// Create a client from explicit configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, DEFAULT_SERVICE_URL)?,
        })
    }

    /// Create a client from `USAGE_REPORTS_*` environment variables
    pub fn new_from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Service URL requests are sent to
    pub fn service_url(&self) -> Option<&str> {
        self.client.service_url()
    }

    /// Get one page of resource instance usage in an account
    pub async fn get_resource_usage_account(
        &self,
        params: &GetResourceUsageAccountParams,
    ) -> Result<DetailedResponse<InstancesUsage>> {
        let account_id = require("account_id", &params.account_id)?;
        let billingmonth = require("billingmonth", &params.billingmonth)?;

        let request = ServiceRequest::get(
            "/v4/accounts/{account_id}/resource_instances/usage/{billingmonth}",
        )
        .path_param("account_id", account_id)
        .path_param("billingmonth", billingmonth)
        .query_opt("_names", params.names)
        .query_opt("_tags", params.tags)
        .query_opt("_limit", params.limit)
        .query_opt("_start", params.start.as_deref())
        .query_opt("resource_group_id", params.resource_group_id.as_deref())
        .query_opt("organization_id", params.organization_id.as_deref())
        .query_opt("resource_instance_id", params.resource_instance_id.as_deref())
        .query_opt("resource_id", params.resource_id.as_deref())
        .query_opt("plan_id", params.plan_id.as_deref())
        .query_opt("region", params.region.as_deref())
        .header_opt("Accept-Language", params.accept_language.as_deref())
        .sdk_headers(
            DEFAULT_SERVICE_NAME,
            SERVICE_VERSION,
            "get_resource_usage_account",
        );

        self.client.send_json(request).await
    }

    /// Get one page of billing report snapshots
    pub async fn get_reports_snapshot(
        &self,
        params: &GetReportsSnapshotParams,
    ) -> Result<DetailedResponse<SnapshotList>> {
        let account_id = require("account_id", &params.account_id)?;
        let month = require("month", &params.month)?;

        let request = ServiceRequest::get("/v1/billing-reports-snapshots")
            .query("account_id", account_id)
            .query("month", month)
            .query_opt("date_from", params.date_from)
            .query_opt("date_to", params.date_to)
            .query_opt("_limit", params.limit)
            .query_opt("_start", params.start.as_deref())
            .sdk_headers(DEFAULT_SERVICE_NAME, SERVICE_VERSION, "get_reports_snapshot");

        self.client.send_json(request).await
    }

    /// Pager over all resource instance usage matching `params`
    pub fn get_resource_usage_account_pager(
        &self,
        params: GetResourceUsageAccountParams,
    ) -> Result<ResourceUsageAccountPager> {
        Pager::new(GetResourceUsageAccount(self.clone()), params)
    }

    /// Pager over all snapshots matching `params`
    pub fn get_reports_snapshot_pager(
        &self,
        params: GetReportsSnapshotParams,
    ) -> Result<ReportsSnapshotPager> {
        Pager::new(GetReportsSnapshot(self.clone()), params)
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// Parameters for [`UsageReportsV4::get_resource_usage_account`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetResourceUsageAccountParams {
    /// Account id (required)
    pub account_id: String,
    /// Billing month, `yyyy-mm` (required)
    pub billingmonth: String,
    /// Include names of resources, plans and groups
    pub names: Option<bool>,
    /// Include tags
    pub tags: Option<bool>,
    pub accept_language: Option<String>,
    pub limit: Option<i64>,
    /// Sent as `_start`
    pub start: Option<String>,
    pub resource_group_id: Option<String>,
    pub organization_id: Option<String>,
    pub resource_instance_id: Option<String>,
    pub resource_id: Option<String>,
    pub plan_id: Option<String>,
    pub region: Option<String>,
}

impl GetResourceUsageAccountParams {
    /// Parameters for an account and billing month
    pub fn new(account_id: impl Into<String>, billingmonth: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            billingmonth: billingmonth.into(),
            ..Self::default()
        }
    }
}

impl PageParams for GetResourceUsageAccountParams {
    const CONTINUATION_FIELD: &'static str = "start";

    fn continuation(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_continuation(&mut self, token: String) {
        self.start = Some(token);
    }
}

/// Parameters for [`UsageReportsV4::get_reports_snapshot`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetReportsSnapshotParams {
    /// Account id (required)
    pub account_id: String,
    /// Billing month, `yyyy-mm` (required)
    pub month: String,
    /// Lower bound on snapshot time, in milliseconds since the epoch
    pub date_from: Option<i64>,
    /// Upper bound on snapshot time, in milliseconds since the epoch
    pub date_to: Option<i64>,
    pub limit: Option<i64>,
    /// Sent as `_start`
    pub start: Option<String>,
}

impl GetReportsSnapshotParams {
    /// Parameters for an account and month
    pub fn new(account_id: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            month: month.into(),
            ..Self::default()
        }
    }
}

impl PageParams for GetReportsSnapshotParams {
    const CONTINUATION_FIELD: &'static str = "start";

    fn continuation(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_continuation(&mut self, token: String) {
        self.start = Some(token);
    }
}

// ============================================================================
// Models
// ============================================================================

/// One page of resource instance usage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstancesUsage {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub resources: Vec<InstanceUsage>,
}

impl PageEnvelope for InstancesUsage {
    type Item = InstanceUsage;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<InstanceUsage> {
        self.resources
    }
}

/// Usage of one resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_instance_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// One page of billing report snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotList {
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl PageEnvelope for SnapshotList {
    type Item = Snapshot;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

/// A billing report snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<i64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

// ============================================================================
// Pagers
// ============================================================================

/// [`UsageReportsV4::get_resource_usage_account`] bound to a client
#[derive(Debug, Clone)]
pub struct GetResourceUsageAccount(pub UsageReportsV4);

#[async_trait]
impl ListOperation for GetResourceUsageAccount {
    type Params = GetResourceUsageAccountParams;
    type Page = InstancesUsage;

    const OPERATION_ID: &'static str = "get_resource_usage_account";
    const TOKEN_RULE: TokenRule = START_RULE;

    async fn fetch_page(
        &self,
        params: &GetResourceUsageAccountParams,
    ) -> Result<DetailedResponse<InstancesUsage>> {
        self.0.get_resource_usage_account(params).await
    }
}

/// [`UsageReportsV4::get_reports_snapshot`] bound to a client
#[derive(Debug, Clone)]
pub struct GetReportsSnapshot(pub UsageReportsV4);

#[async_trait]
impl ListOperation for GetReportsSnapshot {
    type Params = GetReportsSnapshotParams;
    type Page = SnapshotList;

    const OPERATION_ID: &'static str = "get_reports_snapshot";
    const TOKEN_RULE: TokenRule = START_RULE;

    async fn fetch_page(
        &self,
        params: &GetReportsSnapshotParams,
    ) -> Result<DetailedResponse<SnapshotList>> {
        self.0.get_reports_snapshot(params).await
    }
}

/// Pager over [`UsageReportsV4::get_resource_usage_account`]
pub type ResourceUsageAccountPager = Pager<GetResourceUsageAccount>;

/// Pager over [`UsageReportsV4::get_reports_snapshot`]
pub type ReportsSnapshotPager = Pager<GetReportsSnapshot>;
