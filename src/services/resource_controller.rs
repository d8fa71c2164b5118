//! Resource Controller API v2
//!
//! Lists resource instances and resource keys. Pages are linked through a
//! top-level `next_url` whose `start` query parameter addresses the next
//! page.

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
pub const DEFAULT_SERVICE_URL: &str = "https://resource-controller.cloud.ibm.com";

/// Service name used for external configuration
pub const DEFAULT_SERVICE_NAME: &str = "resource_controller";

const SERVICE_VERSION: &str = "v2";

const NEXT_URL_RULE: TokenRule = TokenRule::NextUrl { param: "start" };

// ============================================================================
// Client
// ============================================================================

/// Resource Controller client
#[derive(Debug, Clone)]
pub struct ResourceControllerV2 {
    client: Arc<HttpClient>,
}

impl ResourceControllerV2 {
    /// Create a client from explicit configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, DEFAULT_SERVICE_URL)?,
        })
    }

    /// Create a client from `RESOURCE_CONTROLLER_*` environment variables
    pub fn new_from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Service URL requests are sent to
    pub fn service_url(&self) -> Option<&str> {
        self.client.service_url()
    }

    /// Get one page of resource instances
    pub async fn list_resource_instances(
        &self,
        params: &ListResourceInstancesParams,
    ) -> Result<DetailedResponse<ResourceInstancesList>> {
        let request = ServiceRequest::get("/v2/resource_instances")
            .query_opt("guid", params.guid.as_deref())
            .query_opt("name", params.name.as_deref())
            .query_opt("resource_group_id", params.resource_group_id.as_deref())
            .query_opt("resource_id", params.resource_id.as_deref())
            .query_opt("resource_plan_id", params.resource_plan_id.as_deref())
            .query_opt("type", params.instance_type.as_deref())
            .query_opt("sub_type", params.sub_type.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("start", params.start.as_deref())
            .query_opt("state", params.state.as_deref())
            .query_opt("updated_from", params.updated_from.as_deref())
            .query_opt("updated_to", params.updated_to.as_deref())
            .sdk_headers(
                DEFAULT_SERVICE_NAME,
                SERVICE_VERSION,
                "list_resource_instances",
            );

        self.client.send_json(request).await
    }

    /// Get one page of resource keys
    pub async fn list_resource_keys(
        &self,
        params: &ListResourceKeysParams,
    ) -> Result<DetailedResponse<ResourceKeysList>> {
        let request = ServiceRequest::get("/v2/resource_keys")
            .query_opt("guid", params.guid.as_deref())
            .query_opt("name", params.name.as_deref())
            .query_opt("resource_group_id", params.resource_group_id.as_deref())
            .query_opt("resource_id", params.resource_id.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("start", params.start.as_deref())
            .query_opt("updated_from", params.updated_from.as_deref())
            .query_opt("updated_to", params.updated_to.as_deref())
            .sdk_headers(DEFAULT_SERVICE_NAME, SERVICE_VERSION, "list_resource_keys");

        self.client.send_json(request).await
    }

    /// Pager over all resource instances matching `params`
    pub fn list_resource_instances_pager(
        &self,
        params: ListResourceInstancesParams,
    ) -> Result<ResourceInstancesPager> {
        Pager::new(ListResourceInstances(self.clone()), params)
    }

    /// Pager over all resource keys matching `params`
    pub fn list_resource_keys_pager(
        &self,
        params: ListResourceKeysParams,
    ) -> Result<ResourceKeysPager> {
        Pager::new(ListResourceKeys(self.clone()), params)
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// Parameters for [`ResourceControllerV2::list_resource_instances`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResourceInstancesParams {
    pub guid: Option<String>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    pub resource_id: Option<String>,
    pub resource_plan_id: Option<String>,
    /// `service_instance`, `child_instance` or `composite_instance`
    pub instance_type: Option<String>,
    pub sub_type: Option<String>,
    pub limit: Option<i64>,
    /// Opaque page token
    pub start: Option<String>,
    /// `active`, `provisioning` or `removed`
    pub state: Option<String>,
    pub updated_from: Option<String>,
    pub updated_to: Option<String>,
}

impl PageParams for ListResourceInstancesParams {
    const CONTINUATION_FIELD: &'static str = "start";

    fn continuation(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_continuation(&mut self, token: String) {
        self.start = Some(token);
    }
}

/// Parameters for [`ResourceControllerV2::list_resource_keys`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResourceKeysParams {
    pub guid: Option<String>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    pub resource_id: Option<String>,
    pub limit: Option<i64>,
    pub start: Option<String>,
    pub updated_from: Option<String>,
    pub updated_to: Option<String>,
}

impl PageParams for ListResourceKeysParams {
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

/// One page of resource instances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInstancesList {
    #[serde(default)]
    pub rows_count: Option<i64>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub resources: Vec<ResourceInstance>,
}

impl PageEnvelope for ResourceInstancesList {
    type Item = ResourceInstance;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<ResourceInstance> {
        self.resources
    }
}

/// A provisioned resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// One page of resource keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceKeysList {
    #[serde(default)]
    pub rows_count: Option<i64>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub resources: Vec<ResourceKey>,
}

impl PageEnvelope for ResourceKeysList {
    type Item = ResourceKey;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<ResourceKey> {
        self.resources
    }
}

/// Credentials bound to a resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_crn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

// ============================================================================
// Pagers
// ============================================================================

/// [`ResourceControllerV2::list_resource_instances`] bound to a client
#[derive(Debug, Clone)]
pub struct ListResourceInstances(pub ResourceControllerV2);

#[async_trait]
impl ListOperation for ListResourceInstances {
    type Params = ListResourceInstancesParams;
    type Page = ResourceInstancesList;

    const OPERATION_ID: &'static str = "list_resource_instances";
    const TOKEN_RULE: TokenRule = NEXT_URL_RULE;

    async fn fetch_page(
        &self,
        params: &ListResourceInstancesParams,
    ) -> Result<DetailedResponse<ResourceInstancesList>> {
        self.0.list_resource_instances(params).await
    }
}

/// [`ResourceControllerV2::list_resource_keys`] bound to a client
#[derive(Debug, Clone)]
pub struct ListResourceKeys(pub ResourceControllerV2);

#[async_trait]
impl ListOperation for ListResourceKeys {
    type Params = ListResourceKeysParams;
    type Page = ResourceKeysList;

    const OPERATION_ID: &'static str = "list_resource_keys";
    const TOKEN_RULE: TokenRule = NEXT_URL_RULE;

    async fn fetch_page(
        &self,
        params: &ListResourceKeysParams,
    ) -> Result<DetailedResponse<ResourceKeysList>> {
        self.0.list_resource_keys(params).await
    }
}

/// Pager over [`ResourceControllerV2::list_resource_instances`]
pub type ResourceInstancesPager = Pager<ListResourceInstances>;

/// Pager over [`ResourceControllerV2::list_resource_keys`]
pub type ResourceKeysPager = Pager<ListResourceKeys>;
