//! IAM Access Groups API v2
//!
//! Lists access groups in an account and the members of an access group.
//! Both collections are linked through `next.href` and its `offset` query
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
pub const DEFAULT_SERVICE_URL: &str = "https://iam.cloud.ibm.com";

/// Service name used for external configuration
pub const DEFAULT_SERVICE_NAME: &str = "iam_access_groups";

const SERVICE_VERSION: &str = "v2";

// ============================================================================
// Client
// ============================================================================

/// IAM Access Groups client
#[derive(Debug, Clone)]
pub struct IamAccessGroupsV2 {
    client: Arc<HttpClient>,
}

impl IamAccessGroupsV2 {
    /// Create a client from explicit configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, DEFAULT_SERVICE_URL)?,
        })
    }

    /// Create a client from `IAM_ACCESS_GROUPS_*` environment variables
    pub fn new_from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Service URL requests are sent to
    pub fn service_url(&self) -> Option<&str> {
        self.client.service_url()
    }

    /// Get one page of access groups in an account
    pub async fn list_access_groups(
        &self,
        params: &ListAccessGroupsParams,
    ) -> Result<DetailedResponse<GroupsList>> {
        let account_id = require("account_id", &params.account_id)?;

        let request = ServiceRequest::get("/v2/groups")
            .query("account_id", account_id)
            .query_opt("iam_id", params.iam_id.as_deref())
            .query_opt("membership_type", params.membership_type.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("offset", params.offset.as_deref())
            .query_opt("sort", params.sort.as_deref())
            .query_opt("show_federated", params.show_federated)
            .query_opt("hide_public_access", params.hide_public_access)
            .header_opt("Transaction-Id", params.transaction_id.as_deref())
            .sdk_headers(DEFAULT_SERVICE_NAME, SERVICE_VERSION, "list_access_groups");

        self.client.send_json(request).await
    }

    /// Get one page of members of an access group
    pub async fn list_access_group_members(
        &self,
        params: &ListAccessGroupMembersParams,
    ) -> Result<DetailedResponse<GroupMembersList>> {
        let access_group_id = require("access_group_id", &params.access_group_id)?;

        let request = ServiceRequest::get("/v2/groups/{access_group_id}/members")
            .path_param("access_group_id", access_group_id)
            .query_opt("membership_type", params.membership_type.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("offset", params.offset.as_deref())
            .query_opt("type", params.member_type.as_deref())
            .query_opt("verbose", params.verbose)
            .query_opt("sort", params.sort.as_deref())
            .header_opt("Transaction-Id", params.transaction_id.as_deref())
            .sdk_headers(
                DEFAULT_SERVICE_NAME,
                SERVICE_VERSION,
                "list_access_group_members",
            );

        self.client.send_json(request).await
    }

    /// Pager over all access groups matching `params`
    pub fn list_access_groups_pager(
        &self,
        params: ListAccessGroupsParams,
    ) -> Result<AccessGroupsPager> {
        Pager::new(ListAccessGroups(self.clone()), params)
    }

    /// Pager over all members of an access group
    pub fn list_access_group_members_pager(
        &self,
        params: ListAccessGroupMembersParams,
    ) -> Result<AccessGroupMembersPager> {
        Pager::new(ListAccessGroupMembers(self.clone()), params)
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// Parameters for [`IamAccessGroupsV2::list_access_groups`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccessGroupsParams {
    /// Account to list groups for (required)
    pub account_id: String,
    pub transaction_id: Option<String>,
    /// Only groups this IAM id belongs to
    pub iam_id: Option<String>,
    /// `static` or `all`
    pub membership_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub show_federated: Option<bool>,
    pub hide_public_access: Option<bool>,
}

impl ListAccessGroupsParams {
    /// Parameters for the given account
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Self::default()
        }
    }
}

impl PageParams for ListAccessGroupsParams {
    const CONTINUATION_FIELD: &'static str = "offset";

    fn continuation(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    fn set_continuation(&mut self, token: String) {
        self.offset = Some(token);
    }
}

/// Parameters for [`IamAccessGroupsV2::list_access_group_members`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccessGroupMembersParams {
    /// Access group to list members of (required)
    pub access_group_id: String,
    pub transaction_id: Option<String>,
    pub membership_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<String>,
    /// Member type filter: `user`, `service` or `profile`
    pub member_type: Option<String>,
    /// Return user details such as name and email
    pub verbose: Option<bool>,
    pub sort: Option<String>,
}

impl ListAccessGroupMembersParams {
    /// Parameters for the given access group
    pub fn new(access_group_id: impl Into<String>) -> Self {
        Self {
            access_group_id: access_group_id.into(),
            ..Self::default()
        }
    }
}

impl PageParams for ListAccessGroupMembersParams {
    const CONTINUATION_FIELD: &'static str = "offset";

    fn continuation(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    fn set_continuation(&mut self, token: String) {
        self.offset = Some(token);
    }
}

// ============================================================================
// Models
// ============================================================================

/// One page of access groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupsList {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub total_count: Option<i64>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl PageEnvelope for GroupsList {
    type Item = Group;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<Group> {
        self.groups
    }
}

/// An access group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_federated: Option<bool>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// One page of access group members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMembersList {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub total_count: Option<i64>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

impl PageEnvelope for GroupMembersList {
    type Item = GroupMember;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<GroupMember> {
        self.members
    }
}

/// A member of an access group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub member_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

// ============================================================================
// Pagers
// ============================================================================

/// [`IamAccessGroupsV2::list_access_groups`] bound to a client
#[derive(Debug, Clone)]
pub struct ListAccessGroups(pub IamAccessGroupsV2);

#[async_trait]
impl ListOperation for ListAccessGroups {
    type Params = ListAccessGroupsParams;
    type Page = GroupsList;

    const OPERATION_ID: &'static str = "list_access_groups";
    const TOKEN_RULE: TokenRule = TokenRule::NextHref { param: "offset" };

    async fn fetch_page(
        &self,
        params: &ListAccessGroupsParams,
    ) -> Result<DetailedResponse<GroupsList>> {
        self.0.list_access_groups(params).await
    }
}

/// [`IamAccessGroupsV2::list_access_group_members`] bound to a client
#[derive(Debug, Clone)]
pub struct ListAccessGroupMembers(pub IamAccessGroupsV2);

#[async_trait]
impl ListOperation for ListAccessGroupMembers {
    type Params = ListAccessGroupMembersParams;
    type Page = GroupMembersList;

    const OPERATION_ID: &'static str = "list_access_group_members";
    const TOKEN_RULE: TokenRule = TokenRule::NextHref { param: "offset" };

    async fn fetch_page(
        &self,
        params: &ListAccessGroupMembersParams,
    ) -> Result<DetailedResponse<GroupMembersList>> {
        self.0.list_access_group_members(params).await
    }
}

/// Pager over [`IamAccessGroupsV2::list_access_groups`]
pub type AccessGroupsPager = Pager<ListAccessGroups>;

/// Pager over [`IamAccessGroupsV2::list_access_group_members`]
pub type AccessGroupMembersPager = Pager<ListAccessGroupMembers>;
