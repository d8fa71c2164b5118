//! User Management API v1
//!
//! Lists the users of an account. Pages are linked through a top-level
//! `next_url`; the continuation travels as the `_start` query parameter.

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
pub const DEFAULT_SERVICE_URL: &str = "https://user-management.cloud.ibm.com";

/// Service name used for external configuration
pub const DEFAULT_SERVICE_NAME: &str = "user_management";

const SERVICE_VERSION: &str = "v1";

/// User Management client
#[derive(Debug, Clone)]
pub struct UserManagementV1 {
    client: Arc<HttpClient>,
}

impl UserManagementV1 {
    /// Create a client from explicit configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, DEFAULT_SERVICE_URL)?,
        })
    }

    /// Create a client from `USER_MANAGEMENT_*` environment variables
    pub fn new_from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Service URL requests are sent to
    pub fn service_url(&self) -> Option<&str> {
        self.client.service_url()
    }

    /// Get one page of users in an account
    pub async fn list_users(&self, params: &ListUsersParams) -> Result<DetailedResponse<UserList>> {
        let account_id = require("account_id", &params.account_id)?;

        let request = ServiceRequest::get("/v2/accounts/{account_id}/users")
            .path_param("account_id", account_id)
            .query_opt("limit", params.limit)
            .query_opt("include_settings", params.include_settings)
            .query_opt("search", params.search.as_deref())
            .query_opt("_start", params.start.as_deref())
            .query_opt("user_id", params.user_id.as_deref())
            .sdk_headers(DEFAULT_SERVICE_NAME, SERVICE_VERSION, "list_users");

        self.client.send_json(request).await
    }

    /// Pager over all users matching `params`
    pub fn list_users_pager(&self, params: ListUsersParams) -> Result<UsersPager> {
        Pager::new(ListUsers(self.clone()), params)
    }
}

/// Parameters for [`UserManagementV1::list_users`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsersParams {
    /// Account id (required)
    pub account_id: String,
    pub limit: Option<i64>,
    pub include_settings: Option<bool>,
    /// Filter expression, e.g. `state:ACTIVE`
    pub search: Option<String>,
    /// Sent as `_start`
    pub start: Option<String>,
    pub user_id: Option<String>,
}

impl ListUsersParams {
    /// Parameters for the given account
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Self::default()
        }
    }
}

impl PageParams for ListUsersParams {
    const CONTINUATION_FIELD: &'static str = "start";

    fn continuation(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_continuation(&mut self, token: String) {
        self.start = Some(token);
    }
}

/// One page of users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub total_results: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub first_url: Option<String>,
    #[serde(flatten)]
    pub links: PageLinks,
    #[serde(default)]
    pub resources: Vec<UserProfile>,
}

impl PageEnvelope for UserList {
    type Item = UserProfile;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<UserProfile> {
        self.resources
    }
}

/// A user's profile in an account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// [`UserManagementV1::list_users`] bound to a client
#[derive(Debug, Clone)]
pub struct ListUsers(pub UserManagementV1);

#[async_trait]
impl ListOperation for ListUsers {
    type Params = ListUsersParams;
    type Page = UserList;

    const OPERATION_ID: &'static str = "list_users";
    const TOKEN_RULE: TokenRule = TokenRule::NextUrl { param: "_start" };

    async fn fetch_page(&self, params: &ListUsersParams) -> Result<DetailedResponse<UserList>> {
        self.0.list_users(params).await
    }
}

/// Pager over [`UserManagementV1::list_users`]
pub type UsersPager = Pager<ListUsers>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthConfig;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_users_pager_with_bearer_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts/testString/users"))
            .and(header("Authorization", "Bearer tok"))
            .and(query_param("limit", "1"))
            .and(query_param_is_missing("_start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": 2,
                "limit": 1,
                "next_url": "https://myhost.com/somePath?_start=1",
                "resources": [{"iam_id": "IBMid-1", "state": "ACTIVE"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts/testString/users"))
            .and(query_param("_start", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": 2,
                "limit": 1,
                "resources": [{"iam_id": "IBMid-2", "state": "PENDING"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ServiceConfig::new(AuthConfig::bearer("tok")).with_service_url(mock_server.uri());
        let service = UserManagementV1::new(config).unwrap();
        let mut params = ListUsersParams::new("testString");
        params.limit = Some(1);

        let users = service.list_users_pager(params).unwrap().get_all().await.unwrap();
        let states: Vec<_> = users.iter().filter_map(|u| u.state.as_deref()).collect();
        assert_eq!(states, vec!["ACTIVE", "PENDING"]);
    }

    #[tokio::test]
    async fn test_list_users_error_leaves_pager_ready() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts/testString/users"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "errors": [{"code": "forbidden", "message": "Not authorized"}]
            })))
            .mount(&mock_server)
            .await;

        let service = UserManagementV1::new(
            ServiceConfig::default().with_service_url(mock_server.uri()),
        )
        .unwrap();
        let mut pager = service
            .list_users_pager(ListUsersParams::new("testString"))
            .unwrap();

        let err = pager.get_next().await.unwrap_err();
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.to_string(), "HTTP 403: Not authorized");
        assert!(pager.has_next());
    }
}
