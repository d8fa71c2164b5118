//! Case Management API v1
//!
//! Lists support cases for the authenticated account. Pages are linked
//! through `next.href`, whose `offset` query parameter addresses the next
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
pub const DEFAULT_SERVICE_URL: &str = "https://support-center.cloud.ibm.com/case-management/v1";

/// Service name used for external configuration
pub const DEFAULT_SERVICE_NAME: &str = "case_management";

const SERVICE_VERSION: &str = "v1";

// ============================================================================
// Client
// ============================================================================

/// Case Management client
#[derive(Debug, Clone)]
pub struct CaseManagementV1 {
    client: Arc<HttpClient>,
}

impl CaseManagementV1 {
    /// Create a client from explicit configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, DEFAULT_SERVICE_URL)?,
        })
    }

    /// Create a client from `CASE_MANAGEMENT_*` environment variables
    pub fn new_from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Service URL requests are sent to
    pub fn service_url(&self) -> Option<&str> {
        self.client.service_url()
    }

    /// Get one page of cases
    pub async fn get_cases(&self, params: &GetCasesParams) -> Result<DetailedResponse<CaseList>> {
        let request = ServiceRequest::get("/cases")
            .query_opt("offset", params.offset.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("search", params.search.as_deref())
            .query_opt("sort", params.sort.as_deref())
            .query_list("status", params.status.as_deref())
            .query_list("fields", params.fields.as_deref())
            .sdk_headers(DEFAULT_SERVICE_NAME, SERVICE_VERSION, "get_cases");

        self.client.send_json(request).await
    }

    /// Pager over all cases matching `params`
    pub fn get_cases_pager(&self, params: GetCasesParams) -> Result<GetCasesPager> {
        Pager::new(GetCases(self.clone()), params)
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// Parameters for [`CaseManagementV1::get_cases`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCasesParams {
    /// Number of cases to skip
    pub offset: Option<String>,
    /// Maximum number of cases per page
    pub limit: Option<i64>,
    /// Free-text search string
    pub search: Option<String>,
    /// Sort field, prefix with `-` for descending
    pub sort: Option<String>,
    /// Case statuses to include
    pub status: Option<Vec<String>>,
    /// Case fields to return
    pub fields: Option<Vec<String>>,
}

impl PageParams for GetCasesParams {
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

/// One page of cases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseList {
    /// Total number of matching cases
    #[serde(default)]
    pub total_count: Option<i64>,
    /// Pagination links
    #[serde(flatten)]
    pub links: PageLinks,
    /// Cases on this page
    #[serde(default)]
    pub cases: Vec<Case>,
}

impl PageEnvelope for CaseList {
    type Item = Case;

    fn links(&self) -> &PageLinks {
        &self.links
    }

    fn into_items(self) -> Vec<Case> {
        self.cases
    }
}

/// A support case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Remaining fields as sent by the server
    #[serde(flatten)]
    pub extra: JsonObject,
}

// ============================================================================
// Pager
// ============================================================================

/// [`CaseManagementV1::get_cases`] bound to a client
#[derive(Debug, Clone)]
pub struct GetCases(pub CaseManagementV1);

#[async_trait]
impl ListOperation for GetCases {
    type Params = GetCasesParams;
    type Page = CaseList;

    const OPERATION_ID: &'static str = "get_cases";
    const TOKEN_RULE: TokenRule = TokenRule::NextHref { param: "offset" };

    async fn fetch_page(&self, params: &GetCasesParams) -> Result<DetailedResponse<CaseList>> {
        self.0.get_cases(params).await
    }
}

/// Pager over [`CaseManagementV1::get_cases`]
pub type GetCasesPager = Pager<GetCases>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::services::test_support::config_for;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_service_url() {
        let service = CaseManagementV1::new(ServiceConfig::default()).unwrap();
        assert_eq!(service.service_url(), Some(DEFAULT_SERVICE_URL));
    }

    #[tokio::test]
    async fn test_get_cases_request_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cases"))
            .and(query_param("limit", "10"))
            .and(query_param("search", "outage"))
            .and(query_param("status", "new,in_progress"))
            .and(query_param_is_missing("offset"))
            .and(header(
                "X-IBMCloud-SDK-Analytics",
                "service_name=case_management;service_version=v1;operation_id=get_cases",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "cases": [{"number": "CS0001", "severity": 4, "contact_type": "Cloud Support Center"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = CaseManagementV1::new(config_for(&mock_server)).unwrap();
        let params = GetCasesParams {
            limit: Some(10),
            search: Some("outage".to_string()),
            status: Some(vec!["new".to_string(), "in_progress".to_string()]),
            ..GetCasesParams::default()
        };
        let response = service.get_cases(&params).await.unwrap();

        assert_eq!(response.status, 200);
        let case = &response.result.cases[0];
        assert_eq!(case.number.as_deref(), Some("CS0001"));
        assert_eq!(case.severity, Some(4));
        assert_eq!(case.extra["contact_type"], "Cloud Support Center");
    }

    #[tokio::test]
    async fn test_get_cases_pager_get_all() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cases"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "next": {"href": "https://myhost.com/somePath?offset=1"},
                "total_count": 2,
                "limit": 1,
                "cases": [{"number": "CS0001"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/cases"))
            .and(query_param("offset", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 2,
                "limit": 1,
                "cases": [{"number": "CS0002"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = CaseManagementV1::new(config_for(&mock_server)).unwrap();
        let mut pager = service
            .get_cases_pager(GetCasesParams {
                limit: Some(1),
                ..GetCasesParams::default()
            })
            .unwrap();

        let cases = pager.get_all().await.unwrap();
        let numbers: Vec<_> = cases.iter().filter_map(|c| c.number.as_deref()).collect();
        assert_eq!(numbers, vec!["CS0001", "CS0002"]);
        assert!(!pager.has_next());
    }

    #[test]
    fn test_get_cases_pager_rejects_offset() {
        let service = CaseManagementV1::new(ServiceConfig::default()).unwrap();
        let err = service
            .get_cases_pager(GetCasesParams {
                offset: Some("5".to_string()),
                ..GetCasesParams::default()
            })
            .unwrap_err();
        assert!(matches!(err, Error::ContinuationPreset { .. }));
    }
}
