//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: service config → service client → pager → items

use futures::TryStreamExt;
use platform_services::services::case_management::GetCasesParams;
use platform_services::services::enterprise_usage_reports::GetResourceUsageReportParams;
use platform_services::services::iam_access_groups::{
    ListAccessGroupMembersParams, ListAccessGroupsParams,
};
use platform_services::services::resource_controller::ListResourceInstancesParams;
use platform_services::services::{
    CaseManagementV1, EnterpriseUsageReportsV1, IamAccessGroupsV2, ResourceControllerV2,
};
use platform_services::{AuthConfig, Error, ServiceConfig};
use serde_json::json;
use wiremock::matchers::{
    body_string_contains, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn no_auth(server: &MockServer) -> ServiceConfig {
    ServiceConfig::new(AuthConfig::NoAuth).with_service_url(server.uri())
}

// ============================================================================
// Two-page fixtures: page 1 carries a continuation, page 2 does not
// ============================================================================

#[tokio::test]
async fn test_access_groups_get_next_until_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/groups"))
        .and(query_param("account_id", "testString"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 1,
            "offset": 0,
            "total_count": 2,
            "next": {"href": "https://myhost.com/somePath?offset=1"},
            "groups": [{"id": "AccessGroupId-1", "name": "first"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/groups"))
        .and(query_param("account_id", "testString"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 1,
            "offset": 1,
            "total_count": 2,
            "groups": [{"id": "AccessGroupId-2", "name": "second"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = IamAccessGroupsV2::new(no_auth(&mock_server)).unwrap();
    let mut params = ListAccessGroupsParams::new("testString");
    params.limit = Some(1);
    let mut pager = service.list_access_groups_pager(params).unwrap();

    let mut names = Vec::new();
    while pager.has_next() {
        for group in pager.get_next().await.unwrap() {
            names.extend(group.name);
        }
    }

    assert_eq!(names, vec!["first", "second"]);
    assert_eq!(pager.pages_fetched(), 2);

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::PagerExhausted));
    assert_eq!(err.to_string(), "No more results available");
}

#[tokio::test]
async fn test_access_group_members_get_all_with_iam_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(body_string_contains("apikey=my-apikey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "iam-access-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/groups/group-1/members"))
        .and(header("Authorization", "Bearer iam-access-token"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 1,
            "total_count": 2,
            "next": {"href": "/v2/groups/group-1/members?limit=1&offset=1"},
            "members": [{"iam_id": "IBMid-1", "type": "user"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/groups/group-1/members"))
        .and(header("Authorization", "Bearer iam-access-token"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 1,
            "total_count": 2,
            "members": [{"iam_id": "iam-ServiceId-2", "type": "service"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = AuthConfig::Iam {
        apikey: "my-apikey".to_string(),
        url: Some(mock_server.uri()),
        client_id: None,
        client_secret: None,
        scope: None,
    };
    let config = ServiceConfig::new(auth).with_service_url(mock_server.uri());
    let service = IamAccessGroupsV2::new(config).unwrap();

    let mut params = ListAccessGroupMembersParams::new("group-1");
    params.limit = Some(1);
    let members = service
        .list_access_group_members_pager(params)
        .unwrap()
        .get_all()
        .await
        .unwrap();

    let ids: Vec<_> = members.iter().filter_map(|m| m.iam_id.as_deref()).collect();
    assert_eq!(ids, vec!["IBMid-1", "iam-ServiceId-2"]);
}

#[tokio::test]
async fn test_resource_instances_page_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/resource_instances"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows_count": 1,
            "next_url": "/v2/resource_instances?limit=1&start=NjA0MjQ",
            "resources": [{"guid": "guid-1", "state": "active"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/resource_instances"))
        .and(query_param("start", "NjA0MjQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows_count": 1,
            "next_url": null,
            "resources": [{"guid": "guid-2", "state": "active"}]
        })))
        .mount(&mock_server)
        .await;

    let service = ResourceControllerV2::new(no_auth(&mock_server)).unwrap();
    let params = ListResourceInstancesParams {
        limit: Some(1),
        ..Default::default()
    };

    let pages: Vec<_> = service
        .list_resource_instances_pager(params)
        .unwrap()
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1][0].guid.as_deref(), Some("guid-2"));
}

#[tokio::test]
async fn test_enterprise_reports_item_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resource-usage-reports"))
        .and(query_param("enterprise_id", "ent-1"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 2,
            "first": {"href": "/v1/resource-usage-reports?enterprise_id=ent-1"},
            "next": {"href": "/v1/resource-usage-reports?enterprise_id=ent-1&offset=2"},
            "reports": [{"entity_id": "a"}, {"entity_id": "b"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/resource-usage-reports"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 2,
            "reports": [{"entity_id": "c"}]
        })))
        .mount(&mock_server)
        .await;

    let service = EnterpriseUsageReportsV1::new(no_auth(&mock_server)).unwrap();
    let params = GetResourceUsageReportParams {
        enterprise_id: Some("ent-1".to_string()),
        limit: Some(2),
        ..Default::default()
    };

    let reports: Vec<_> = service
        .get_resource_usage_report_pager(params)
        .unwrap()
        .into_items()
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<_> = reports
        .iter()
        .filter_map(|r| r.entity_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

// ============================================================================
// Failure handling
// ============================================================================

#[tokio::test]
async fn test_get_all_fails_without_partial_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "next": {"href": "/cases?offset=1"},
            "cases": [{"number": "CS0001"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cases"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "errors": [{"message": "Service unavailable"}]
        })))
        .mount(&mock_server)
        .await;

    let service = CaseManagementV1::new(no_auth(&mock_server)).unwrap();
    let mut pager = service.get_cases_pager(GetCasesParams::default()).unwrap();

    let err = pager.get_all().await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert!(pager.has_next());
}

#[tokio::test]
async fn test_transport_retries_are_invisible_to_the_pager() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases"))
        .respond_with(ResponseTemplate::new(503).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "cases": [{"number": "CS0001"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let yaml = format!(
        "service_url: {}\nenable_retries: true\nmax_retries: 2\nauth:\n  type: noauth\n",
        mock_server.uri()
    );
    let config = ServiceConfig::from_yaml_str(&yaml).unwrap();
    let service = CaseManagementV1::new(config).unwrap();

    let mut pager = service.get_cases_pager(GetCasesParams::default()).unwrap();
    let cases = pager.get_all().await.unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(pager.pages_fetched(), 1);
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_preset_continuation_is_rejected_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = IamAccessGroupsV2::new(no_auth(&mock_server)).unwrap();
    let mut params = ListAccessGroupsParams::new("testString");
    params.offset = Some("10".to_string());

    let err = service.list_access_groups_pager(params).unwrap_err();
    assert_eq!(err.to_string(), "the params.offset field should not be set");
}
