//! Tests for the IDR endpoint operations

use super::*;
use chrono::{TimeZone, Utc};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IdrClient {
    let config = ClientConfig::builder()
        .url(format!("{}/api/", server.uri()))
        .username("user@example.com")
        .org("example")
        .api_key("test-key")
        .build()
        .unwrap();
    IdrClient::new(&config).unwrap()
}

// ============================================================================
// Request Shaping Tests
// ============================================================================

#[test_case(1, true, None ; "single id random")]
#[test_case(1, false, None ; "single id sequential")]
#[test_case(5, true, Some("nonsequential") ; "batch random")]
#[test_case(5, false, Some("sequential") ; "batch sequential")]
fn test_reserve_batch_type(count: u32, random: bool, expected: Option<&str>) {
    let params = ReserveRequest::new(count, random, 2024, "example").to_params();
    assert_eq!(params.get("batch_type").map(String::as_str), expected);
}

#[test]
fn test_reserve_params() {
    let params = ReserveRequest::new(3, false, 2023, "acme").to_params();

    assert_eq!(params.get("cve_year"), Some(&"2023".to_string()));
    assert_eq!(params.get("amount"), Some(&"3".to_string()));
    assert_eq!(params.get("short_name"), Some(&"acme".to_string()));
    assert_eq!(params.len(), 4);
}

#[test]
fn test_list_filter_empty() {
    assert!(CveListFilter::new().to_params().is_empty());
}

#[test]
fn test_list_filter_state_upper_cased() {
    let params = CveListFilter::new().state("active").to_params();
    assert_eq!(params.get("state"), Some(&"ACTIVE".to_string()));
    assert_eq!(params.len(), 1);
}

#[test]
fn test_list_filter_all_fields() {
    let lt = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let gt = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
    let params = CveListFilter::new()
        .year(2024)
        .state("Reserved")
        .reserved_before(lt)
        .reserved_after(gt)
        .to_params();

    assert_eq!(params.get("cve_id_year"), Some(&"2024".to_string()));
    assert_eq!(params.get("state"), Some(&"RESERVED".to_string()));
    assert_eq!(
        params.get("time_reserved.lt"),
        Some(&"2024-06-01T00:00:00+00:00".to_string())
    );
    assert_eq!(
        params.get("time_reserved.gt"),
        Some(&"2024-01-01T12:30:00+00:00".to_string())
    );
}

#[test]
fn test_batch_type_display() {
    assert_eq!(BatchType::from_random(true).to_string(), "nonsequential");
    assert_eq!(BatchType::from_random(false).to_string(), "sequential");
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_reserve_single() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cve-id"))
        .and(query_param("cve_year", "2024"))
        .and(query_param("amount", "1"))
        .and(query_param("short_name", "example"))
        .and(query_param_is_missing("batch_type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cve_ids": [{"cve_id": "CVE-2024-1000", "state": "RESERVED"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.reserve(1, true, 2024, "example").await.unwrap();
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["cve_ids"][0]["cve_id"], "CVE-2024-1000");
}

#[tokio::test]
async fn test_reserve_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cve-id"))
        .and(query_param("amount", "5"))
        .and(query_param("batch_type", "nonsequential"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cve_ids": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.reserve(5, true, 2024, "example").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_reserve_zero_is_rejected_without_request() {
    let mock_server = MockServer::start().await;

    let client = client_for(&mock_server);
    let err = client.reserve(0, false, 2024, "example").await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_show_cve() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cve-id/CVE-2024-1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cve_id": "CVE-2024-1000",
            "state": "PUBLISHED",
            "owning_cna": "example"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body: Value = client
        .show_cve("CVE-2024-1000")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["state"], "PUBLISHED");
}

#[tokio::test]
async fn test_show_cve_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cve-id/CVE-2024-9999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "CVEID_NOT_FOUND"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.show_cve("CVE-2024-9999").await.unwrap_err();

    assert!(err.to_string().contains("404 Client Error"));
    assert!(err.to_string().contains("CVEID_NOT_FOUND"));
}

#[tokio::test]
async fn test_show_cve_id_stays_one_path_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let _ = client.show_cve("../health-check").await;
    let _ = client.show_cve("CVE-2024-1?state=PUBLISHED").await;

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.path(), "/api/cve-id/..%2Fhealth-check");
    assert_eq!(requests[1].url.path(), "/api/cve-id/CVE-2024-1%3Fstate=PUBLISHED");
    assert_eq!(requests[1].url.query(), None);
}

#[test_case("" ; "empty")]
#[test_case(".." ; "parent")]
#[test_case("." ; "current")]
#[tokio::test]
async fn test_show_cve_rejects_non_ids(cve_id: &str) {
    let mock_server = MockServer::start().await;

    let client = client_for(&mock_server);
    let err = client.show_cve(cve_id).await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_cves_with_filters_across_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cve-id"))
        .and(query_param("state", "RESERVED"))
        .and(query_param("cve_id_year", "2024"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cve_ids": [{"cve_id": "CVE-2024-0001"}],
            "nextPage": 2
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cve-id"))
        .and(query_param("state", "RESERVED"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cve_ids": [{"cve_id": "CVE-2024-0002"}],
            "nextPage": null
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let filter = CveListFilter::new().year(2024).state("reserved");
    let items: Vec<Value> = client.list_cves(&filter).try_collect().await.unwrap();

    let ids: Vec<_> = items.iter().map(|i| i["cve_id"].clone()).collect();
    assert_eq!(ids, vec![json!("CVE-2024-0001"), json!("CVE-2024-0002")]);
}

#[tokio::test]
async fn test_quota_uses_configured_org() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/org/example/id_quota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_quota": 100,
            "total_reserved": 7,
            "available": 93
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body: Value = client.quota().await.unwrap().json().await.unwrap();

    assert_eq!(body["available"], 93);
}

#[tokio::test]
async fn test_ping() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health-check"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.ping().await.unwrap().status().is_success());
}
