//! Tests against a live IDR deployment
//!
//! These tests require credentials for a test environment.
//! Set CVE_TEST_USER, CVE_TEST_ORG and CVE_TEST_API_KEY to run them.

use cvelib::{ClientConfig, IdrClient};

/// Build a dev-environment client from the environment, or skip
fn live_client() -> Option<IdrClient> {
    let username = std::env::var("CVE_TEST_USER").ok()?;
    let org = std::env::var("CVE_TEST_ORG").ok()?;
    let api_key = std::env::var("CVE_TEST_API_KEY").ok()?;

    let config = ClientConfig::builder()
        .environment("dev")
        .username(username)
        .org(org)
        .api_key(api_key)
        .build()
        .unwrap();
    Some(IdrClient::new(&config).unwrap())
}

#[tokio::test]
async fn test_live_ping() {
    let Some(client) = live_client() else {
        println!("Skipping: CVE_TEST_* not set");
        return;
    };

    let response = client.ping().await.unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_live_quota() {
    let Some(client) = live_client() else {
        println!("Skipping: CVE_TEST_* not set");
        return;
    };

    let body: serde_json::Value = client.quota().await.unwrap().json().await.unwrap();
    assert!(body.get("id_quota").is_some());
}
