//! Integration tests for the HTTP gateway against a mock upstream

use std::sync::Arc;
use std::time::Duration;

use armory_cache::{CacheStore, MemoryStore, cache_key};
use armory_client::{ApiConfig, Backoff, Error, HttpGateway, Region, RetryPolicy};
use bytes::Bytes;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> ApiConfig {
    ApiConfig::new("test-id", "test-secret", Region::US)
        .with_token_url(format!("{}/oauth/token", server.uri()))
        .with_api_base(server.uri())
}

/// Tests opt into log output via `RUST_LOG`; repeat initialization from
/// other tests in the binary is fine.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Backoff::Linear { base: Duration::from_millis(10) })
}

async fn mount_token_endpoint(server: &MockServer, expected_calls: u64) {
    mount_token_endpoint_with_ttl(server, expected_calls, 3600).await;
}

async fn mount_token_endpoint_with_ttl(server: &MockServer, expected_calls: u64, expires_in: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(basic_auth("test-id", "test-secret"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": expires_in,
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn gateway(server: &MockServer, retry: RetryPolicy) -> HttpGateway {
    init_tracing();
    HttpGateway::new(test_config(server), Arc::new(MemoryStore::new()))
        .expect("gateway construction")
        .with_retry(retry)
}

#[tokio::test]
async fn test_token_fetched_once_within_validity_window() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server, RetryPolicy::none());
    let url_first = format!("{}/data/first", server.uri());
    let url_second = format!("{}/data/second", server.uri());

    let _: serde_json::Value = gateway
        .get(&url_first, &[], armory_client::Payload::Dynamic)
        .await
        .unwrap();
    let _: serde_json::Value = gateway
        .get(&url_second, &[], armory_client::Payload::Dynamic)
        .await
        .unwrap();
    // Mock expectations assert the token endpoint saw exactly one call.
}

#[tokio::test]
async fn test_expired_token_refreshed_on_next_use() {
    let server = MockServer::start().await;
    // expires_in of 30s is below the 60s margin, so the token is already
    // expired when the second request checks it.
    mount_token_endpoint_with_ttl(&server, 2, 30).await;

    Mock::given(method("GET"))
        .and(path("/data/first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .mount(&server)
        .await;

    let gateway = gateway(&server, RetryPolicy::none());
    let url_first = format!("{}/data/first", server.uri());
    let url_second = format!("{}/data/second", server.uri());

    let _: serde_json::Value = gateway
        .get(&url_first, &[], armory_client::Payload::Dynamic)
        .await
        .unwrap();
    let _: serde_json::Value = gateway
        .get(&url_second, &[], armory_client::Payload::Dynamic)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/thing"))
        .and(query_param("locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server, RetryPolicy::none());
    let url = format!("{}/data/thing", server.uri());

    let first: serde_json::Value = gateway
        .get(&url, &[], armory_client::Payload::Static)
        .await
        .unwrap();
    let second: serde_json::Value = gateway
        .get(&url, &[], armory_client::Payload::Static)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cache_hit_performs_no_network_calls() {
    init_tracing();
    let server = MockServer::start().await;
    // Neither the token endpoint nor any data endpoint may be called.
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let url = format!("{}/data/thing", server.uri());
    // The gateway merges the default locale before deriving the key.
    let key = cache_key(&url, &[("locale", "en_US")]).unwrap();
    store
        .put(&key, Bytes::from_static(br#"{"id": 42}"#), Duration::from_secs(60))
        .await
        .unwrap();

    let gateway = HttpGateway::new(test_config(&server), store).unwrap();
    let value: serde_json::Value = gateway
        .get(&url, &[], armory_client::Payload::Static)
        .await
        .unwrap();
    assert_eq!(value, json!({"id": 42}));
}

#[tokio::test]
async fn test_malformed_cached_body_degrades_to_refetch() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/thing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let url = format!("{}/data/thing", server.uri());
    let key = cache_key(&url, &[("locale", "en_US")]).unwrap();
    // A cached body that is not valid JSON must read as a miss, not poison
    // the key until its TTL expires.
    store
        .put(&key, Bytes::from_static(b"{truncated"), Duration::from_secs(60))
        .await
        .unwrap();

    let gateway = HttpGateway::new(test_config(&server), store).unwrap();
    let value: serde_json::Value = gateway
        .get(&url, &[], armory_client::Payload::Static)
        .await
        .unwrap();
    assert_eq!(value, json!({"id": 9}));
}

#[tokio::test]
async fn test_retry_bound_exhausted_on_persistent_503() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    // 2 retries = 3 total attempts, all failing.
    Mock::given(method("GET"))
        .and(path("/data/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let gateway = gateway(&server, fast_retries(2));
    let url = format!("{}/data/flaky", server.uri());

    let result: Result<serde_json::Value, _> = gateway
        .get(&url, &[], armory_client::Payload::Dynamic)
        .await;
    match result {
        Err(Error::Upstream { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected upstream 503, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transient_failure_then_success() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let gateway = gateway(&server, fast_retries(2));
    let url = format!("{}/data/flaky", server.uri());

    let value: serde_json::Value = gateway
        .get(&url, &[], armory_client::Payload::Dynamic)
        .await
        .unwrap();
    assert_eq!(value, json!({"ok": true}));
}

#[tokio::test]
async fn test_non_retryable_status_fails_immediately() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Not Found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server, fast_retries(2));
    let url = format!("{}/data/missing", server.uri());

    let result: Result<serde_json::Value, _> = gateway
        .get(&url, &[], armory_client::Payload::Dynamic)
        .await;
    match result {
        Err(Error::Upstream { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected upstream 404, got {other:?}"),
    }
}

#[tokio::test]
async fn test_caller_locale_takes_precedence() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/thing"))
        .and(query_param("locale", "pt_BR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server, RetryPolicy::none());
    let url = format!("{}/data/thing", server.uri());

    let _: serde_json::Value = gateway
        .get(&url, &[("locale", "pt_BR")], armory_client::Payload::Static)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejected_credentials_surface_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let gateway = gateway(&server, RetryPolicy::none());
    let url = format!("{}/data/thing", server.uri());

    let result: Result<serde_json::Value, _> = gateway
        .get(&url, &[], armory_client::Payload::Dynamic)
        .await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

#[tokio::test]
async fn test_bearer_token_attached_to_data_requests() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/data/thing"))
        .and(wiremock::matchers::header(
            "authorization",
            "Bearer test-token",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server, RetryPolicy::none());
    let url = format!("{}/data/thing", server.uri());

    let _: serde_json::Value = gateway
        .get(&url, &[], armory_client::Payload::Dynamic)
        .await
        .unwrap();
}
