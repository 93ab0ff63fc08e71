//! End-to-end pipeline tests against a mocked platform API.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use order_reconciler::infrastructure::api::CentralApiAdapter;
use order_reconciler::{pipeline, ApiError, OrderRecord, PipelineError, RunConfig, StoreId, TimeWindow};

const CLIENT: &str = "acme";
const BEARER: &str = "bearer-1";
const SERVER_TOKEN: &str = "srv-1";

/// Run configuration pointing every base URL at the mock server.
fn config(server: &MockServer, dir: &Path, store_ids: &[&str]) -> RunConfig {
    RunConfig {
        client: CLIENT.to_string(),
        username: "user".to_string(),
        password: "secret".to_string(),
        store_ids: store_ids.iter().map(|s| StoreId::new(*s)).collect(),
        window: TimeWindow::new("2024-01-01T00:00:00Z", "2024-01-31T23:59:59Z"),
        central_base_url: Some(server.uri()),
        delivery_base_url: Some(server.uri()),
        ledger_path: dir.join("processed_orders.csv"),
        snapshot_path: dir.join("orders.json"),
        http_timeout: Duration::from_secs(5),
    }
}

fn adapter(config: &RunConfig) -> Arc<CentralApiAdapter> {
    Arc::new(CentralApiAdapter::new(config.api_config()).unwrap())
}

/// Mount the login and configuration endpoints.
async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/{CLIENT}/auth")))
        .and(body_json(json!({
            "username": "user",
            "psw": "secret",
            "auth_type": "U"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": BEARER})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{CLIENT}/configuration")))
        .and(header("authorization", format!("Bearer {BEARER}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"INTEGRATIONS": {"UBER": {"server_token": SERVER_TOKEN}}}
        })))
        .mount(server)
        .await;
}

/// Mount a store-configuration endpoint resolving to `uuid`.
async fn mount_store(server: &MockServer, store_id: &str, uuid: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{CLIENT}/stores/{store_id}/configuration")))
        .and(header("authorization", format!("Bearer {BEARER}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"uber_uuid": uuid}]
        })))
        .mount(server)
        .await;
}

fn order_json(id: serde_json::Value, created_time: &str) -> serde_json::Value {
    json!({"id": id, "created_time": created_time, "status": "delivered"})
}

fn snapshot_ids(path: &Path) -> Vec<String> {
    let orders: Vec<OrderRecord> =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let mut ids: Vec<String> = orders.into_iter().map(|o| o.id).collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn end_to_end_miss_rate() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("processed_orders.csv"),
        "ext_id,processed_at\n1,2024-01-20\n2,2024-01-20\n3,2024-01-21\n",
    )
    .unwrap();

    mount_auth(&server).await;
    mount_store(&server, "store-1", "uuid-1").await;

    // Mixed string/number ids on the wire, all normalized to strings.
    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .and(header("authorization", format!("Bearer {SERVER_TOKEN}")))
        .and(query_param("start_time", "2024-01-01T00:00:00Z"))
        .and(query_param("end_time", "2024-01-31T23:59:59Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                order_json(json!("1"), "2024-01-15T10:00:00Z"),
                order_json(json!(2), "2024-01-16T10:00:00Z"),
                order_json(json!("3"), "2024-01-17T10:00:00Z"),
                order_json(json!(4), "2024-01-18T10:00:00Z"),
            ]
        })))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let report = pipeline::run(&config, adapter(&config)).await.unwrap();

    assert_eq!(report.total_fetched, 4);
    assert_eq!(report.missing_count, 1);
    assert_eq!(report.missing_ids(), vec!["4"]);
    assert_eq!(report.miss_rate, 25.0);
    assert_eq!(snapshot_ids(&config.snapshot_path), vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn two_stores_with_pagination() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("processed_orders.csv"), "ext_id\nx1\n").unwrap();

    mount_auth(&server).await;
    mount_store(&server, "store-x", "uuid-x").await;
    mount_store(&server, "store-y", "uuid-y").await;

    // Store X: two orders, then an empty page behind the continuation token.
    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-x/orders"))
        .and(query_param_is_missing("next_page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                order_json(json!("x1"), "2024-01-15T10:00:00Z"),
                order_json(json!("x2"), "2024-01-15T11:00:00Z"),
            ],
            "pagination_data": {"next_page_token": "page-2"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-x/orders"))
        .and(query_param("next_page_token", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    // Store Y: one page, no continuation token.
    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-y/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [order_json(json!("y1"), "2024-01-16T10:00:00Z")]
        })))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-x", "store-y"]);
    let report = pipeline::run(&config, adapter(&config)).await.unwrap();

    assert_eq!(report.total_fetched, 3);
    assert_eq!(snapshot_ids(&config.snapshot_path), vec!["x1", "x2", "y1"]);
}

#[tokio::test]
async fn todays_orders_are_excluded() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("processed_orders.csv"), "ext_id\nold-1\n").unwrap();

    mount_auth(&server).await;
    mount_store(&server, "store-1", "uuid-1").await;

    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                order_json(json!("old-1"), "2024-01-15T10:00:00Z"),
                order_json(json!("in-flight"), &Utc::now().to_rfc3339()),
            ]
        })))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let report = pipeline::run(&config, adapter(&config)).await.unwrap();

    assert_eq!(report.total_fetched, 1);
    assert_eq!(report.missing_count, 0);
    assert_eq!(snapshot_ids(&config.snapshot_path), vec!["old-1"]);
}

#[tokio::test]
async fn failing_store_is_excluded_from_fetch() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("processed_orders.csv"), "ext_id\nnone\n").unwrap();

    mount_auth(&server).await;
    mount_store(&server, "store-b", "uuid-b").await;

    // Store A's configuration endpoint is down.
    Mock::given(method("GET"))
        .and(path(format!("/v1/{CLIENT}/stores/store-a/configuration")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-b/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [order_json(json!("b1"), "2024-01-16T10:00:00Z")]
        })))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-a", "store-b"]);
    let report = pipeline::run(&config, adapter(&config)).await.unwrap();

    assert_eq!(report.total_fetched, 1);
    assert_eq!(report.missing_ids(), vec!["b1"]);
}

#[tokio::test]
async fn login_without_token_aborts() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/v1/{CLIENT}/auth")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let result = pipeline::run(&config, adapter(&config)).await;

    assert!(matches!(
        result,
        Err(PipelineError::Login(ApiError::MissingField { field: "token" }))
    ));
}

#[tokio::test]
async fn missing_ledger_reports_zero() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    // No processed_orders.csv in dir.

    mount_auth(&server).await;
    mount_store(&server, "store-1", "uuid-1").await;

    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [order_json(json!("1"), "2024-01-15T10:00:00Z")]
        })))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let report = pipeline::run(&config, adapter(&config)).await.unwrap();

    assert_eq!(report.total_fetched, 0);
    assert_eq!(report.missing_count, 0);
    assert_eq!(report.miss_rate, 0.0);
}

#[tokio::test]
async fn mid_pagination_error_keeps_accumulated_orders() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("processed_orders.csv"), "ext_id\n1\n").unwrap();

    mount_auth(&server).await;
    mount_store(&server, "store-1", "uuid-1").await;

    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .and(query_param_is_missing("next_page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [order_json(json!("1"), "2024-01-15T10:00:00Z")],
            "pagination_data": {"next_page_token": "page-2"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .and(query_param("next_page_token", "page-2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let report = pipeline::run(&config, adapter(&config)).await.unwrap();

    assert_eq!(report.total_fetched, 1);
    assert_eq!(report.missing_count, 0);
}

#[tokio::test]
async fn empty_fetch_aborts_run() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_auth(&server).await;
    mount_store(&server, "store-1", "uuid-1").await;

    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let result = pipeline::run(&config, adapter(&config)).await;

    assert!(matches!(result, Err(PipelineError::NoOrders)));
}

#[tokio::test]
async fn malformed_only_page_still_follows_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("processed_orders.csv"), "ext_id\n").unwrap();

    mount_auth(&server).await;
    mount_store(&server, "store-1", "uuid-1").await;

    // First page has entries but none with the required fields; the
    // continuation token must still be honored.
    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .and(query_param_is_missing("next_page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"unexpected": true}, {"id": "no-created-time"}],
            "pagination_data": {"next_page_token": "page-2"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .and(query_param("next_page_token", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [order_json(json!("2"), "2024-01-16T10:00:00Z")]
        })))
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let report = pipeline::run(&config, adapter(&config)).await.unwrap();

    assert_eq!(report.total_fetched, 1);
    assert_eq!(report.missing_ids(), vec!["2"]);
}

#[tokio::test]
async fn failed_login_is_a_single_attempt() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/v1/{CLIENT}/auth")))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let result = pipeline::run(&config, adapter(&config)).await;

    assert!(matches!(
        result,
        Err(PipelineError::Login(ApiError::Status { status: 500, .. }))
    ));
    server.verify().await;
}

#[tokio::test]
async fn failed_page_fetch_is_a_single_attempt() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_auth(&server).await;
    mount_store(&server, "store-1", "uuid-1").await;

    Mock::given(method("GET"))
        .and(path("/v1/stores/uuid-1/orders"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, dir.path(), &["store-1"]);
    let result = pipeline::run(&config, adapter(&config)).await;

    assert!(matches!(result, Err(PipelineError::NoOrders)));
    server.verify().await;
}
