//! Integration tests for collecting resources over HTTP
//!
//! Each test runs its own mock server; every page request is matched on its
//! full query string so the cursor sequence is checked exactly.

use mockito::{Matcher, Mock, ServerGuard};
use salesledger::adapters::retail::{ResourceKind, RetailClient};
use salesledger::config::{secret_string, ApiConfig, RetryConfig};
use salesledger::core::collect::Collector;
use salesledger::domain::{DecodeError, FetchError, LedgerError, Register, Sale};
use std::sync::Arc;

const TOKEN: &str = "test-token";

fn api_config(server: &ServerGuard) -> ApiConfig {
    let mut config = ApiConfig::new("teststore", secret_string(TOKEN.to_string()));
    config.base_url = Some(server.url());
    config.timeout_seconds = 5;
    config.retry = RetryConfig {
        max_retries: 1,
        initial_delay_ms: 1,
        max_delay_ms: 5,
        backoff_multiplier: 2.0,
    };
    config
}

fn collector(config: &ApiConfig) -> Collector {
    let client = RetailClient::new(config).unwrap();
    Collector::new(Arc::new(client)).with_page_size(config.page_size)
}

fn page_query(after: i64) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("after".into(), after.to_string()),
        Matcher::UrlEncoded("deleted".into(), "false".into()),
        Matcher::UrlEncoded("page_size".into(), "10000".into()),
    ])
}

async fn mock_page(
    server: &mut ServerGuard,
    path: &str,
    after: i64,
    body: &str,
) -> Mock {
    server
        .mock("GET", path)
        .match_query(page_query(after))
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn test_sales_are_paged_until_empty_page() {
    let mut server = mockito::Server::new_async().await;
    let first = mock_page(
        &mut server,
        "/sales",
        1,
        r#"{"data":[{"id":"a","status":"CLOSED"},{"id":"b","line_items":null,"payments":null}],"version":{"min":2,"max":10}}"#,
    )
    .await;
    let second = mock_page(
        &mut server,
        "/sales",
        10,
        r#"{"data":[{"id":"c"}],"version":{"min":11,"max":25}}"#,
    )
    .await;
    let last = mock_page(
        &mut server,
        "/sales",
        25,
        r#"{"data":[],"version":null}"#,
    )
    .await;

    let config = api_config(&server);
    let sales: Vec<Sale> = collector(&config)
        .collect(ResourceKind::Sales)
        .await
        .unwrap();

    let ids: Vec<&str> = sales.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(sales[0].status.as_deref(), Some("CLOSED"));
    assert!(sales[1].payments.is_empty());

    first.assert_async().await;
    second.assert_async().await;
    last.assert_async().await;
}

#[tokio::test]
async fn test_registers_fetched_in_single_request() {
    let mut server = mockito::Server::new_async().await;
    let page = mock_page(
        &mut server,
        "/registers",
        0,
        r#"{"data":[{"id":"r1","name":"Front"},{"id":"r2","name":"Back"}],"version":{"min":1,"max":2}}"#,
    )
    .await;

    let config = api_config(&server);
    let registers: Vec<Register> = collector(&config)
        .collect(ResourceKind::Registers)
        .await
        .unwrap();

    assert_eq!(registers.len(), 2);
    assert_eq!(registers[1].name.as_deref(), Some("Back"));
    page.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let denied = server
        .mock("GET", "/customers")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error":"invalid token"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = api_config(&server);
    let result: Result<Vec<salesledger::domain::Customer>, LedgerError> =
        collector(&config).collect(ResourceKind::Customers).await;

    assert!(matches!(
        result,
        Err(LedgerError::Fetch(FetchError::Unauthorized { .. }))
    ));
    denied.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .expect(3)
        .create_async()
        .await;

    let mut config = api_config(&server);
    config.retry.max_retries = 3;

    let result: Result<Vec<salesledger::domain::User>, LedgerError> =
        collector(&config).collect(ResourceKind::Users).await;

    assert!(matches!(
        result,
        Err(LedgerError::Fetch(FetchError::ServerError { status: 503, .. }))
    ));
    failing.assert_async().await;
}

#[tokio::test]
async fn test_malformed_page_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _page = mock_page(&mut server, "/products", 1, r#"{"data": [oops"#).await;

    let config = api_config(&server);
    let result: Result<Vec<salesledger::domain::Product>, LedgerError> =
        collector(&config).collect(ResourceKind::Products).await;

    assert!(matches!(
        result,
        Err(LedgerError::Decode(DecodeError::InvalidPayload { cursor: 1, .. }))
    ));
}
