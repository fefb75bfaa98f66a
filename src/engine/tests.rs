//! Tests for engine module

use super::*;
use crate::http::{HttpClientConfig, RetryPolicy};
use crate::pagination::{LinkHeaderPaginator, NoPaginator};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> HttpClient {
    let config = HttpClientConfig::builder()
        .retry(RetryPolicy::none())
        .build();
    HttpClient::with_config(config).unwrap()
}

async fn mount_three_pages(server: &MockServer) {
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}, {"id": 2}]))
                .insert_header(
                    "Link",
                    format!(
                        "<{base}/items?page=2>; rel=\"next\", <{base}/items?page=3>; rel=\"last\""
                    )
                    .as_str(),
                ),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 3}, {"id": 4}]))
                .insert_header(
                    "Link",
                    format!(
                        "<{base}/items?page=1>; rel=\"prev\", <{base}/items?page=3>; rel=\"next\""
                    )
                    .as_str(),
                ),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 5}]))
                .insert_header(
                    "Link",
                    format!("<{base}/items?page=2>; rel=\"prev\"").as_str(),
                ),
        )
        .mount(server)
        .await;
}

// ============================================================================
// WalkConfig / WalkStats Tests
// ============================================================================

#[test]
fn test_walk_config_default() {
    let config = WalkConfig::default();
    assert!(config.max_pages.is_none());
    assert_eq!(WalkConfig::new().with_max_pages(3).max_pages, Some(3));
}

#[test]
fn test_walk_stats_add_page() {
    let mut stats = WalkStats::new();
    stats.add_page(10);
    stats.add_page(5);
    assert_eq!(stats.pages, 2);
    assert_eq!(stats.records, 15);
    assert_eq!(stats.stop_reason, StopReason::LastPage);
}

// ============================================================================
// PageWalker Tests
// ============================================================================

#[tokio::test]
async fn test_walk_follows_next_links() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = test_client();
    let paginator = LinkHeaderPaginator::default();
    let walker = PageWalker::new(&client, &paginator);

    let mut ids = Vec::new();
    let stats = walker
        .walk(&format!("{}/items?page=1", server.uri()), |page| {
            ids.extend(page.iter().filter_map(|item| item["id"].as_i64()));
            true
        })
        .await
        .unwrap();

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.records, 5);
    assert_eq!(stats.stop_reason, StopReason::LastPage);
}

#[tokio::test]
async fn test_walk_handler_stops_early() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = test_client();
    let paginator = LinkHeaderPaginator::default();
    let walker = PageWalker::new(&client, &paginator);

    let stats = walker
        .walk(&format!("{}/items?page=1", server.uri()), |_| false)
        .await
        .unwrap();

    assert_eq!(stats.pages, 1);
    assert_eq!(stats.stop_reason, StopReason::Handler);
}

#[tokio::test]
async fn test_walk_max_pages() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = test_client();
    let paginator = LinkHeaderPaginator::default();
    let walker =
        PageWalker::new(&client, &paginator).with_config(WalkConfig::new().with_max_pages(2));

    let stats = walker
        .walk(&format!("{}/items?page=1", server.uri()), |_| true)
        .await
        .unwrap();

    assert_eq!(stats.pages, 2);
    assert_eq!(stats.records, 4);
    assert_eq!(stats.stop_reason, StopReason::MaxPages);
}

#[tokio::test]
async fn test_walk_zero_max_pages_fetches_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client();
    let paginator = LinkHeaderPaginator::default();
    let walker =
        PageWalker::new(&client, &paginator).with_config(WalkConfig::new().with_max_pages(0));

    let mut calls = 0;
    let stats = walker
        .walk(&format!("{}/items?page=1", server.uri()), |_| {
            calls += 1;
            true
        })
        .await
        .unwrap();

    assert_eq!(calls, 0);
    assert_eq!(stats.pages, 0);
    assert_eq!(stats.stop_reason, StopReason::MaxPages);
}

#[tokio::test]
async fn test_walk_max_pages_reaching_last_page() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = test_client();
    let paginator = LinkHeaderPaginator::default();
    let walker =
        PageWalker::new(&client, &paginator).with_config(WalkConfig::new().with_max_pages(3));

    let stats = walker
        .walk(&format!("{}/items?page=1", server.uri()), |_| true)
        .await
        .unwrap();

    assert_eq!(stats.pages, 3);
    assert_eq!(stats.stop_reason, StopReason::LastPage);
}

#[tokio::test]
async fn test_walk_without_pagination() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = test_client();
    let paginator = NoPaginator;
    let walker = PageWalker::new(&client, &paginator);

    let stats = walker
        .walk(&format!("{}/items?page=1", server.uri()), |_| true)
        .await
        .unwrap();

    assert_eq!(stats.pages, 1);
    assert_eq!(stats.records, 2);
}

#[tokio::test]
async fn test_walk_empty_body_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  "))
        .mount(&server)
        .await;

    let client = test_client();
    let paginator = LinkHeaderPaginator::default();
    let walker = PageWalker::new(&client, &paginator);

    let err = walker
        .walk(&format!("{}/empty", server.uri()), |_| true)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyResponse { .. }));
    assert_eq!(err.to_string(), "Got empty response from GitHub");
}

#[tokio::test]
async fn test_walk_propagates_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Resource not accessible"})),
        )
        .mount(&server)
        .await;

    let client = test_client();
    let paginator = LinkHeaderPaginator::default();
    let walker = PageWalker::new(&client, &paginator);

    let err = walker
        .walk(&format!("{}/forbidden", server.uri()), |_| true)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "GitHub API error: 403 - Resource not accessible"
    );
}
