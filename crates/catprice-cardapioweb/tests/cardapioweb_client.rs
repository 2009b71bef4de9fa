//! Integration tests for `CardapioWebClient`.
//!
//! Uses `wiremock` to stand up a local partner API for each test so no real
//! network traffic is made.

use catprice_cardapioweb::{CardapioWebClient, ClientError};
use catprice_core::{DistanceBand, OptionPolicy};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG_PATH: &str = "/api/partner/v1/catalog";

/// Builds a client suitable for tests: short timeout, no retries.
fn test_client(base_url: &str) -> CardapioWebClient {
    CardapioWebClient::new(base_url, "test-key", 5, "catprice-test/0.1", 0, 0)
        .expect("failed to build test CardapioWebClient")
}

fn test_client_with_retries(base_url: &str, max_retries: u32) -> CardapioWebClient {
    CardapioWebClient::new(base_url, "test-key", 5, "catprice-test/0.1", max_retries, 0)
        .expect("failed to build test CardapioWebClient")
}

fn sorvetes_catalog() -> serde_json::Value {
    json!({
        "categories": [{
            "id": 1,
            "name": "Sorvetes",
            "items": [
                {"id": 10, "name": "Sacolé", "price": 3.00, "status": "ACTIVE"},
                {"id": 11, "name": "Brinde", "price": 0},
                {
                    "id": 12,
                    "name": "Picolé",
                    "price": "6,00",
                    "option_groups": [{"id": 1, "options": [
                        {"id": 120, "name": "Uva", "price": null},
                        {"id": 121, "name": "Coco", "price": 7}
                    ]}]
                }
            ]
        }]
    })
}

#[tokio::test]
async fn fetch_catalog_sends_api_key_and_accept_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .and(header("x-api-key", "test-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sorvetes_catalog()))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = test_client(&server.uri()).fetch_catalog().await;

    assert!(catalog.is_ok(), "expected Ok, got: {catalog:?}");
    let catalog = catalog.unwrap();
    assert_eq!(catalog.categories().len(), 1);
    assert_eq!(catalog.categories()[0].items().len(), 3);
}

#[tokio::test]
async fn fetch_rows_flattens_and_prices() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sorvetes_catalog()))
        .mount(&server)
        .await;

    let rows = test_client(&server.uri())
        .fetch_rows(DistanceBand::From2To4, OptionPolicy::AlwaysExplode)
        .await
        .unwrap();

    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Sacolé", "Picolé — Uva", "Picolé — Coco"]);
    assert_eq!(rows[0].price_keeta, dec!(5.90));
    assert_eq!(rows[1].price, dec!(6));
    assert_eq!(rows[2].price, dec!(7));
    assert_eq!(rows[1].external_code, "12:120");
}

#[tokio::test]
async fn empty_document_yields_empty_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"categories": null})))
        .mount(&server)
        .await;

    let catalog = test_client(&server.uri()).fetch_catalog().await.unwrap();
    assert!(catalog.categories().is_empty());
}

#[tokio::test]
async fn unauthorized_is_unexpected_status_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client_with_retries(&server.uri(), 3)
        .fetch_catalog()
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 401, ref body } if body == "invalid api key"),
        "expected UnexpectedStatus(401), got: {err:?}"
    );
    assert_eq!(err.to_string(), "CardapioWeb API error 401: invalid api key");
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sorvetes_catalog()))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = test_client_with_retries(&server.uri(), 2).fetch_catalog().await;
    assert!(catalog.is_ok(), "expected Ok after retries, got: {catalog:?}");
}

#[tokio::test]
async fn server_error_surfaces_after_retries_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let err = test_client_with_retries(&server.uri(), 1)
        .fetch_catalog()
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
}

#[tokio::test]
async fn rate_limited_after_retries_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let err = test_client_with_retries(&server.uri(), 1)
        .fetch_catalog()
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            ClientError::RateLimited {
                retry_after_secs: 0
            }
        ),
        "expected RateLimited, got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client_with_retries(&server.uri(), 2)
        .fetch_catalog()
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn connection_refused_is_http_error() {
    let err = test_client("http://127.0.0.1:1")
        .fetch_catalog()
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::Http(_)),
        "expected Http, got: {err:?}"
    );
}
