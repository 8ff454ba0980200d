//! Integration tests for the discovery feed.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p ponsiv-server)
//! - A seeded catalog with at least 25 active products
//!
//! Run with: cargo test -p ponsiv-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use ponsiv_integration_tests::{base_url, client};

#[tokio::test]
#[ignore = "Requires running server and seeded catalog"]
async fn feed_first_page_reports_more() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/feed?page=1&limit=10"))
        .send()
        .await
        .expect("Failed to fetch feed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse feed response");

    let products = body["products"].as_array().expect("products is an array");
    assert_eq!(products.len(), 10);
    assert_eq!(body["hasMore"], Value::Bool(true));
    assert_eq!(body["nextPage"], Value::from(2));

    // Every product joins an active brand
    for product in products {
        assert!(product["id"].is_number());
        assert!(product["brand"]["name"].is_string());
    }
}

#[tokio::test]
#[ignore = "Requires running server and a catalog of exactly 25 active products"]
async fn feed_last_page_has_no_next() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/feed?page=3&limit=10"))
        .send()
        .await
        .expect("Failed to fetch feed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse feed response");

    assert_eq!(body["products"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["hasMore"], Value::Bool(false));
    assert_eq!(body["nextPage"], Value::Null);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn feed_requires_no_authentication() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/feed"))
        .send()
        .await
        .expect("Failed to fetch feed");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn feed_clamps_out_of_range_parameters() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/feed?page=-1&limit=9999"))
        .send()
        .await
        .expect("Failed to fetch feed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse feed response");
    let products = body["products"].as_array().expect("products is an array");
    assert!(products.len() <= 50);
}
