//! Shared helpers for Ponsiv integration tests.
//!
//! These tests run against a live server:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p ponsiv-server)
//! - A seeded catalog (cargo run -p ponsiv-cli -- seed --file catalog.yaml)
//!
//! All tests are `#[ignore]`d by default; run them with
//! `cargo test -p ponsiv-integration-tests -- --ignored`.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use reqwest::Client;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("PONSIV_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, so session cookies persist
/// across requests within a test.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
