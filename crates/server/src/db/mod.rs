//! Database operations for the Ponsiv `PostgreSQL` store.
//!
//! # Tables
//!
//! - `brands`, `categories`, `products` - catalog (read-only from the API;
//!   seeded via the CLI or an external catalog process)
//! - `user_interactions` - append-only engagement log
//! - `user_wardrobes` - owned items, catalog-linked or custom
//! - `outfits`, `outfit_items`, `outfit_likes` - outfit collections
//! - `sessions` - tower-sessions storage
//!
//! All access goes through parameterized statements bound with `$n`
//! placeholders; no SQL is ever built from interpolated strings.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p ponsiv-cli -- migrate
//! ```

pub mod feed;
pub mod interactions;
pub mod outfits;
pub mod wardrobe;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use feed::FeedRepository;
pub use interactions::InteractionRepository;
pub use outfits::{NewOutfit, OutfitRepository};
pub use wardrobe::{NewWardrobeItem, WardrobeRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., foreign key or unique index).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
