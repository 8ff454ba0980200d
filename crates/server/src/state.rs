//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::PonsivConfig;
use crate::services::identity::IdentityClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PonsivConfig,
    pool: PgPool,
    identity: IdentityClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: PonsivConfig, pool: PgPool) -> Self {
        let identity = IdentityClient::new(&config.identity);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identity,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &PonsivConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity service client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }
}
