//! External identity service client.
//!
//! Ponsiv delegates authentication entirely to an external identity service:
//! the client redirects to the provider, comes back with an authorization
//! code, and this client exchanges that code for an opaque session token and
//! resolves the token to a user identity.
//!
//! # Flow
//!
//! 1. Generate the provider login URL with `redirect_url()`
//! 2. Client completes the provider flow and posts the authorization code
//! 3. Exchange the code for a session token with `exchange_code()`
//! 4. Resolve the token to an identity with `get_user()`
//! 5. Invalidate the token at logout with `delete_session()`
//!
//! Identity lookups are cached for five minutes keyed by session token, so
//! steady-state request handling does not round-trip to the identity service.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::IdentityConfig;

/// TTL for cached token-to-identity lookups.
const USER_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Maximum number of cached identities.
const USER_CACHE_CAPACITY: u64 = 10_000;

/// API key header expected by the identity service.
const API_KEY_HEADER: &str = "x-api-key";

/// Errors that can occur when talking to the identity service.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The authorization code was rejected.
    #[error("authorization code rejected")]
    InvalidCode,

    /// The session token is expired or unknown.
    #[error("session token rejected")]
    InvalidToken,

    /// The identity service returned an unexpected response.
    #[error("identity service error: {0}")]
    Api(String),
}

/// Identity resolved from a session token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    /// The identity service's user id (opaque to Ponsiv).
    pub id: String,
    /// The user's email address.
    pub email: String,
    /// Display name, if the provider supplied one.
    pub name: Option<String>,
    /// Avatar URL, if the provider supplied one.
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RedirectUrlResponse {
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct SessionTokenResponse {
    session_token: String,
}

/// Client for the external identity service.
///
/// Cheaply cloneable; all clones share one HTTP connection pool and one
/// identity cache.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    user_cache: Cache<String, IdentityUser>,
}

impl IdentityClient {
    /// Create a new identity service client.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        let user_cache = Cache::builder()
            .max_capacity(USER_CACHE_CAPACITY)
            .time_to_live(USER_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(IdentityClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.trim_end_matches('/').to_owned(),
                api_key: config.api_key.expose_secret().to_owned(),
                user_cache,
            }),
        }
    }

    /// Get the provider login URL for the client to redirect to.
    ///
    /// `state` is an opaque CSRF token the caller stores in the session and
    /// verifies when the provider redirects back.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity service is unreachable or responds
    /// with a non-success status.
    pub async fn redirect_url(&self, state: &str) -> Result<String, IdentityError> {
        let url = format!("{}/v1/oauth/google/redirect_url", self.inner.api_url);

        let response = self
            .inner
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.inner.api_key)
            .query(&[("state", state)])
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api(format!(
                "redirect URL request failed: {text}"
            )));
        }

        let body: RedirectUrlResponse = response.json().await?;
        Ok(body.redirect_url)
    }

    /// Exchange an authorization code for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCode`] when the service rejects the
    /// code; other failures surface as HTTP or API errors.
    pub async fn exchange_code(&self, code: &str) -> Result<String, IdentityError> {
        let url = format!("{}/v1/sessions", self.inner.api_url);

        let response = self
            .inner
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.inner.api_key)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            return Err(IdentityError::InvalidCode);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api(format!("code exchange failed: {text}")));
        }

        let body: SessionTokenResponse = response.json().await?;
        Ok(body.session_token)
    }

    /// Resolve a session token to a user identity.
    ///
    /// Results are cached for five minutes per token; a revoked token keeps
    /// resolving until its cache entry expires, which is within the session
    /// model's tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidToken`] when the token is expired or
    /// unknown; other failures surface as HTTP or API errors.
    pub async fn get_user(&self, token: &str) -> Result<IdentityUser, IdentityError> {
        let inner = Arc::clone(&self.inner);
        let token_owned = token.to_owned();

        self.inner
            .user_cache
            .try_get_with(token.to_owned(), async move {
                fetch_user(&inner, &token_owned).await
            })
            .await
            .map_err(|e: Arc<IdentityError>| match e.as_ref() {
                IdentityError::InvalidToken => IdentityError::InvalidToken,
                IdentityError::InvalidCode => IdentityError::InvalidCode,
                other => IdentityError::Api(other.to_string()),
            })
    }

    /// Invalidate a session token at the identity service.
    ///
    /// Also drops the local cache entry so the token stops resolving
    /// immediately on this instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; an already-invalid token is
    /// not an error.
    pub async fn delete_session(&self, token: &str) -> Result<(), IdentityError> {
        self.inner.user_cache.invalidate(token).await;

        let url = format!("{}/v1/sessions/current", self.inner.api_url);

        let response = self
            .inner
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        // 401/404 mean the token was already dead; logout still succeeded
        if !status.is_success() && !status.is_client_error() {
            let text = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api(format!(
                "session deletion failed: {text}"
            )));
        }

        Ok(())
    }
}

async fn fetch_user(
    inner: &IdentityClientInner,
    token: &str,
) -> Result<IdentityUser, IdentityError> {
    let url = format!("{}/v1/users/me", inner.api_url);

    let response = inner.client.get(&url).bearer_auth(token).send().await?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(IdentityError::InvalidToken);
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(IdentityError::Api(format!("user lookup failed: {text}")));
    }

    Ok(response.json().await?)
}
