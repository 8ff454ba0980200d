//! Session-boundary route handlers.
//!
//! Authentication is delegated to the external identity service:
//! - Redirect URL: hand the client the provider login URL
//! - Session creation: exchange the authorization code for a session token,
//!   resolve the identity, store both server-side
//! - Logout: invalidate the identity-service session and drop the local one

use axum::{Json, extract::State};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use ponsiv_core::UserId;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::RequireAuth;
use crate::middleware::auth::set_current_user;
use crate::models::{CurrentUser, session_keys};
use crate::routes::SuccessResponse;
use crate::state::AppState;

/// Request body for `POST /api/sessions`.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub code: String,
    /// CSRF state echoed back from the provider redirect, when the client
    /// carried it through.
    pub state: Option<String>,
}

/// Response body for `GET /api/oauth/google/redirect_url`.
#[derive(Debug, Serialize)]
pub struct RedirectUrlResponse {
    pub redirect_url: String,
}

/// Generate a cryptographically secure random string.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}

/// Get the provider login URL.
///
/// Generates a CSRF state parameter, stores it in the session, and asks the
/// identity service for the login URL carrying that state.
#[instrument(skip(state, session))]
pub async fn redirect_url(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<RedirectUrlResponse>> {
    let oauth_state = generate_random_string(32);

    session
        .insert(session_keys::OAUTH_STATE, &oauth_state)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store OAuth state: {e}")))?;

    let redirect_url = state.identity().redirect_url(&oauth_state).await?;

    Ok(Json(RedirectUrlResponse { redirect_url }))
}

/// Exchange an authorization code for a session.
///
/// Verifies the CSRF state when one was stored, exchanges the code at the
/// identity service, resolves the identity, and stores both the token and
/// the identity in the server-side session.
#[instrument(skip(state, session, body))]
pub async fn create_session(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<SuccessResponse>> {
    if body.code.is_empty() {
        return Err(AppError::BadRequest(
            "No authorization code provided".to_owned(),
        ));
    }

    // Verify state when the login flow stored one (one-time use)
    let stored_state: Option<String> = session
        .remove(session_keys::OAUTH_STATE)
        .await
        .ok()
        .flatten();
    if let (Some(stored), Some(returned)) = (stored_state.as_ref(), body.state.as_ref())
        && stored != returned
    {
        tracing::warn!("OAuth state mismatch on session creation");
        return Err(AppError::BadRequest("invalid state parameter".to_owned()));
    }

    let token = state.identity().exchange_code(&body.code).await?;
    let identity = state.identity().get_user(&token).await?;

    let user = CurrentUser {
        id: UserId::from(identity.id),
        email: identity.email,
        name: identity.name,
        avatar_url: identity.avatar_url,
    };

    session
        .insert(session_keys::IDENTITY_TOKEN, &token)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session token: {e}")))?;
    set_current_user(&session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store user: {e}")))?;

    set_sentry_user(&user.id, Some(&user.email));
    tracing::info!(user_id = %user.id, "session created");

    Ok(Json(SuccessResponse::ok()))
}

/// Return the authenticated caller's identity.
#[instrument]
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}

/// Invalidate the current session.
///
/// Deletes the identity-service session (best effort: a failure there still
/// drops the local session) and flushes the server-side session.
#[instrument(skip(state, session))]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<SuccessResponse>> {
    let token: Option<String> = session
        .get(session_keys::IDENTITY_TOKEN)
        .await
        .ok()
        .flatten();

    if let Some(token) = token
        && let Err(e) = state.identity().delete_session(&token).await
    {
        tracing::warn!(error = %e, "identity session deletion failed during logout");
    }

    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    clear_sentry_user();

    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_string_has_requested_length_and_charset() {
        let s = generate_random_string(32);
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn random_strings_differ() {
        assert_ne!(generate_random_string(32), generate_random_string(32));
    }
}
