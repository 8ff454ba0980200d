//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use ponsiv_core::UserId;

/// Session-stored user identity.
///
/// The identity resolved from the external identity service at sign-in,
/// kept in the session so request handling never blocks on the identity
/// service for an already-authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Identity-service user id.
    pub id: UserId,
    /// User's email address.
    pub email: String,
    /// Display name, if the identity provider supplied one.
    pub name: Option<String>,
    /// Avatar URL, if the identity provider supplied one.
    pub avatar_url: Option<String>,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the identity-service session token.
    pub const IDENTITY_TOKEN: &str = "identity_token";

    /// Key for OAuth state (CSRF protection).
    pub const OAUTH_STATE: &str = "oauth_state";
}
