//! HTTP route handlers for the Ponsiv API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (DB connectivity)
//!
//! # Feed
//! GET  /api/feed?page=&limit=           - Randomized product feed page
//!
//! # Interactions
//! POST /api/interactions                - Record an engagement event (auth)
//!
//! # Wardrobe
//! GET  /api/wardrobe                    - List own wardrobe (auth)
//! POST /api/wardrobe                    - Add wardrobe item (auth)
//!
//! # Outfits
//! GET  /api/outfits?public=true|omitted - Public outfits / own outfits
//! POST /api/outfits                     - Create outfit (auth)
//! POST /api/outfits/{id}/like           - Toggle like (auth)
//!
//! # Session boundary
//! GET  /api/oauth/google/redirect_url   - Provider login URL
//! POST /api/sessions                    - Exchange authorization code
//! GET  /api/users/me                    - Current identity (auth)
//! GET  /api/logout                      - Invalidate session
//! ```

pub mod auth;
pub mod feed;
pub mod interactions;
pub mod outfits;
pub mod wardrobe;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Standard `{"success": true}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    /// The affirmative acknowledgement.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Create the session-boundary routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/oauth/google/redirect_url", get(auth::redirect_url))
        .route("/sessions", post(auth::create_session))
        .route("/users/me", get(auth::me))
        .route("/logout", get(auth::logout))
}

/// Create the outfit routes router.
pub fn outfit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(outfits::list).post(outfits::create))
        .route("/{id}/like", post(outfits::toggle_like))
}

/// Create the wardrobe routes router.
pub fn wardrobe_routes() -> Router<AppState> {
    Router::new().route("/", get(wardrobe::list).post(wardrobe::add))
}

/// Create all `/api` routes.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .route("/feed", get(feed::feed))
        .route("/interactions", post(interactions::record))
        .nest("/wardrobe", wardrobe_routes())
        .nest("/outfits", outfit_routes())
        .merge(auth_routes());

    Router::new().nest("/api", api)
}
