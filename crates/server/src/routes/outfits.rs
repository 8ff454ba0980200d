//! Outfit route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ponsiv_core::{OutfitId, WardrobeItemId};

use crate::db::{NewOutfit, OutfitRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::Outfit;
use crate::state::AppState;

/// Query parameters for `GET /api/outfits`.
#[derive(Debug, Deserialize)]
pub struct ListOutfitsQuery {
    pub public: Option<bool>,
}

/// Request body for `POST /api/outfits`.
#[derive(Debug, Deserialize)]
pub struct CreateOutfitRequest {
    pub name: String,
    pub description: Option<String>,
    pub wardrobe_item_ids: Vec<WardrobeItemId>,
    pub is_public: Option<bool>,
}

/// Response body for `POST /api/outfits`.
#[derive(Debug, Serialize)]
pub struct CreateOutfitResponse {
    pub success: bool,
    pub outfit_id: OutfitId,
}

/// Response body for `POST /api/outfits/{id}/like`.
#[derive(Debug, Serialize)]
pub struct ToggleLikeResponse {
    pub success: bool,
    /// Whether the caller likes the outfit after this call.
    pub liked: bool,
}

/// List outfits.
///
/// With `?public=true` returns every public outfit regardless of owner and
/// never requires authentication. Without it, returns the caller's own
/// outfits and fails with 401 when no session is present.
///
/// A store failure on this listing degrades to an empty array rather than a
/// hard error; the client renders an empty feed instead of breaking.
#[instrument(skip(state, auth))]
pub async fn list(
    OptionalAuth(auth): OptionalAuth,
    State(state): State<AppState>,
    Query(query): Query<ListOutfitsQuery>,
) -> Result<Json<Vec<Outfit>>> {
    let repo = OutfitRepository::new(state.pool());

    let result = if query.public.unwrap_or(false) {
        repo.list_public().await
    } else {
        let Some(user) = auth else {
            return Err(AppError::Unauthorized("authentication required".to_owned()));
        };
        repo.list_for_user(&user.id).await
    };

    let outfits = result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "outfit listing failed, returning empty list");
        Vec::new()
    });

    Ok(Json(outfits))
}

/// Create an outfit for the authenticated caller.
///
/// The outfit row and its membership rows commit in a single transaction;
/// referencing a wardrobe item the caller does not own rejects the whole
/// request.
#[instrument(skip(state, body), fields(item_count = body.wardrobe_item_ids.len()))]
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateOutfitRequest>,
) -> Result<Json<CreateOutfitResponse>> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }

    let outfit = NewOutfit {
        name: body.name,
        description: body.description,
        is_public: body.is_public.unwrap_or(false),
        wardrobe_item_ids: body.wardrobe_item_ids,
    };

    let outfit_id = OutfitRepository::new(state.pool())
        .create(&user.id, &outfit)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Database(other),
        })?;

    Ok(Json(CreateOutfitResponse {
        success: true,
        outfit_id,
    }))
}

/// Toggle the authenticated caller's like on an outfit.
#[instrument(skip(state))]
pub async fn toggle_like(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(outfit_id): Path<OutfitId>,
) -> Result<Json<ToggleLikeResponse>> {
    let liked = OutfitRepository::new(state.pool())
        .toggle_like(outfit_id, &user.id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("outfit {outfit_id}")),
            other => AppError::Database(other),
        })?;

    Ok(Json(ToggleLikeResponse {
        success: true,
        liked,
    }))
}
