//! Interaction route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use ponsiv_core::{InteractionKind, ProductId};

use crate::db::{InteractionRepository, NewWardrobeItem, WardrobeRepository};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::routes::SuccessResponse;
use crate::state::AppState;

/// Request body for `POST /api/interactions`.
#[derive(Debug, Deserialize)]
pub struct CreateInteractionRequest {
    pub product_id: ProductId,
    pub interaction_type: InteractionKind,
    pub interaction_data: Option<serde_json::Value>,
}

/// Record one engagement event for the authenticated caller.
///
/// Recording `have` additionally adds the product to the caller's wardrobe.
/// The two writes are not a transaction: a failed wardrobe insert leaves the
/// interaction recorded, is logged, and does not fail the request.
#[instrument(skip(state, body), fields(kind = %body.interaction_type))]
pub async fn record(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateInteractionRequest>,
) -> Result<Json<SuccessResponse>> {
    InteractionRepository::new(state.pool())
        .record(
            &user.id,
            body.product_id,
            body.interaction_type,
            body.interaction_data.as_ref(),
        )
        .await?;

    if body.interaction_type == InteractionKind::Have {
        let item = NewWardrobeItem::from_product(body.product_id);
        if let Err(e) = WardrobeRepository::new(state.pool()).add(&user.id, &item).await {
            tracing::warn!(
                product_id = %body.product_id,
                error = %e,
                "recorded 'have' interaction but wardrobe insert failed"
            );
        }
    }

    Ok(Json(SuccessResponse::ok()))
}
