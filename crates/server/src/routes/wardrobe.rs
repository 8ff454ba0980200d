//! Wardrobe route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use ponsiv_core::ProductId;

use crate::db::{NewWardrobeItem, WardrobeRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::WardrobeItem;
use crate::routes::SuccessResponse;
use crate::state::AppState;

/// Request body for `POST /api/wardrobe`.
#[derive(Debug, Deserialize)]
pub struct AddToWardrobeRequest {
    pub product_id: Option<ProductId>,
    pub custom_item_name: Option<String>,
    pub custom_item_image_url: Option<String>,
    pub custom_item_category: Option<String>,
    pub custom_item_color: Option<String>,
    pub custom_item_brand: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl AddToWardrobeRequest {
    fn has_custom_fields(&self) -> bool {
        self.custom_item_name.is_some()
            || self.custom_item_image_url.is_some()
            || self.custom_item_category.is_some()
            || self.custom_item_color.is_some()
            || self.custom_item_brand.is_some()
    }

    /// Enforce the exactly-one rule: catalog-linked or custom, never neither,
    /// never both.
    fn validate(&self) -> Result<()> {
        match (self.product_id.is_some(), self.has_custom_fields()) {
            (false, false) => Err(AppError::BadRequest(
                "either product_id or custom item fields are required".to_owned(),
            )),
            (true, true) => Err(AppError::BadRequest(
                "product_id and custom item fields are mutually exclusive".to_owned(),
            )),
            _ => Ok(()),
        }
    }
}

impl From<AddToWardrobeRequest> for NewWardrobeItem {
    fn from(body: AddToWardrobeRequest) -> Self {
        Self {
            product_id: body.product_id,
            custom_item_name: body.custom_item_name,
            custom_item_image_url: body.custom_item_image_url,
            custom_item_category: body.custom_item_category,
            custom_item_color: body.custom_item_color,
            custom_item_brand: body.custom_item_brand,
            tags: body.tags.unwrap_or_default(),
        }
    }
}

/// List the authenticated caller's wardrobe, newest first.
#[instrument(skip(state))]
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<WardrobeItem>>> {
    let rows = WardrobeRepository::new(state.pool())
        .list_for_user(&user.id)
        .await?;

    Ok(Json(rows.into_iter().map(WardrobeItem::from).collect()))
}

/// Add an item to the authenticated caller's wardrobe.
#[instrument(skip(state, body))]
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<AddToWardrobeRequest>,
) -> Result<Json<SuccessResponse>> {
    body.validate()?;

    WardrobeRepository::new(state.pool())
        .add(&user.id, &NewWardrobeItem::from(body))
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Database(other),
        })?;

    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_request() -> AddToWardrobeRequest {
        AddToWardrobeRequest {
            product_id: None,
            custom_item_name: None,
            custom_item_image_url: None,
            custom_item_category: None,
            custom_item_color: None,
            custom_item_brand: None,
            tags: None,
        }
    }

    #[test]
    fn rejects_neither_product_nor_custom_fields() {
        assert!(empty_request().validate().is_err());
    }

    #[test]
    fn rejects_both_product_and_custom_fields() {
        let mut body = empty_request();
        body.product_id = Some(ProductId::new(1));
        body.custom_item_name = Some("Thrifted jacket".to_owned());
        assert!(body.validate().is_err());
    }

    #[test]
    fn accepts_catalog_link_alone() {
        let mut body = empty_request();
        body.product_id = Some(ProductId::new(1));
        assert!(body.validate().is_ok());
    }

    #[test]
    fn accepts_custom_fields_alone() {
        let mut body = empty_request();
        body.custom_item_color = Some("ochre".to_owned());
        assert!(body.validate().is_ok());
    }

    #[test]
    fn tags_do_not_count_as_custom_fields() {
        // A catalog-linked item may still carry tags
        let mut body = empty_request();
        body.product_id = Some(ProductId::new(1));
        body.tags = Some(vec!["winter".to_owned()]);
        assert!(body.validate().is_ok());
    }
}
