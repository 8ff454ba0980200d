//! Wardrobe item types.
//!
//! A wardrobe item is either a reference to a catalog product or a fully
//! custom record; exactly one of the two is populated. The tag payload is
//! stored serialized and decoded leniently on the way out.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use ponsiv_core::{ProductId, UserId, WardrobeItemId, decode_tags};

/// Row produced by the wardrobe listing query: one item left-joined to its
/// linked product and that product's brand.
#[derive(Debug, Clone, FromRow)]
pub struct WardrobeItemRow {
    pub id: WardrobeItemId,
    pub user_id: UserId,
    pub product_id: Option<ProductId>,
    pub custom_item_name: Option<String>,
    pub custom_item_image_url: Option<String>,
    pub custom_item_category: Option<String>,
    pub custom_item_color: Option<String>,
    pub custom_item_brand: Option<String>,
    /// JSON-serialized tag list.
    pub tags: Option<String>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub product_title: Option<String>,
    pub product_image_url: Option<String>,
    pub product_price: Option<Decimal>,
    pub product_currency: Option<String>,
    pub brand_name: Option<String>,
}

/// Linked-product summary embedded in a wardrobe item.
#[derive(Debug, Clone, Serialize)]
pub struct WardrobeProduct {
    pub id: ProductId,
    pub title: String,
    pub image_url: Option<String>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub brand_name: Option<String>,
}

/// A wardrobe item as returned by `GET /api/wardrobe`.
#[derive(Debug, Clone, Serialize)]
pub struct WardrobeItem {
    pub id: WardrobeItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_item_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_item_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_item_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_item_brand: Option<String>,
    pub tags: Vec<String>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<WardrobeProduct>,
}

impl From<WardrobeItemRow> for WardrobeItem {
    fn from(row: WardrobeItemRow) -> Self {
        let product = match (row.product_id, row.product_title) {
            (Some(id), Some(title)) => Some(WardrobeProduct {
                id,
                title,
                image_url: row.product_image_url,
                price: row.product_price,
                currency: row.product_currency,
                brand_name: row.brand_name,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            product_id: row.product_id,
            custom_item_name: row.custom_item_name,
            custom_item_image_url: row.custom_item_image_url,
            custom_item_category: row.custom_item_category,
            custom_item_color: row.custom_item_color,
            custom_item_brand: row.custom_item_brand,
            tags: decode_tags(row.tags.as_deref()),
            is_custom: row.is_custom,
            created_at: row.created_at,
            product,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row() -> WardrobeItemRow {
        WardrobeItemRow {
            id: WardrobeItemId::new(7),
            user_id: UserId::from("usr_1"),
            product_id: Some(ProductId::new(3)),
            custom_item_name: None,
            custom_item_image_url: None,
            custom_item_category: None,
            custom_item_color: None,
            custom_item_brand: None,
            tags: Some(r#"["vintage","summer"]"#.to_owned()),
            is_custom: false,
            created_at: Utc::now(),
            product_title: Some("Linen Shirt".to_owned()),
            product_image_url: Some("https://cdn.ponsiv.app/p/3.jpg".to_owned()),
            product_price: Some(Decimal::new(4500, 2)),
            product_currency: Some("EUR".to_owned()),
            brand_name: Some("Loreak".to_owned()),
        }
    }

    #[test]
    fn catalog_linked_item_embeds_product_summary() {
        let item = WardrobeItem::from(row());

        let product = item.product.unwrap();
        assert_eq!(product.title, "Linen Shirt");
        assert_eq!(product.brand_name.as_deref(), Some("Loreak"));
        assert_eq!(item.tags, vec!["vintage", "summer"]);
    }

    #[test]
    fn malformed_tags_decode_to_empty_list() {
        let mut r = row();
        r.tags = Some("{{not json".to_owned());
        assert!(WardrobeItem::from(r).tags.is_empty());
    }

    #[test]
    fn custom_item_has_no_product_summary() {
        let mut r = row();
        r.product_id = None;
        r.product_title = None;
        r.custom_item_name = Some("Thrifted jacket".to_owned());
        r.is_custom = true;

        let item = WardrobeItem::from(r);
        assert!(item.product.is_none());
        assert!(item.is_custom);
    }
}
