//! Catalog product types as served by the feed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use ponsiv_core::{BrandId, CategoryId, ProductId};

/// Row produced by the feed query: one product joined to its active brand
/// and (optionally) its category.
#[derive(Debug, Clone, FromRow)]
pub struct FeedProductRow {
    pub id: ProductId,
    pub brand_id: Option<BrandId>,
    pub category_id: Option<CategoryId>,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub image_url: String,
    /// JSON-serialized list of additional image URLs.
    pub gallery_urls: Option<String>,
    /// JSON-serialized list of available sizes.
    pub sizes: Option<String>,
    /// JSON-serialized list of available colors.
    pub colors: Option<String>,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub brand_name: Option<String>,
    pub brand_logo_url: Option<String>,
    pub category_name: Option<String>,
    pub category_icon_name: Option<String>,
}

/// Brand fields embedded in a feed product.
#[derive(Debug, Clone, Serialize)]
pub struct BrandSummary {
    pub id: BrandId,
    pub name: String,
    pub logo_url: Option<String>,
}

/// Category fields embedded in a feed product.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub icon_name: Option<String>,
}

/// A product as returned by `GET /api/feed`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedProduct {
    pub id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    /// Primary image first, then any gallery images.
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategorySummary>,
}

/// Decode a JSON-serialized string list column; malformed payloads read as empty.
fn decode_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

impl From<FeedProductRow> for FeedProduct {
    fn from(row: FeedProductRow) -> Self {
        let mut images = vec![row.image_url];
        images.extend(decode_list(row.gallery_urls.as_deref()));

        let brand = match (row.brand_id, row.brand_name) {
            (Some(id), Some(name)) => Some(BrandSummary {
                id,
                name,
                logo_url: row.brand_logo_url,
            }),
            _ => None,
        };

        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(CategorySummary {
                id,
                name,
                icon_name: row.category_icon_name,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            currency: row.currency,
            images,
            sizes: decode_list(row.sizes.as_deref()),
            colors: decode_list(row.colors.as_deref()),
            stock: row.stock,
            brand,
            category,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row() -> FeedProductRow {
        FeedProductRow {
            id: ProductId::new(1),
            brand_id: Some(BrandId::new(2)),
            category_id: None,
            title: "Wool Coat".to_owned(),
            description: None,
            price: Decimal::new(12900, 2),
            currency: "EUR".to_owned(),
            image_url: "https://cdn.ponsiv.app/p/1.jpg".to_owned(),
            gallery_urls: Some(r#"["https://cdn.ponsiv.app/p/1b.jpg"]"#.to_owned()),
            sizes: Some(r#"["S","M","L"]"#.to_owned()),
            colors: Some("broken".to_owned()),
            stock: 4,
            created_at: Utc::now(),
            brand_name: Some("Loreak".to_owned()),
            brand_logo_url: None,
            category_name: None,
            category_icon_name: None,
        }
    }

    #[test]
    fn shapes_row_into_nested_product() {
        let product = FeedProduct::from(row());

        assert_eq!(product.images.len(), 2);
        assert_eq!(product.sizes, vec!["S", "M", "L"]);
        // Malformed list column degrades to empty, never an error
        assert!(product.colors.is_empty());
        assert_eq!(product.brand.as_ref().unwrap().name, "Loreak");
        assert!(product.category.is_none());
    }

    #[test]
    fn brand_requires_both_id_and_name() {
        let mut r = row();
        r.brand_name = None;
        assert!(FeedProduct::from(r).brand.is_none());
    }
}
