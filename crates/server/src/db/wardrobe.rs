//! Wardrobe repository.

use sqlx::PgPool;

use ponsiv_core::{ProductId, UserId, encode_tags};

use super::RepositoryError;
use crate::models::WardrobeItemRow;

/// Fields for a new wardrobe item.
///
/// Either `product_id` is set (catalog-linked) or the custom fields are
/// (custom item); the route layer rejects bodies that populate neither or
/// both before this struct is built.
#[derive(Debug, Clone, Default)]
pub struct NewWardrobeItem {
    pub product_id: Option<ProductId>,
    pub custom_item_name: Option<String>,
    pub custom_item_image_url: Option<String>,
    pub custom_item_category: Option<String>,
    pub custom_item_color: Option<String>,
    pub custom_item_brand: Option<String>,
    pub tags: Vec<String>,
}

impl NewWardrobeItem {
    /// A catalog-linked item with no custom fields or tags.
    #[must_use]
    pub fn from_product(product_id: ProductId) -> Self {
        Self {
            product_id: Some(product_id),
            ..Self::default()
        }
    }
}

/// Repository for wardrobe database operations.
pub struct WardrobeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WardrobeRepository<'a> {
    /// Create a new wardrobe repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all wardrobe items owned by `user_id`, newest first, each
    /// enriched with its linked product's summary fields when present.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<WardrobeItemRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, WardrobeItemRow>(
            r"
            SELECT
                w.id, w.user_id, w.product_id,
                w.custom_item_name, w.custom_item_image_url, w.custom_item_category,
                w.custom_item_color, w.custom_item_brand,
                w.tags, w.is_custom, w.created_at,
                p.title AS product_title, p.image_url AS product_image_url,
                p.price AS product_price, p.currency AS product_currency,
                b.name AS brand_name
            FROM user_wardrobes w
            LEFT JOIN products p ON w.product_id = p.id
            LEFT JOIN brands b ON p.brand_id = b.id
            WHERE w.user_id = $1
            ORDER BY w.created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a new wardrobe item owned by `user_id`.
    ///
    /// `is_custom` is derived: an item without a product link is custom.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product reference does not
    /// exist; `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        user_id: &UserId,
        item: &NewWardrobeItem,
    ) -> Result<(), RepositoryError> {
        let tags = encode_tags(&item.tags);
        let is_custom = item.product_id.is_none();

        sqlx::query(
            r"
            INSERT INTO user_wardrobes (
                user_id, product_id, custom_item_name, custom_item_image_url,
                custom_item_category, custom_item_color, custom_item_brand,
                tags, is_custom
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(user_id)
        .bind(item.product_id)
        .bind(item.custom_item_name.as_deref())
        .bind(item.custom_item_image_url.as_deref())
        .bind(item.custom_item_category.as_deref())
        .bind(item.custom_item_color.as_deref())
        .bind(item.custom_item_brand.as_deref())
        .bind(tags)
        .bind(is_custom)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("product does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }
}
