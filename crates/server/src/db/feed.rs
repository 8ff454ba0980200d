//! Feed repository: randomized catalog pagination.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::FeedProductRow;

/// Repository for the discovery feed.
pub struct FeedRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedRepository<'a> {
    /// Create a new feed repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one randomized page of active products joined to active brands.
    ///
    /// Fetches `limit + 1` rows so the caller learns whether another page
    /// exists without a second query; at most `limit` rows are returned and
    /// the boolean reports whether more were available.
    ///
    /// The ordering is unseeded `RANDOM()`: repeated pagination may re-show
    /// or skip items. No ordering contract is promised across pages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<FeedProductRow>, bool), RepositoryError> {
        let mut rows = sqlx::query_as::<_, FeedProductRow>(
            r"
            SELECT
                p.id, p.brand_id, p.category_id, p.title, p.description,
                p.price, p.currency, p.image_url, p.gallery_urls,
                p.sizes, p.colors, p.stock, p.created_at,
                b.name AS brand_name, b.logo_url AS brand_logo_url,
                c.name AS category_name, c.icon_name AS category_icon_name
            FROM products p
            LEFT JOIN brands b ON p.brand_id = b.id
            LEFT JOIN categories c ON p.category_id = c.id
            WHERE p.is_active AND b.is_active
            ORDER BY RANDOM()
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit + 1)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let has_more = rows.len() as i64 > limit;
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok((rows, has_more))
    }
}
