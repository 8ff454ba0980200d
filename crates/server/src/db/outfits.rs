//! Outfit repository.

use sqlx::PgPool;

use ponsiv_core::{OutfitId, UserId, WardrobeItemId};

use super::RepositoryError;
use crate::models::Outfit;

/// Fields for a new outfit.
#[derive(Debug, Clone)]
pub struct NewOutfit {
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub wardrobe_item_ids: Vec<WardrobeItemId>,
}

/// Repository for outfit database operations.
pub struct OutfitRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OutfitRepository<'a> {
    /// Create a new outfit repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an outfit and its membership rows in one transaction.
    ///
    /// Every referenced wardrobe item must belong to `user_id`; the ownership
    /// check and all inserts commit together or not at all, so a partial
    /// outfit can never be observed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if any item id is missing from the
    /// caller's wardrobe; `RepositoryError::Database` for other failures.
    pub async fn create(
        &self,
        user_id: &UserId,
        outfit: &NewOutfit,
    ) -> Result<OutfitId, RepositoryError> {
        let item_ids: Vec<i32> = outfit
            .wardrobe_item_ids
            .iter()
            .map(WardrobeItemId::as_i32)
            .collect();

        let mut tx = self.pool.begin().await?;

        // Ownership invariant: an outfit only references the owner's wardrobe
        let (owned,): (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(DISTINCT id)
            FROM user_wardrobes
            WHERE id = ANY($1) AND user_id = $2
            ",
        )
        .bind(&item_ids)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let distinct_requested = {
            let mut ids = item_ids.clone();
            ids.sort_unstable();
            ids.dedup();
            ids.len() as i64
        };
        if owned != distinct_requested {
            return Err(RepositoryError::Conflict(
                "wardrobe item not owned by caller".to_owned(),
            ));
        }

        let (outfit_id,): (OutfitId,) = sqlx::query_as(
            r"
            INSERT INTO outfits (user_id, name, description, is_public)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(&outfit.name)
        .bind(outfit.description.as_deref())
        .bind(outfit.is_public)
        .fetch_one(&mut *tx)
        .await?;

        for item_id in &outfit.wardrobe_item_ids {
            sqlx::query(
                r"
                INSERT INTO outfit_items (outfit_id, wardrobe_item_id)
                VALUES ($1, $2)
                ",
            )
            .bind(outfit_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(outfit_id)
    }

    /// List the caller's own outfits, newest first, with live like counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Outfit>, RepositoryError> {
        let outfits = sqlx::query_as::<_, Outfit>(
            r"
            SELECT o.id, o.user_id, o.name, o.description, o.is_public,
                   COUNT(ol.id) AS likes_count, o.created_at
            FROM outfits o
            LEFT JOIN outfit_likes ol ON o.id = ol.outfit_id
            WHERE o.user_id = $1
            GROUP BY o.id
            ORDER BY o.created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(outfits)
    }

    /// List all public outfits regardless of owner, newest first, with live
    /// like counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<Outfit>, RepositoryError> {
        let outfits = sqlx::query_as::<_, Outfit>(
            r"
            SELECT o.id, o.user_id, o.name, o.description, o.is_public,
                   COUNT(ol.id) AS likes_count, o.created_at
            FROM outfits o
            LEFT JOIN outfit_likes ol ON o.id = ol.outfit_id
            WHERE o.is_public
            GROUP BY o.id
            ORDER BY o.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(outfits)
    }

    /// Toggle the caller's like on an outfit.
    ///
    /// Only public outfits and the caller's own outfits can be liked.
    /// Returns `true` if the outfit is liked after the call, `false` if the
    /// like was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the outfit does not exist or is
    /// private to another user; `RepositoryError::Database` otherwise.
    pub async fn toggle_like(
        &self,
        outfit_id: OutfitId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let row: Option<(bool, UserId)> = sqlx::query_as(
            r"
            SELECT is_public, user_id FROM outfits WHERE id = $1
            ",
        )
        .bind(outfit_id)
        .fetch_optional(self.pool)
        .await?;

        let Some((is_public, owner)) = row else {
            return Err(RepositoryError::NotFound);
        };
        // A private outfit is invisible to everyone but its owner
        if !is_public && owner != *user_id {
            return Err(RepositoryError::NotFound);
        }

        let deleted = sqlx::query(
            r"
            DELETE FROM outfit_likes WHERE outfit_id = $1 AND user_id = $2
            ",
        )
        .bind(outfit_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if deleted.rows_affected() > 0 {
            return Ok(false);
        }

        sqlx::query(
            r"
            INSERT INTO outfit_likes (outfit_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (outfit_id, user_id) DO NOTHING
            ",
        )
        .bind(outfit_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(true)
    }
}
