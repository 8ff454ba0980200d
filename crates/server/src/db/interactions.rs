//! Interaction repository: append-only engagement log.

use sqlx::PgPool;

use ponsiv_core::{InteractionKind, ProductId, UserId};

use super::RepositoryError;

/// Repository for user interaction records.
///
/// Interactions are append-only: nothing in this module updates or deletes
/// a recorded row.
pub struct InteractionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InteractionRepository<'a> {
    /// Create a new interaction repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one interaction.
    ///
    /// The payload, when present, is stored verbatim in its serialized form;
    /// the server never interprets it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn record(
        &self,
        user_id: &UserId,
        product_id: ProductId,
        kind: InteractionKind,
        payload: Option<&serde_json::Value>,
    ) -> Result<(), RepositoryError> {
        let payload = payload.map(serde_json::Value::to_string);

        sqlx::query(
            r"
            INSERT INTO user_interactions (user_id, product_id, interaction_type, interaction_data)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(kind.to_string())
        .bind(payload)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
