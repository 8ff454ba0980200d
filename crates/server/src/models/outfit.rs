//! Outfit types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use ponsiv_core::{OutfitId, UserId};

/// An outfit with its live like count, as returned by `GET /api/outfits`.
///
/// The like count is derived from `outfit_likes` at query time; it is never
/// stored on the outfit row itself.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Outfit {
    pub id: OutfitId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
}
