//! Feed route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::FeedRepository;
use crate::error::Result;
use crate::models::FeedProduct;
use crate::state::AppState;

/// Default page size when the client omits `limit`.
const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on page size.
const MAX_LIMIT: i64 = 50;

/// Query parameters for the feed.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Response body for `GET /api/feed`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub products: Vec<FeedProduct>,
    pub has_more: bool,
    pub next_page: Option<i64>,
}

/// Clamp raw query values to a valid (page, limit) pair.
///
/// Pages start at 1; limits stay within `1..=MAX_LIMIT`. Out-of-range values
/// are clamped rather than rejected, matching the feed's no-contract
/// pagination semantics.
fn sanitize(query: &FeedQuery) -> (i64, i64) {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    (page, limit)
}

/// Serve one randomized page of the discovery feed.
///
/// No authentication required. `hasMore` is derived from a single
/// look-ahead row; `nextPage` is null on the last page.
#[instrument(skip(state))]
pub async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    let (page, limit) = sanitize(&query);
    let offset = (page - 1) * limit;

    let (rows, has_more) = FeedRepository::new(state.pool()).page(offset, limit).await?;

    Ok(Json(FeedResponse {
        products: rows.into_iter().map(FeedProduct::from).collect(),
        has_more,
        next_page: has_more.then_some(page + 1),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_defaults() {
        let (page, limit) = sanitize(&FeedQuery {
            page: None,
            limit: None,
        });
        assert_eq!((page, limit), (1, DEFAULT_LIMIT));
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let (page, limit) = sanitize(&FeedQuery {
            page: Some(-3),
            limit: Some(500),
        });
        assert_eq!((page, limit), (1, MAX_LIMIT));

        let (_, limit) = sanitize(&FeedQuery {
            page: Some(2),
            limit: Some(0),
        });
        assert_eq!(limit, 1);
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let (page, limit) = sanitize(&FeedQuery {
            page: Some(3),
            limit: Some(10),
        });
        assert_eq!((page - 1) * limit, 20);
    }
}
