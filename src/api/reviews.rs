//! Review ingestion endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::db::{persist_reviews, SqliteReviewStore};
use crate::error::{ApiError, ApiResult};
use crate::models::Review;
use crate::services::collector::{collect_reviews, finalize};
use crate::AppState;

/// Query parameters for GET /api/reviews
#[derive(Debug, Deserialize)]
pub struct ReviewsParams {
    pub data_id: String,
    /// Business name, accepted for parity with the frontend request
    /// shape; not used by the ingestion itself
    #[serde(default)]
    pub name: String,
}

/// GET /api/reviews?data_id=&name=
///
/// Collects up to three pages of reviews for the place, classifies and
/// ranks them worst-first, and upserts the batch into the store. The
/// sorted list is returned regardless of persistence outcome.
pub async fn get_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewsParams>,
) -> ApiResult<Json<Vec<Review>>> {
    if params.data_id.trim().is_empty() {
        return Err(ApiError::BadRequest("data_id must not be empty".to_string()));
    }

    let reviews = collect_reviews(state.provider.as_ref(), &params.data_id).await;
    let sorted = finalize(reviews);

    let store = SqliteReviewStore::new(state.db.clone());
    let written = persist_reviews(&store, &sorted).await;

    info!(
        data_id = %params.data_id,
        collected = sorted.len(),
        persisted = written,
        "Review batch processed"
    );

    Ok(Json(sorted))
}

/// Build review routes
pub fn review_routes() -> Router<AppState> {
    Router::new().route("/api/reviews", get(get_reviews))
}
