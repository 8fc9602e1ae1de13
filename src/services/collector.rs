//! Paged review collection
//!
//! Drives the provider's review feed with continuation tokens,
//! normalizing each page as it arrives, then ranks the accumulated
//! batch worst-first for the removal-request workflow.

use tracing::warn;

use crate::models::Review;
use crate::services::normalizer::normalize_review;
use crate::services::provider::ReviewProvider;

/// Hard cap on provider page fetches per collection pass. Keeps a
/// single request from issuing unbounded external calls.
const MAX_REVIEW_PAGES: usize = 3;

/// Collect and normalize up to `MAX_REVIEW_PAGES` pages of reviews.
///
/// Fetches are strictly sequential: each page's continuation token
/// feeds the next request. Collection stops early when a response
/// carries no token. A provider error is treated as an empty page for
/// that fetch, no retry; with no token to continue from, the pass ends
/// with whatever was gathered. Per-page provider order is preserved.
pub async fn collect_reviews<P: ReviewProvider + ?Sized>(
    provider: &P,
    place_id: &str,
) -> Vec<Review> {
    let mut reviews = Vec::new();
    let mut next_page_token: Option<String> = None;

    for page in 0..MAX_REVIEW_PAGES {
        let result = provider
            .fetch_reviews_page(place_id, next_page_token.as_deref())
            .await;

        let page_data = match result {
            Ok(data) => data,
            Err(e) => {
                warn!(place_id = %place_id, page = page, error = %e, "Reviews page fetch failed");
                break;
            }
        };

        for raw in &page_data.reviews {
            reviews.push(normalize_review(place_id, raw));
        }

        next_page_token = page_data.next_page_token().map(str::to_string);
        if next_page_token.is_none() {
            break;
        }
    }

    reviews
}

/// Rank a collected batch: ascending by rating, worst reviews first.
///
/// The sort is stable, so reviews sharing a rating keep their provider
/// order.
pub fn finalize(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by_key(|r| r.rating);
    reviews
}
