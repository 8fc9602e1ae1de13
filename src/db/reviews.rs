//! Review persistence
//!
//! Storage is injected through the `ReviewStore` capability so the
//! ingestion core stays independent of the concrete backend; the
//! shipped implementation upserts into SQLite.

use sqlx::SqlitePool;
use tracing::warn;

use crate::error::Result;
use crate::models::Review;

/// Upsert-by-id storage capability for reviews
#[async_trait::async_trait]
pub trait ReviewStore: Send + Sync {
    /// Insert the review, replacing any prior row with the same id
    async fn upsert_review(&self, review: &Review) -> Result<()>;
}

/// SQLite-backed review store
#[derive(Clone)]
pub struct SqliteReviewStore {
    pool: SqlitePool,
}

impl SqliteReviewStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ReviewStore for SqliteReviewStore {
    async fn upsert_review(&self, review: &Review) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (
                id, place_id, author, rating, text,
                date, violation, confidence, secure
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                place_id = excluded.place_id,
                author = excluded.author,
                rating = excluded.rating,
                text = excluded.text,
                date = excluded.date,
                violation = excluded.violation,
                confidence = excluded.confidence,
                secure = excluded.secure
            "#,
        )
        .bind(&review.id)
        .bind(&review.place_id)
        .bind(&review.author)
        .bind(review.rating)
        .bind(&review.text)
        .bind(&review.date)
        .bind(&review.violation)
        .bind(review.confidence)
        .bind(review.secure)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Persist a batch of reviews, best-effort.
///
/// Each review is upserted on its own; a failed row is logged and
/// skipped, leaving the store in whatever partial state the batch
/// produced. Returns the number of rows written. Callers return the
/// in-memory batch to the client regardless of the outcome here.
pub async fn persist_reviews<S: ReviewStore + ?Sized>(store: &S, reviews: &[Review]) -> usize {
    let mut written = 0;

    for review in reviews {
        match store.upsert_review(review).await {
            Ok(()) => written += 1,
            Err(e) => {
                warn!(review_id = %review.id, error = %e, "Review upsert failed");
            }
        }
    }

    written
}
