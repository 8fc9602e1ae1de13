//! Canonical review record
//!
//! Built fresh on every ingestion pass by the normalizer and upserted by
//! id, so a re-fetched review overwrites its previous row.

use serde::{Deserialize, Serialize};

/// Author placeholder when the provider record carries no name
pub const UNKNOWN_AUTHOR: &str = "unknown user";

/// Stored text sentinel for reviews without a comment
pub const NO_COMMENT: &str = "no comment left";

/// Date placeholder when the provider record carries no date
pub const UNKNOWN_DATE: &str = "recently";

/// A normalized, classified customer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Stable identifier: provider permalink, else content digest of
    /// (author, snippet)
    pub id: String,
    /// Identifier of the reviewed place
    pub place_id: String,
    /// Reviewer display name
    pub author: String,
    /// Star rating in 0..=5, 0 = unrated
    pub rating: i64,
    /// Review text; `NO_COMMENT` sentinel when the provider gave none
    pub text: String,
    /// Free-form provider date string
    pub date: String,
    /// Classifier violation label; None for secure reviews
    pub violation: Option<String>,
    /// Classifier confidence in 0..=100
    pub confidence: i64,
    /// True iff rating > 3; such reviews are exempt from removal flagging
    pub secure: bool,
}
