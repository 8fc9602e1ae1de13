//! Review normalizer
//!
//! Maps a raw provider review record into the canonical `Review` shape,
//! substituting placeholders for missing fields and embedding the
//! classifier verdict.

use sha2::{Digest, Sha256};

use crate::models::review::{Review, NO_COMMENT, UNKNOWN_AUTHOR, UNKNOWN_DATE};
use crate::services::analyzer::analyze_review;
use crate::services::provider::RawReview;

/// Normalize one raw review for the given place.
///
/// Classification runs against the raw snippet, before the stored-text
/// sentinel is substituted: an absent comment must classify as empty,
/// not as the sentinel string.
pub fn normalize_review(place_id: &str, raw: &RawReview) -> Review {
    // Empty strings count as absent for author and text, matching the
    // provider's habit of sending "" instead of omitting fields
    let author = raw
        .user
        .as_ref()
        .and_then(|u| u.name.clone())
        .filter(|n| !n.is_empty())
        .or_else(|| raw.author.clone().filter(|a| !a.is_empty()))
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let rating = raw.rating.unwrap_or(0);

    let snippet = raw
        .snippet
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| raw.text.clone().filter(|t| !t.is_empty()))
        .unwrap_or_default();

    let analysis = analyze_review(rating, &snippet);

    let id = match &raw.link {
        Some(link) => link.clone(),
        None => fallback_id(&author, &snippet),
    };

    let text = if snippet.is_empty() {
        NO_COMMENT.to_string()
    } else {
        snippet
    };

    Review {
        id,
        place_id: place_id.to_string(),
        author,
        rating,
        text,
        date: raw.date.clone().unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        violation: analysis.violation,
        confidence: analysis.confidence,
        secure: rating > 3,
    }
}

/// Content-digest id for reviews without a permalink.
///
/// SHA-256 over author + snippet, so the same review maps to the same
/// row on every ingestion pass, across process restarts.
fn fallback_id(author: &str, snippet: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(author.as_bytes());
    hasher.update(snippet.as_bytes());
    format!("{:x}", hasher.finalize())
}
