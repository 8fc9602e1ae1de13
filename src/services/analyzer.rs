//! Review analyzer
//!
//! Rule-based classifier flagging reviews as candidates for
//! content-policy removal requests. Pure and deterministic: the ordered
//! decision table below maps (rating, text) to a violation label and a
//! confidence score.
//!
//! Ratings above 3 are secure and never flagged. For ratings 0-3 the
//! rules are checked in order and the first match wins; the gray-zone
//! rules are exhaustive for that range, so every low-rated review
//! receives a label.

use serde::{Deserialize, Serialize};

/// Ratings above this value are exempt from removal flagging
const SECURE_RATING_THRESHOLD: i64 = 3;

/// Character length below which a low-rated review counts as a
/// low-relevance gray-zone entry
const SHORT_TEXT_THRESHOLD: usize = 50;

/// Insult terms constituting defamatory criticism. Matched
/// case-insensitively as substrings; the review corpus is German.
const INSULT_TERMS: &[&str] = &[
    "unverschämt",
    "frech",
    "arrogant",
    "unfähig",
    "dumm",
    "idiot",
    "sauladen",
    "unfreundlich",
    "unprofessionell",
];

/// Fraud-accusation terms constituting unproven factual allegations
const CLAIM_TERMS: &[&str] = &[
    "betrug",
    "abzocke",
    "lüge",
    "gestohlen",
    "betrüger",
    "abgezockt",
    "abzocker",
    "abzocken",
];

/// Classifier output: violation label and confidence score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Suspected content-policy breach; None when the review is secure
    pub violation: Option<String>,
    /// Certainty of the violation call, 0..=100
    pub confidence: i64,
}

impl Analysis {
    fn flagged(violation: &str, confidence: i64) -> Self {
        Self {
            violation: Some(violation.to_string()),
            confidence,
        }
    }

    fn secure() -> Self {
        Self {
            violation: None,
            confidence: 100,
        }
    }
}

/// Classify a review by rating and text.
///
/// Text is normalized (lower-cased, whitespace-trimmed) before rule
/// evaluation; lengths are measured in characters, not bytes. Rule order
/// is significant: the categories are not mutually exclusive and the
/// first match wins.
pub fn analyze_review(rating: i64, text: &str) -> Analysis {
    let lowered = text.to_lowercase();
    let normalized = lowered.trim();
    let flaggable = rating <= SECURE_RATING_THRESHOLD;

    // 1. Ghost entry: low rating without any experience narrative
    if flaggable && normalized.is_empty() {
        return Analysis::flagged(
            "policy violation: missing experience narrative (suspected fake)",
            98,
        );
    }

    // 2. Insult / defamatory criticism
    if flaggable && INSULT_TERMS.iter().any(|term| normalized.contains(term)) {
        return Analysis::flagged(
            "impermissible defamatory criticism / personality-rights violation",
            95,
        );
    }

    // 3. Unproven fraud accusation
    if flaggable && CLAIM_TERMS.iter().any(|term| normalized.contains(term)) {
        return Analysis::flagged(
            "unproven factual allegation (burden of proof on author)",
            88,
        );
    }

    // 4./5. Gray zone: low rating with no keyword match
    if flaggable {
        if normalized.chars().count() < SHORT_TEXT_THRESHOLD {
            return Analysis::flagged("content conflicts with relevance guideline", 75);
        }
        return Analysis::flagged("review-worthy defamation suspicion", 65);
    }

    // Secure range (ratings 4-5). Also the fall-through for low ratings,
    // unreachable while the gray-zone rules cover that whole range.
    Analysis::secure()
}
