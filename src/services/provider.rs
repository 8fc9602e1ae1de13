//! Search provider abstraction
//!
//! The place search and paged review feed are consumed through the
//! `ReviewProvider` trait so the collector and API handlers stay
//! independent of the concrete backend. Wire shapes mirror the
//! provider's JSON with every field optional; missing fields are
//! resolved downstream by the normalizer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Place search response
///
/// A direct match arrives as `place_results`; broader queries return a
/// `local_results` list instead.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaceSearchResponse {
    pub place_results: Option<RawPlace>,
    pub local_results: Option<Vec<RawPlace>>,
}

/// Raw place record from the provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPlace {
    pub title: Option<String>,
    pub address: Option<String>,
    /// Primary place identifier
    pub data_id: Option<String>,
    /// Secondary signature identifier, present on some listing types
    pub lsig: Option<String>,
    pub rating: Option<f64>,
}

/// One page of the review feed
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReviewsPage {
    #[serde(default)]
    pub reviews: Vec<RawReview>,
    pub serpapi_pagination: Option<Pagination>,
}

impl ReviewsPage {
    /// Continuation token for the next page, if any
    pub fn next_page_token(&self) -> Option<&str> {
        self.serpapi_pagination
            .as_ref()
            .and_then(|p| p.next_page_token.as_deref())
    }
}

/// Response-level pagination block
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pagination {
    pub next_page_token: Option<String>,
}

/// Raw review record from the provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawReview {
    /// Nested reviewer info; preferred source for the author name
    pub user: Option<RawUser>,
    /// Top-level author fallback
    pub author: Option<String>,
    pub rating: Option<i64>,
    /// Short review text; preferred over `text`
    pub snippet: Option<String>,
    pub text: Option<String>,
    /// Permalink; used as the stable review id when present
    pub link: Option<String>,
    pub date: Option<String>,
}

/// Nested reviewer info
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawUser {
    pub name: Option<String>,
}

/// Paged search provider interface
///
/// Implemented by `SerpApiClient` in production and by scripted fakes in
/// tests.
#[async_trait::async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Resolve a free-form query into a place search response
    async fn search_place(&self, query: &str) -> Result<PlaceSearchResponse, ProviderError>;

    /// Fetch one page of reviews for a place
    ///
    /// `page_token` is None for the first page, then the previous
    /// response's continuation token.
    async fn fetch_reviews_page(
        &self,
        data_id: &str,
        page_token: Option<&str>,
    ) -> Result<ReviewsPage, ProviderError>;
}
