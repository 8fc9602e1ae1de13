//! SerpApi client
//!
//! Queries the Google Maps and Google Maps Reviews engines. The API key
//! is injected at construction; there is no compiled-in default.

use std::time::Duration;

use crate::services::provider::{
    PlaceSearchResponse, ProviderError, ReviewProvider, ReviewsPage,
};

const SERPAPI_BASE_URL: &str = "https://serpapi.com/search";
const USER_AGENT: &str = "revaudit/0.1.0";

/// SerpApi HTTP client
pub struct SerpApiClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl SerpApiClient {
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
        })
    }

    /// Issue a GET against the search endpoint and decode the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let response = self
            .http_client
            .get(SERPAPI_BASE_URL)
            .query(params)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ReviewProvider for SerpApiClient {
    async fn search_place(&self, query: &str) -> Result<PlaceSearchResponse, ProviderError> {
        tracing::debug!(query = %query, "Querying place search");

        let params = [
            ("engine", "google_maps"),
            ("q", query),
            ("api_key", self.api_key.as_str()),
        ];

        self.get_json(&params).await
    }

    async fn fetch_reviews_page(
        &self,
        data_id: &str,
        page_token: Option<&str>,
    ) -> Result<ReviewsPage, ProviderError> {
        tracing::debug!(
            data_id = %data_id,
            continuation = page_token.is_some(),
            "Querying reviews page"
        );

        let mut params = vec![
            ("engine", "google_maps_reviews"),
            ("data_id", data_id),
            ("api_key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("next_page_token", token));
        }

        let page: ReviewsPage = self.get_json(&params).await?;

        tracing::debug!(
            data_id = %data_id,
            count = page.reviews.len(),
            has_next = page.next_page_token().is_some(),
            "Retrieved reviews page"
        );

        Ok(page)
    }
}
