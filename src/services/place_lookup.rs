//! Place lookup
//!
//! Resolves a business name + address into a canonical `Place` via a
//! single provider query.

use crate::models::Place;
use crate::services::provider::{ProviderError, RawPlace, ReviewProvider};

/// Build the provider query string from name and address
pub fn build_query(name: &str, address: &str) -> String {
    format!("{} {}", name, address).trim().to_string()
}

/// Look up a place by name and address.
///
/// Prefers the provider's direct place result; falls back to the first
/// local result. Returns `Ok(None)` when the provider yields neither —
/// the caller surfaces that as a "business not found" payload, not an
/// error.
pub async fn lookup_place<P: ReviewProvider + ?Sized>(
    provider: &P,
    name: &str,
    address: &str,
) -> Result<Option<Place>, ProviderError> {
    let query = build_query(name, address);
    let response = provider.search_place(&query).await?;

    let raw = response
        .place_results
        .or_else(|| response.local_results.and_then(|l| l.into_iter().next()));

    Ok(raw.map(into_place))
}

fn into_place(raw: RawPlace) -> Place {
    Place {
        title: raw.title.unwrap_or_default(),
        address: raw.address.unwrap_or_default(),
        // Some listing types only carry the secondary signature id
        data_id: raw.data_id.filter(|id| !id.is_empty()).or(raw.lsig),
        rating: raw.rating.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::provider::{PlaceSearchResponse, ReviewsPage};

    struct FixedProvider {
        response: PlaceSearchResponse,
    }

    #[async_trait::async_trait]
    impl ReviewProvider for FixedProvider {
        async fn search_place(
            &self,
            _query: &str,
        ) -> Result<PlaceSearchResponse, ProviderError> {
            Ok(self.response.clone())
        }

        async fn fetch_reviews_page(
            &self,
            _data_id: &str,
            _page_token: Option<&str>,
        ) -> Result<ReviewsPage, ProviderError> {
            unimplemented!("not used by lookup tests")
        }
    }

    fn raw_place(title: &str, data_id: Option<&str>, lsig: Option<&str>) -> RawPlace {
        RawPlace {
            title: Some(title.to_string()),
            address: Some("Musterstraße 1".to_string()),
            data_id: data_id.map(str::to_string),
            lsig: lsig.map(str::to_string),
            rating: Some(4.2),
        }
    }

    #[test]
    fn test_query_joins_and_trims() {
        assert_eq!(build_query("Café Adler", "Berlin"), "Café Adler Berlin");
        assert_eq!(build_query("Café Adler", ""), "Café Adler");
    }

    #[tokio::test]
    async fn test_prefers_direct_place_result() {
        let provider = FixedProvider {
            response: PlaceSearchResponse {
                place_results: Some(raw_place("Direkt", Some("id-1"), None)),
                local_results: Some(vec![raw_place("Lokal", Some("id-2"), None)]),
            },
        };

        let place = lookup_place(&provider, "Direkt", "").await.unwrap().unwrap();
        assert_eq!(place.title, "Direkt");
        assert_eq!(place.data_id.as_deref(), Some("id-1"));
    }

    #[tokio::test]
    async fn test_falls_back_to_first_local_result() {
        let provider = FixedProvider {
            response: PlaceSearchResponse {
                place_results: None,
                local_results: Some(vec![
                    raw_place("Erstes", Some("id-a"), None),
                    raw_place("Zweites", Some("id-b"), None),
                ]),
            },
        };

        let place = lookup_place(&provider, "x", "").await.unwrap().unwrap();
        assert_eq!(place.title, "Erstes");
    }

    #[tokio::test]
    async fn test_lsig_fallback_for_data_id() {
        let provider = FixedProvider {
            response: PlaceSearchResponse {
                place_results: Some(raw_place("Ort", None, Some("sig-9"))),
                local_results: None,
            },
        };

        let place = lookup_place(&provider, "Ort", "").await.unwrap().unwrap();
        assert_eq!(place.data_id.as_deref(), Some("sig-9"));
    }

    #[tokio::test]
    async fn test_no_results_yields_none() {
        let provider = FixedProvider {
            response: PlaceSearchResponse {
                place_results: None,
                local_results: Some(vec![]),
            },
        };

        assert!(lookup_place(&provider, "x", "y").await.unwrap().is_none());
    }
}
