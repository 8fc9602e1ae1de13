//! Place search endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::services::place_lookup::lookup_place;
use crate::AppState;

/// Query parameters for GET /api/search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Response body for GET /api/search.
///
/// A miss is a structured `{error}` payload the caller checks for, not
/// an HTTP error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Found {
        title: String,
        /// Mirrors `title`; kept for frontend compatibility
        name: String,
        address: String,
        data_id: Option<String>,
        rating: f64,
    },
    NotFound {
        error: String,
    },
}

/// GET /api/search?name=&address=
///
/// Resolves a business name and address into a canonical place record.
/// A provider failure degrades to the same not-found payload as an
/// empty result.
pub async fn search_place(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let result = lookup_place(state.provider.as_ref(), &params.name, &params.address).await;

    let place = match result {
        Ok(place) => place,
        Err(e) => {
            warn!(name = %params.name, error = %e, "Place search failed");
            None
        }
    };

    match place {
        Some(place) => Json(SearchResponse::Found {
            name: place.title.clone(),
            title: place.title,
            address: place.address,
            data_id: place.data_id,
            rating: place.rating,
        }),
        None => Json(SearchResponse::NotFound {
            error: "business not found".to_string(),
        }),
    }
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_place))
}
