//! HTTP API integration tests
//!
//! Drives the router with in-memory SQLite and a scripted provider, no
//! bound port.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use revaudit::services::provider::{
    Pagination, PlaceSearchResponse, ProviderError, RawPlace, RawReview, RawUser, ReviewProvider,
    ReviewsPage,
};
use revaudit::{build_router, AppState};

/// Scripted provider for router-level tests
#[derive(Default)]
struct FakeProvider {
    place_response: Option<PlaceSearchResponse>,
    /// Pages served in order; repeats the last page when exhausted
    review_pages: Vec<ReviewsPage>,
    fail_search: bool,
}

#[async_trait::async_trait]
impl ReviewProvider for FakeProvider {
    async fn search_place(&self, _query: &str) -> Result<PlaceSearchResponse, ProviderError> {
        if self.fail_search {
            return Err(ProviderError::ApiError(500, "scripted outage".into()));
        }
        Ok(self.place_response.clone().unwrap_or_default())
    }

    async fn fetch_reviews_page(
        &self,
        _data_id: &str,
        page_token: Option<&str>,
    ) -> Result<ReviewsPage, ProviderError> {
        let index = match page_token {
            None => 0,
            Some(token) => token.parse::<usize>().unwrap(),
        };
        Ok(self
            .review_pages
            .get(index)
            .cloned()
            .unwrap_or_default())
    }
}

async fn test_app_state(provider: FakeProvider) -> AppState {
    let db_pool = sqlx::SqlitePool::connect(":memory:").await.unwrap();
    revaudit::db::init_tables(&db_pool).await.unwrap();

    AppState::new(db_pool, Arc::new(provider))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn raw_review(author: &str, rating: i64, snippet: &str, link: Option<&str>) -> RawReview {
    RawReview {
        user: Some(RawUser {
            name: Some(author.to_string()),
        }),
        author: None,
        rating: Some(rating),
        snippet: Some(snippet.to_string()),
        text: None,
        link: link.map(str::to_string),
        date: Some("vor 2 Wochen".to_string()),
    }
}

#[tokio::test]
async fn test_search_returns_place_fields() {
    let provider = FakeProvider {
        place_response: Some(PlaceSearchResponse {
            place_results: Some(RawPlace {
                title: Some("Backhaus Krone".to_string()),
                address: Some("Hauptstr. 5, Ulm".to_string()),
                data_id: Some("0x1:0x2".to_string()),
                lsig: None,
                rating: Some(4.4),
            }),
            local_results: None,
        }),
        ..Default::default()
    };
    let app = build_router(test_app_state(provider).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/search?name=Backhaus%20Krone&address=Ulm")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Backhaus Krone");
    assert_eq!(body["name"], "Backhaus Krone");
    assert_eq!(body["address"], "Hauptstr. 5, Ulm");
    assert_eq!(body["data_id"], "0x1:0x2");
    assert_eq!(body["rating"], 4.4);
}

#[tokio::test]
async fn test_search_falls_back_to_first_local_result() {
    let provider = FakeProvider {
        place_response: Some(PlaceSearchResponse {
            place_results: None,
            local_results: Some(vec![
                RawPlace {
                    title: Some("Erster Treffer".to_string()),
                    address: Some("Weg 1".to_string()),
                    data_id: None,
                    lsig: Some("sig-1".to_string()),
                    rating: Some(3.8),
                },
                RawPlace {
                    title: Some("Zweiter Treffer".to_string()),
                    ..Default::default()
                },
            ]),
        }),
        ..Default::default()
    };
    let app = build_router(test_app_state(provider).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/search?name=Treffer")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["title"], "Erster Treffer");
    // data_id falls back to the signature id
    assert_eq!(body["data_id"], "sig-1");
}

#[tokio::test]
async fn test_search_miss_yields_error_payload() {
    let provider = FakeProvider {
        place_response: Some(PlaceSearchResponse::default()),
        ..Default::default()
    };
    let app = build_router(test_app_state(provider).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/search?name=Nirgendwo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // A miss is a structured payload, not an HTTP error
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"], "business not found");
}

#[tokio::test]
async fn test_search_provider_failure_degrades_to_not_found() {
    let provider = FakeProvider {
        fail_search: true,
        ..Default::default()
    };
    let app = build_router(test_app_state(provider).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/search?name=Egal")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"], "business not found");
}

#[tokio::test]
async fn test_reviews_sorted_classified_and_persisted() {
    let provider = FakeProvider {
        review_pages: vec![
            ReviewsPage {
                reviews: vec![
                    raw_review("Anna", 5, "Alles bestens, sehr empfehlenswert!", Some("r-1")),
                    raw_review("Bernd", 1, "Sauladen!", Some("r-2")),
                ],
                serpapi_pagination: Some(Pagination {
                    next_page_token: Some("1".to_string()),
                }),
            },
            ReviewsPage {
                reviews: vec![raw_review("Clara", 3, "Geht so.", Some("r-3"))],
                serpapi_pagination: None,
            },
        ],
        ..Default::default()
    };
    let state = test_app_state(provider).await;
    let pool = state.db.clone();
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/reviews?data_id=0x1:0x2&name=Test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let list = body.as_array().unwrap();

    // Worst reviews first
    let ratings: Vec<i64> = list.iter().map(|r| r["rating"].as_i64().unwrap()).collect();
    assert_eq!(ratings, vec![1, 3, 5]);

    // Insult rule fired for the 1-star review
    assert_eq!(list[0]["confidence"], 95);
    assert_eq!(list[0]["secure"], false);
    assert!(list[0]["violation"].as_str().is_some());

    // Secure review is unflagged
    assert_eq!(list[2]["violation"], Value::Null);
    assert_eq!(list[2]["secure"], true);

    // Batch landed in the store
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 3);

    let place_id: String = sqlx::query_scalar("SELECT place_id FROM reviews WHERE id = 'r-2'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(place_id, "0x1:0x2");
}

#[tokio::test]
async fn test_reviews_reingestion_upserts_without_duplicates() {
    let provider = FakeProvider {
        review_pages: vec![ReviewsPage {
            reviews: vec![raw_review("Anna", 2, "Enttäuschend.", Some("r-1"))],
            serpapi_pagination: None,
        }],
        ..Default::default()
    };
    let state = test_app_state(provider).await;
    let pool = state.db.clone();
    let app = build_router(state);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/reviews?data_id=0x1:0x2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_reviews_rejects_empty_data_id() {
    let app = build_router(test_app_state(FakeProvider::default()).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/reviews?data_id=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_checkout_returns_fixed_url() {
    let app = build_router(test_app_state(FakeProvider::default()).await);

    let payload = json!({
        "reviews": [{"id": "r-1"}],
        "company": {"name": "Backhaus Krone"},
        "customerDetails": {"email": "kunde@example.com"}
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/create-checkout-session")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["url"], "https://buy.stripe.com/demo_checkout_link");
}

#[tokio::test]
async fn test_health_reports_module_and_status() {
    let app = build_router(test_app_state(FakeProvider::default()).await);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "revaudit");
}
