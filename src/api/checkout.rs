//! Checkout stub endpoint
//!
//! Payment integration is not wired up yet; the endpoint accepts the
//! order payload and returns a fixed checkout URL.

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::AppState;

/// Fixed URL returned until the payment integration lands
const CHECKOUT_URL: &str = "https://buy.stripe.com/demo_checkout_link";

/// Request body for POST /api/create-checkout-session
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Reviews selected for removal requests
    pub reviews: Vec<Value>,
    /// Company record as assembled by the frontend
    pub company: Value,
    /// Customer contact details
    #[serde(rename = "customerDetails")]
    pub customer_details: Value,
}

/// Response body: the checkout URL to redirect the customer to
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// POST /api/create-checkout-session
pub async fn create_checkout_session(
    Json(request): Json<CheckoutRequest>,
) -> Json<CheckoutResponse> {
    info!(
        email = request
            .customer_details
            .get("email")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown"),
        company = request
            .company
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown"),
        removal_count = request.reviews.len(),
        "Checkout session requested"
    );

    Json(CheckoutResponse {
        url: CHECKOUT_URL.to_string(),
    })
}

/// Build checkout routes
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/api/create-checkout-session", post(create_checkout_session))
}
