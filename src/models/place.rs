//! Canonical place record resolved from a name + address query

use serde::{Deserialize, Serialize};

/// A business/location record resolved by the place lookup.
///
/// Not persisted by this service; the `places` table exists for schema
/// completeness only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Business display title
    pub title: String,
    /// Street address as reported by the provider
    pub address: String,
    /// Canonical place identifier (may be absent for some listings)
    pub data_id: Option<String>,
    /// Aggregate star rating, 0.0 when unknown
    pub rating: f64,
}
