//! Service layer: provider access, review analysis and collection

pub mod analyzer;
pub mod collector;
pub mod normalizer;
pub mod place_lookup;
pub mod provider;
pub mod serpapi_client;
