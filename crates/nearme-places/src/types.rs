use serde::{Deserialize, Serialize};

/// A venue returned by the places provider.
///
/// `id` is only used as a rendering key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "fsq_id")]
    pub id: String,
    pub name: String,
}

/// Text-search body. Every per-venue field except id and name is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub results: Vec<Place>,
}

/// Places provider errors
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("Places data not found (HTTP {status})")]
    NotFound { status: u16 },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}
