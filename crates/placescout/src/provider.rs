//! The capability surface of the external mapping/places service.
//!
//! The core never talks to a concrete service. Geocoding, reverse
//! geocoding, keyword-scoped nearby search, free-text search, and
//! autocomplete all go through [`GeoProvider`]. "Not found" is
//! `Ok(None)`; a non-OK service status or a transport failure is a
//! [`ProviderError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinate;

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Failure of a single provider call.
///
/// Per-keyword nearby-search failures are logged and skipped by the engine
/// (one keyword must not block the others); text-search failures surface to
/// the caller. Neither is fatal to the running session and nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The service answered, but with a non-OK status word.
    #[error("provider returned status {0:?}")]
    Status(String),
    /// The call never produced a usable response.
    #[error("provider transport error: {0}")]
    Transport(#[from] anyhow::Error),
}

/// One place in a search response.
///
/// Created per response, handed to the marker sink, never mutated. The `id`
/// is provider-assigned and unique within a search session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub id: String,
    pub coordinate: Coordinate,
    pub display_name: String,
    pub description: String,
}

impl PlaceResult {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        coordinate: Coordinate,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            coordinate,
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// The single best autocomplete prediction for a free-text query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePrediction {
    /// Human-readable description, suitable for geocoding.
    pub description: String,
}

/// Asynchronous mapping/places capability.
///
/// Calls are fire-and-forget from the caller's perspective and complete in
/// unspecified relative order. Nothing here is cancelled on session reset;
/// stale completions are discarded by the engine's generation stamp.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Resolve a textual address to a coordinate.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>>;

    /// Resolve a coordinate to a human-readable address.
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<String>>;

    /// Keyword-scoped search bounded by `radius_m` around `anchor`.
    /// Results come back in provider order.
    async fn nearby_search(
        &self,
        anchor: Coordinate,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<PlaceResult>>;

    /// Free-text search biased to `radius_m` around `anchor`.
    async fn text_search(
        &self,
        query: &str,
        anchor: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<PlaceResult>>;

    /// The single best prediction for a partial query, if any.
    async fn autocomplete(&self, query: &str) -> Result<Option<PlacePrediction>>;
}
