//! Placescout - Proximity Search and Marker Session Orchestration
//!
//! Placescout decides what to ask a mapping/places service, at what radius,
//! and how to merge the asynchronous answers into a stable marker set while
//! the user pans, zooms, or types free-text queries. The service itself is
//! opaque: geocoding, keyword-scoped nearby search, free-text search, and
//! autocomplete sit behind the [`GeoProvider`] capability trait, and the
//! map widget's marker layer behind [`MarkerStore`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use placescout::{
//!     Coordinate, FixtureLocator, FixtureProvider, MapController, PlaceResult, VecMarkerStore,
//! };
//!
//! let provider = Arc::new(
//!     FixtureProvider::new()
//!         .with_place(PlaceResult::new(
//!             "plant-1",
//!             Coordinate::new(18.53, 73.85),
//!             "Acme manufacturing",
//!             "Shivajinagar",
//!         ))
//!         .with_geocode("Shivajinagar", Coordinate::new(18.5314, 73.8446)),
//! );
//! let markers = Arc::new(VecMarkerStore::new());
//! let locator = Arc::new(FixtureLocator::at(Coordinate::new(18.5204, 73.8567)));
//!
//! let controller = MapController::builder(provider, Arc::clone(&markers), locator).build();
//!
//! let runtime = tokio::runtime::Runtime::new()?;
//! runtime.block_on(async {
//!     // Keyword fan-out at the current viewport.
//!     controller.on_map_idle().await;
//!
//!     // "near me" is gated on an explicit location confirmation.
//!     assert!(controller.on_search_submitted("plants near me").await.is_err());
//!     controller.on_locate().await?;
//!     controller.on_search_submitted("manufacturing near me").await?;
//!     Ok::<(), Box<dyn std::error::Error>>(())
//! })?;
//!
//! assert!(!markers.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Components
//!
//! - **Zoom policy**: pure mapping from zoom level to search radius and
//!   result cap ([`reach_for_zoom`]).
//! - **Proximity engine**: concurrent multi-keyword nearby search with
//!   id-based dedup, a cross-keyword cap, and generation-stamped discard of
//!   stale responses ([`ProximitySearchEngine`]).
//! - **Query router**: classifies a free-text query as "near me",
//!   place-name, or generic, and picks the search path ([`QueryRouter`]).
//! - **Controller**: one context object owning viewport and user-location
//!   state, wiring the map's triggers onto the components
//!   ([`MapController`]).
//!
//! Provider failures are never fatal to a session: a failing keyword is
//! skipped, a failing geocode falls back to a center-anchored search, and
//! the map stays interactive after any error.

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod controller;
mod engine;
pub mod error;
mod fixture;
mod geo;
mod geolocate;
mod markers;
mod policy;
mod provider;
mod router;
mod session;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use controller::{MapController, MapControllerBuilder};
pub use engine::ProximitySearchEngine;
pub use error::PlacescoutError;
pub use fixture::{FixtureLocator, FixtureProvider};
pub use geo::Coordinate;
pub use geolocate::{GeolocateError, LocationSource};
pub use markers::{Marker, MarkerStore, VecMarkerStore};
pub use policy::{SearchReach, ZoomTier, reach_for_zoom};
pub use provider::{GeoProvider, PlacePrediction, PlaceResult, ProviderError};
pub use router::{QueryRouter, RouteError, RouteReport, SearchPath};
pub use session::{DedupIndex, UserLocationState, Viewport};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Placescout library.
///
/// This sets up structured logging with configurable levels and filtering.
/// Call this once at the start of your application to enable detailed
/// logging output from Placescout operations.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use placescout::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), placescout::PlacescoutError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<(), PlacescoutError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
        .add_directive("hyper_util=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());

    LOGGER_INIT.get_or_init(|| {
        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    #[tokio::test]
    async fn test_controller_construction() {
        setup_test_env();

        let controller = MapController::builder(
            Arc::new(FixtureProvider::new()),
            Arc::new(VecMarkerStore::new()),
            Arc::new(FixtureLocator::at(Coordinate::new(18.5204, 73.8567))),
        )
        .build();

        assert_eq!(controller.viewport(), Viewport::default());
        assert!(!controller.user_location().is_confirmed());
    }

    #[tokio::test]
    async fn test_empty_query_does_not_error() {
        setup_test_env();

        let controller = MapController::builder(
            Arc::new(FixtureProvider::new()),
            Arc::new(VecMarkerStore::new()),
            Arc::new(FixtureLocator::at(Coordinate::new(18.5204, 73.8567))),
        )
        .build();

        let report = controller.on_search_submitted("").await;
        assert!(report.is_ok(), "empty query should not error");
    }
}
