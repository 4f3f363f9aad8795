//! Top-level wiring of user-facing triggers onto the search components.
//!
//! [`MapController`] owns the committed viewport and the explicit
//! user-location state the rest of the crate reads: one context object in
//! place of ambient globals. The map widget drives it through three
//! triggers: the idle/recenter event, the typed-query submit, and the
//! locate button.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use crate::{
    config::SearchConfig,
    engine::ProximitySearchEngine,
    geo::Coordinate,
    geolocate::{GeolocateError, LocationSource},
    markers::MarkerStore,
    provider::GeoProvider,
    router::{QueryRouter, RouteError, RouteReport},
    session::{UserLocationState, Viewport},
};

/// Wires map triggers to the proximity engine and the query router.
///
/// # Examples
///
/// ```rust
/// use placescout::{
///     Coordinate, FixtureLocator, FixtureProvider, MapController, SearchConfig, VecMarkerStore,
/// };
/// use std::sync::Arc;
///
/// let provider = Arc::new(
///     FixtureProvider::new().with_geocode("Pune", Coordinate::new(18.5204, 73.8567)),
/// );
/// let markers = Arc::new(VecMarkerStore::new());
/// let locator = Arc::new(FixtureLocator::at(Coordinate::new(18.5204, 73.8567)));
///
/// let controller = MapController::builder(provider, Arc::clone(&markers), locator)
///     .config(SearchConfig::default())
///     .build();
///
/// let runtime = tokio::runtime::Runtime::new()?;
/// runtime.block_on(async {
///     controller.on_map_idle().await;
/// });
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MapController<P, M, L> {
    provider: Arc<P>,
    markers: Arc<M>,
    locator: Arc<L>,
    engine: Arc<ProximitySearchEngine<P, M>>,
    router: QueryRouter<P, M>,
    viewport: Arc<Mutex<Viewport>>,
    user_location: Arc<Mutex<UserLocationState>>,
}

impl<P, M, L> MapController<P, M, L>
where
    P: GeoProvider,
    M: MarkerStore,
    L: LocationSource,
{
    /// Start building a controller over the three external collaborators.
    #[must_use]
    pub fn builder(
        provider: Arc<P>,
        markers: Arc<M>,
        locator: Arc<L>,
    ) -> MapControllerBuilder<P, M, L> {
        MapControllerBuilder {
            provider,
            markers,
            locator,
            config: SearchConfig::default(),
            viewport: Viewport::default(),
        }
    }

    /// Map idle/recenter trigger: refresh the nearby-search session at the
    /// committed viewport. Returns the number of markers emitted.
    pub async fn on_map_idle(&self) -> usize {
        let Viewport { center, zoom } = *self.viewport.lock();
        self.engine.search(center, zoom).await
    }

    /// Typed-query submit trigger.
    pub async fn on_search_submitted(&self, query: &str) -> Result<RouteReport, RouteError> {
        self.router.route(query).await
    }

    /// Locate-button trigger.
    ///
    /// Requests a fix with a bounded wait; on success confirms the user
    /// location, recenters the view, refreshes the nearby session there,
    /// and drops a "Your location" marker labelled with the
    /// reverse-geocoded address when one resolves. On failure, all state is
    /// left unchanged and the error surfaces for the UI to display.
    #[instrument(name = "Locate", level = "info", skip_all)]
    pub async fn on_locate(&self) -> Result<Coordinate, GeolocateError> {
        let timeout = self.engine.config().locate_timeout;
        let position = match tokio::time::timeout(timeout, self.locator.current_location()).await {
            Ok(result) => result?,
            Err(_elapsed) => return Err(GeolocateError::Timeout),
        };
        info!(%position, "location fix confirmed");

        self.user_location.lock().confirm(position);

        let zoom = self.engine.config().locate_zoom;
        *self.viewport.lock() = Viewport::new(position, zoom);
        self.engine.search(position, zoom).await;

        // Label the user marker with the address when one resolves; the
        // raw coordinates otherwise.
        let label = match self.provider.reverse_geocode(position).await {
            Ok(Some(address)) => address,
            Ok(None) => position.to_string(),
            Err(error) => {
                warn!(%error, "reverse geocode failed for the location marker");
                position.to_string()
            }
        };
        self.markers.add(position, "Your location", &label);

        Ok(position)
    }

    /// Commit a new viewport (pan/zoom). The next idle trigger searches
    /// there.
    pub fn set_viewport(&self, viewport: Viewport) {
        *self.viewport.lock() = viewport;
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        *self.viewport.lock()
    }

    #[must_use]
    pub fn user_location(&self) -> UserLocationState {
        *self.user_location.lock()
    }

    /// The engine behind this controller, for direct nearby searches.
    #[must_use]
    pub fn engine(&self) -> &Arc<ProximitySearchEngine<P, M>> {
        &self.engine
    }
}

/// Builder for [`MapController`].
pub struct MapControllerBuilder<P, M, L> {
    provider: Arc<P>,
    markers: Arc<M>,
    locator: Arc<L>,
    config: SearchConfig,
    viewport: Viewport,
}

impl<P, M, L> MapControllerBuilder<P, M, L>
where
    P: GeoProvider,
    M: MarkerStore,
    L: LocationSource,
{
    /// Override the search configuration.
    #[must_use]
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the initial viewport (defaults to the fallback center).
    #[must_use]
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn build(self) -> MapController<P, M, L> {
        let engine = Arc::new(ProximitySearchEngine::new(
            Arc::clone(&self.provider),
            Arc::clone(&self.markers),
            self.config,
        ));
        let viewport = Arc::new(Mutex::new(self.viewport));
        let user_location = Arc::new(Mutex::new(UserLocationState::new()));
        let router = QueryRouter::new(
            Arc::clone(&self.provider),
            Arc::clone(&engine),
            Arc::clone(&viewport),
            Arc::clone(&user_location),
        );
        MapController {
            provider: self.provider,
            markers: self.markers,
            locator: self.locator,
            engine,
            router,
            viewport,
            user_location,
        }
    }
}
