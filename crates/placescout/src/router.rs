//! Free-text query routing.
//!
//! [`QueryRouter`] classifies a raw query and selects a search path: a
//! location-anchored text search for "near me" queries, geocode-then-search
//! when the query looks like a place name, or a plain text search at the
//! current map center. First matching case wins.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    engine::ProximitySearchEngine,
    geo::Coordinate,
    markers::MarkerStore,
    provider::{GeoProvider, PlacePrediction, ProviderError},
    session::{UserLocationState, Viewport},
};

static NEAR_ME: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new("near me")
        .case_insensitive(true)
        .build()
        .expect("static pattern")
});

/// Why a routed query could not run.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A "near me" query arrived before the user confirmed their location.
    /// No provider call is made.
    #[error("location not confirmed; use the locate control before \"near me\" queries")]
    LocationNotConfirmed,
    /// The final text-search call failed. Earlier prediction/geocode
    /// failures fall back to a center-anchored search instead of erroring.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Which strategy [`QueryRouter::route`] selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPath {
    /// Anchored at the confirmed user location.
    NearMe,
    /// Anchored at a geocoded place name, after recentering the view.
    PlaceAnchored,
    /// Anchored at the current map center.
    CenterAnchored,
}

/// Outcome of a routed query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteReport {
    pub path: SearchPath,
    /// The coordinate the text search ran at.
    pub anchor: Coordinate,
    /// Markers emitted by the search.
    pub emitted: usize,
}

/// Classifies free-text queries and drives the shared direct text search.
pub struct QueryRouter<P, M> {
    provider: Arc<P>,
    engine: Arc<ProximitySearchEngine<P, M>>,
    viewport: Arc<Mutex<Viewport>>,
    user_location: Arc<Mutex<UserLocationState>>,
}

impl<P, M> QueryRouter<P, M>
where
    P: GeoProvider,
    M: MarkerStore,
{
    #[must_use]
    pub fn new(
        provider: Arc<P>,
        engine: Arc<ProximitySearchEngine<P, M>>,
        viewport: Arc<Mutex<Viewport>>,
        user_location: Arc<Mutex<UserLocationState>>,
    ) -> Self {
        Self {
            provider,
            engine,
            viewport,
            user_location,
        }
    }

    /// Route a raw free-text query to a search strategy.
    ///
    /// 1. Queries containing "near me" (case-insensitive) require a
    ///    confirmed user location; the phrase is stripped and the remainder
    ///    searched at that location. An empty remainder falls back to the
    ///    original query text.
    /// 2. Otherwise the single best autocomplete prediction is geocoded;
    ///    on success the map center is committed first (fixed city zoom),
    ///    then the search runs anchored there.
    /// 3. Without a usable prediction or geocode, the search runs at the
    ///    current map center.
    #[instrument(name = "Route Query", level = "debug", skip_all, fields(query))]
    pub async fn route(&self, query: &str) -> Result<RouteReport, RouteError> {
        let query = query.trim();

        if NEAR_ME.is_match(query) {
            let anchor = self
                .user_location
                .lock()
                .confirmed_coordinate()
                .ok_or(RouteError::LocationNotConfirmed)?;

            let cleaned = NEAR_ME.replace_all(query, "");
            let cleaned = cleaned.trim();
            let effective = if cleaned.is_empty() { query } else { cleaned };
            debug!(effective, "routing \"near me\" query to confirmed location");

            let emitted = self.engine.text_search(effective, anchor).await?;
            return Ok(RouteReport {
                path: SearchPath::NearMe,
                anchor,
                emitted,
            });
        }

        if let Some(prediction) = self.best_prediction(query).await
            && let Some(location) = self.geocode_prediction(&prediction).await
        {
            // Commit the center before the search goes out, so the rendered
            // view matches the anchor the results belong to.
            let zoom = self.engine.config().city_zoom;
            *self.viewport.lock() = Viewport::new(location, zoom);
            debug!(%location, "recentered onto predicted place");

            let emitted = self.engine.text_search(query, location).await?;
            return Ok(RouteReport {
                path: SearchPath::PlaceAnchored,
                anchor: location,
                emitted,
            });
        }

        self.center_search(query).await
    }

    async fn center_search(&self, query: &str) -> Result<RouteReport, RouteError> {
        let anchor = self.viewport.lock().center;
        let emitted = self.engine.text_search(query, anchor).await?;
        Ok(RouteReport {
            path: SearchPath::CenterAnchored,
            anchor,
            emitted,
        })
    }

    /// Best prediction for the query; provider failure reads as "no
    /// prediction" so the query still runs at the center.
    async fn best_prediction(&self, query: &str) -> Option<PlacePrediction> {
        match self.provider.autocomplete(query).await {
            Ok(prediction) => prediction,
            Err(error) => {
                warn!(%error, "autocomplete failed, falling back to center search");
                None
            }
        }
    }

    /// Geocode the prediction's description; NotFound and provider failure
    /// both fall back to a center-anchored search.
    async fn geocode_prediction(&self, prediction: &PlacePrediction) -> Option<Coordinate> {
        match self.provider.geocode(&prediction.description).await {
            Ok(Some(location)) => Some(location),
            Ok(None) => {
                debug!(
                    description = %prediction.description,
                    "prediction did not geocode"
                );
                None
            }
            Err(error) => {
                warn!(%error, "geocode failed, falling back to center search");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{config::SearchConfig, markers::VecMarkerStore, provider::PlaceResult};

    /// Provider that records text-search anchors together with the
    /// viewport committed at call time, to assert ordering.
    struct RecordingProvider {
        prediction: Option<PlacePrediction>,
        geocoded: Option<Coordinate>,
        viewport: Mutex<Option<Arc<Mutex<Viewport>>>>,
        text_calls: Mutex<Vec<(String, Coordinate, Viewport)>>,
        autocomplete_calls: Mutex<usize>,
    }

    impl RecordingProvider {
        fn new(prediction: Option<PlacePrediction>, geocoded: Option<Coordinate>) -> Self {
            Self {
                prediction,
                geocoded,
                viewport: Mutex::new(None),
                text_calls: Mutex::new(Vec::new()),
                autocomplete_calls: Mutex::new(0),
            }
        }

        fn attach_viewport(&self, viewport: Arc<Mutex<Viewport>>) {
            *self.viewport.lock() = Some(viewport);
        }

        fn text_calls(&self) -> Vec<(String, Coordinate, Viewport)> {
            self.text_calls.lock().clone()
        }
    }

    #[async_trait]
    impl GeoProvider for RecordingProvider {
        async fn geocode(&self, _address: &str) -> Result<Option<Coordinate>, ProviderError> {
            Ok(self.geocoded)
        }

        async fn reverse_geocode(
            &self,
            _coordinate: Coordinate,
        ) -> Result<Option<String>, ProviderError> {
            Ok(None)
        }

        async fn nearby_search(
            &self,
            _anchor: Coordinate,
            _radius_m: u32,
            _keyword: &str,
        ) -> Result<Vec<PlaceResult>, ProviderError> {
            Ok(Vec::new())
        }

        async fn text_search(
            &self,
            query: &str,
            anchor: Coordinate,
            _radius_m: u32,
        ) -> Result<Vec<PlaceResult>, ProviderError> {
            let committed = self
                .viewport
                .lock()
                .as_ref()
                .map_or_else(Viewport::default, |v| *v.lock());
            self.text_calls
                .lock()
                .push((query.to_owned(), anchor, committed));
            Ok(vec![PlaceResult::new(
                "r1",
                anchor,
                "result",
                "somewhere nearby",
            )])
        }

        async fn autocomplete(
            &self,
            _query: &str,
        ) -> Result<Option<PlacePrediction>, ProviderError> {
            *self.autocomplete_calls.lock() += 1;
            Ok(self.prediction.clone())
        }
    }

    struct Fixture {
        provider: Arc<RecordingProvider>,
        viewport: Arc<Mutex<Viewport>>,
        user_location: Arc<Mutex<UserLocationState>>,
        router: QueryRouter<RecordingProvider, VecMarkerStore>,
    }

    fn fixture(provider: RecordingProvider) -> Fixture {
        let provider = Arc::new(provider);
        let markers = Arc::new(VecMarkerStore::new());
        let engine = Arc::new(ProximitySearchEngine::new(
            Arc::clone(&provider),
            markers,
            SearchConfig::default(),
        ));
        let viewport = Arc::new(Mutex::new(Viewport::default()));
        let user_location = Arc::new(Mutex::new(UserLocationState::new()));
        provider.attach_viewport(Arc::clone(&viewport));
        let router = QueryRouter::new(
            Arc::clone(&provider),
            engine,
            Arc::clone(&viewport),
            Arc::clone(&user_location),
        );
        Fixture {
            provider,
            viewport,
            user_location,
            router,
        }
    }

    #[tokio::test]
    async fn test_near_me_requires_confirmed_location() {
        let fx = fixture(RecordingProvider::new(None, None));

        let result = fx.router.route("industrial parks near me").await;

        assert!(matches!(result, Err(RouteError::LocationNotConfirmed)));
        assert!(
            fx.provider.text_calls().is_empty(),
            "no provider call may be issued"
        );
        assert_eq!(*fx.provider.autocomplete_calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_near_me_searches_at_confirmed_location() {
        let fx = fixture(RecordingProvider::new(None, None));
        fx.user_location.lock().confirm(Coordinate::new(18.5, 73.8));

        let report = fx.router.route("industrial parks near me").await.unwrap();

        assert_eq!(report.path, SearchPath::NearMe);
        assert_eq!(report.anchor, Coordinate::new(18.5, 73.8));
        let calls = fx.provider.text_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "industrial parks");
        assert_eq!(calls[0].1, Coordinate::new(18.5, 73.8));
    }

    #[tokio::test]
    async fn test_near_me_strip_is_case_insensitive_and_global() {
        let fx = fixture(RecordingProvider::new(None, None));
        fx.user_location.lock().confirm(Coordinate::new(18.5, 73.8));

        let report = fx.router.route("cafes NEAR ME near me").await.unwrap();

        assert_eq!(report.path, SearchPath::NearMe);
        assert_eq!(fx.provider.text_calls()[0].0, "cafes");
    }

    #[tokio::test]
    async fn test_near_me_alone_falls_back_to_original_query() {
        let fx = fixture(RecordingProvider::new(None, None));
        fx.user_location.lock().confirm(Coordinate::new(18.5, 73.8));

        fx.router.route("near me").await.unwrap();

        // Stripping left nothing, so the original text is searched.
        assert_eq!(fx.provider.text_calls()[0].0, "near me");
    }

    #[tokio::test]
    async fn test_place_query_recenters_before_searching() {
        let geocoded = Coordinate::new(18.53, 73.85);
        let fx = fixture(RecordingProvider::new(
            Some(PlacePrediction {
                description: "Shivajinagar, Pune, Maharashtra, India".to_owned(),
            }),
            Some(geocoded),
        ));

        let report = fx.router.route("Shivajinagar").await.unwrap();

        assert_eq!(report.path, SearchPath::PlaceAnchored);
        assert_eq!(report.anchor, geocoded);

        let calls = fx.provider.text_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, geocoded, "search anchored at geocoded place");
        // The viewport was already committed when the search went out.
        assert_eq!(calls[0].2.center, geocoded);
        assert_eq!(calls[0].2.zoom, 13);
        assert_eq!(*fx.viewport.lock(), Viewport::new(geocoded, 13));
    }

    #[tokio::test]
    async fn test_no_prediction_falls_back_to_center() {
        let fx = fixture(RecordingProvider::new(None, None));

        let report = fx.router.route("blorptown").await.unwrap();

        assert_eq!(report.path, SearchPath::CenterAnchored);
        assert_eq!(report.anchor, Viewport::default().center);
        assert_eq!(*fx.provider.autocomplete_calls.lock(), 1);
    }

    #[tokio::test]
    async fn test_failed_geocode_falls_back_to_center() {
        let fx = fixture(RecordingProvider::new(
            Some(PlacePrediction {
                description: "Nowhere".to_owned(),
            }),
            None,
        ));

        let report = fx.router.route("Nowhere").await.unwrap();

        assert_eq!(report.path, SearchPath::CenterAnchored);
        // The viewport was never touched.
        assert_eq!(*fx.viewport.lock(), Viewport::default());
    }
}
