//! Proximity search orchestration.
//!
//! [`ProximitySearchEngine`] fans one nearby-search per configured keyword
//! out to the provider, merges the asynchronous responses into a bounded,
//! deduplicated set, and streams accepted places to the marker sink as each
//! response lands. It also hosts the direct text search the query router
//! shares between its paths.
//!
//! Acceptance (generation check, cap check, dedup insert, marker emit)
//! runs under a single session lock with no await points inside, so the
//! cross-keyword cap and the stale-response discard are exact invariants
//! rather than best-effort ones.

use std::sync::Arc;

use futures::future::join_all;
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::{
    config::SearchConfig,
    geo::Coordinate,
    markers::MarkerStore,
    policy::{SearchReach, reach_for_zoom},
    provider::{GeoProvider, ProviderError},
    session::SessionState,
};

/// Orchestrates multi-keyword nearby searches and direct text searches,
/// owning the search-session state (generation, dedup index, accepted
/// count).
pub struct ProximitySearchEngine<P, M> {
    provider: Arc<P>,
    markers: Arc<M>,
    config: SearchConfig,
    session: Mutex<SessionState>,
}

impl<P, M> ProximitySearchEngine<P, M>
where
    P: GeoProvider,
    M: MarkerStore,
{
    #[must_use]
    pub fn new(provider: Arc<P>, markers: Arc<M>, config: SearchConfig) -> Self {
        Self {
            provider,
            markers,
            config,
            session: Mutex::new(SessionState::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The current session generation. Bumps on every search start.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.session.lock().generation
    }

    /// Run one nearby-search session around `anchor` at `zoom`.
    ///
    /// Resets the dedup index and clears existing markers before any
    /// provider call goes out, then issues one keyword-scoped search per
    /// configured keyword concurrently. Accepted places stream to the
    /// marker sink as responses land, in provider order within each
    /// response, capped across all keywords by the zoom tier's limit.
    ///
    /// A keyword whose call fails is skipped with a warning; it never
    /// blocks the others. Returns the number of markers this session
    /// emitted.
    #[instrument(name = "Proximity Search", level = "debug", skip_all, fields(zoom))]
    pub async fn search(&self, anchor: Coordinate, zoom: i32) -> usize {
        let reach = reach_for_zoom(zoom);
        let generation = self.begin_session();
        debug!(
            radius_m = reach.radius_m,
            limit = reach.limit,
            keywords = self.config.keywords.len(),
            "starting nearby-search fan-out"
        );

        let runs = self
            .config
            .keywords
            .iter()
            .map(|keyword| self.run_keyword(generation, anchor, reach, keyword));
        let emitted: usize = join_all(runs).await.into_iter().sum();

        debug!(emitted, "nearby-search session settled");
        emitted
    }

    /// Direct text search, shared by all query-router paths.
    ///
    /// Clears existing markers, issues a single provider call, and emits at
    /// most the configured number of results in provider order. No dedup is
    /// applied: a single call, and the provider is assumed not to
    /// self-duplicate. Returns the number of markers emitted.
    #[instrument(name = "Text Search", level = "debug", skip_all, fields(query))]
    pub async fn text_search(
        &self,
        query: &str,
        anchor: Coordinate,
    ) -> Result<usize, ProviderError> {
        let generation = self.begin_session();
        let results = self
            .provider
            .text_search(query, anchor, self.config.text_search_radius_m)
            .await?;

        let session = self.session.lock();
        if session.generation != generation {
            debug!(query, "discarding stale text-search response");
            return Ok(0);
        }
        let mut emitted = 0;
        for place in results.iter().take(self.config.text_search_limit) {
            self.markers
                .add(place.coordinate, &place.display_name, &place.description);
            emitted += 1;
        }
        debug!(emitted, returned = results.len(), "text search settled");
        Ok(emitted)
    }

    /// Open a new session: bump the generation, reset dedup and count, and
    /// clear the sink, all under the session lock, so an in-flight
    /// acceptance from the previous session can never land between the
    /// clear and the bump.
    fn begin_session(&self) -> u64 {
        let mut session = self.session.lock();
        let generation = session.begin();
        self.markers.clear_all();
        generation
    }

    async fn run_keyword(
        &self,
        generation: u64,
        anchor: Coordinate,
        reach: SearchReach,
        keyword: &str,
    ) -> usize {
        let results = match self
            .provider
            .nearby_search(anchor, reach.radius_m, keyword)
            .await
        {
            Ok(results) => results,
            Err(error) => {
                // One keyword failing must not block the others.
                warn!(keyword, %error, "nearby search failed, skipping keyword");
                return 0;
            }
        };

        let mut session = self.session.lock();
        if session.generation != generation {
            debug!(keyword, "discarding stale nearby-search response");
            return 0;
        }

        let mut emitted = 0;
        for place in &results {
            if session.accepted >= reach.limit {
                break;
            }
            if !session.dedup.insert(&place.id) {
                continue;
            }
            session.accepted += 1;
            self.markers
                .add(place.coordinate, &place.display_name, &place.description);
            emitted += 1;
        }
        debug!(keyword, emitted, returned = results.len(), "keyword settled");
        emitted
    }
}
