//! Per-search-session bookkeeping.
//!
//! A search session spans one batch of concurrently-outstanding provider
//! calls: it is opened when a new search is initiated and superseded by the
//! next one. This module holds the pieces of state that outlive individual
//! provider calls: the dedup set of already-surfaced place ids, the
//! generation stamp used to discard stale asynchronous completions, the
//! committed viewport, and the explicit user-location state gating
//! "near me" queries.

use ahash::AHashSet;

use crate::geo::Coordinate;

/// Tracks which place ids have already been materialized as markers in the
/// current search session.
///
/// Membership checks interleave with multiple asynchronous keyword queries
/// completing in any order; callers serialize access (the engine keeps the
/// index behind its session lock).
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: AHashSet<String>,
}

impl DedupIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything seen so far. Called before each new session.
    pub fn reset(&mut self) {
        self.seen.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Record `id` as surfaced. Returns `false` if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        self.seen.insert(id.to_owned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Mutable state shared by all in-flight keyword queries of one session.
///
/// Owned by the engine and mutated only under its session lock, which is
/// what makes the cross-keyword cap and the generation discard exact.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub generation: u64,
    pub dedup: DedupIndex,
    pub accepted: usize,
}

impl SessionState {
    /// Open a new session: bump the generation and clear the dedup set and
    /// the accepted count. Returns the generation stamp that in-flight
    /// provider calls of the new session carry.
    pub(crate) fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.dedup.reset();
        self.accepted = 0;
        self.generation
    }
}

/// The committed map viewport: the anchor nearby searches run at and the
/// center text searches fall back to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: i32,
}

impl Viewport {
    #[must_use]
    pub const fn new(center: Coordinate, zoom: i32) -> Self {
        Self { center, zoom }
    }
}

impl Default for Viewport {
    /// Fallback view over Pune at district zoom, used until the user pans
    /// or locates.
    fn default() -> Self {
        Self::new(Coordinate::new(18.5204, 73.8567), 13)
    }
}

/// The "near me" anchor.
///
/// `confirmed` becomes true only after an explicit, successful,
/// user-initiated location request; it is never derived from passive map
/// state. Unconfirmed state yields no coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserLocationState {
    coordinate: Option<Coordinate>,
    confirmed: bool,
}

impl UserLocationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful user-initiated fix.
    pub fn confirm(&mut self, coordinate: Coordinate) {
        self.coordinate = Some(coordinate);
        self.confirmed = true;
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// The confirmed coordinate, if the user has confirmed one.
    #[must_use]
    pub fn confirmed_coordinate(&self) -> Option<Coordinate> {
        if self.confirmed { self.coordinate } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_insert_and_contains() {
        let mut dedup = DedupIndex::new();
        assert!(!dedup.contains("a"));
        assert!(dedup.insert("a"));
        assert!(dedup.contains("a"));
        assert!(!dedup.insert("a"), "second insert must report a duplicate");
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_dedup_reset() {
        let mut dedup = DedupIndex::new();
        dedup.insert("a");
        dedup.insert("b");
        dedup.reset();
        assert!(dedup.is_empty());
        assert!(dedup.insert("a"), "reset must forget prior ids");
    }

    #[test]
    fn test_session_begin_is_monotonic() {
        let mut session = SessionState::default();
        let first = session.begin();
        session.dedup.insert("x");
        session.accepted = 7;
        let second = session.begin();
        assert!(second > first);
        assert_eq!(session.accepted, 0);
        assert!(session.dedup.is_empty());
    }

    #[test]
    fn test_user_location_gating() {
        let mut state = UserLocationState::new();
        assert!(!state.is_confirmed());
        assert_eq!(state.confirmed_coordinate(), None);

        state.confirm(Coordinate::new(18.5, 73.8));
        assert!(state.is_confirmed());
        assert_eq!(
            state.confirmed_coordinate(),
            Some(Coordinate::new(18.5, 73.8))
        );
    }

    #[test]
    fn test_default_viewport_is_fallback_center() {
        let viewport = Viewport::default();
        assert_eq!(viewport.zoom, 13);
        assert!((viewport.center.latitude - 18.5204).abs() < 1e-9);
        assert!((viewport.center.longitude - 73.8567).abs() < 1e-9);
    }
}
