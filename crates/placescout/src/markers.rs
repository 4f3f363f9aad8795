//! Marker sink capability and an in-memory implementation.
//!
//! The core treats the map widget's marker layer as a write-only sink:
//! accepted places stream into [`MarkerStore::add`] as provider responses
//! land, and a new search session starts with [`MarkerStore::clear_all`].

use parking_lot::Mutex;

use crate::geo::Coordinate;

/// A rendered marker, as the sink receives it.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
    pub description: String,
}

/// Render target for search results.
///
/// Implementations are driven from a single UI thread; calls are expected
/// to be cheap and non-blocking. The engine may invoke them while holding
/// its session lock, so implementations must not call back into the engine.
pub trait MarkerStore: Send + Sync {
    fn add(&self, coordinate: Coordinate, title: &str, description: &str);
    fn clear_all(&self);
}

/// In-memory marker store: the default sink for tests, examples, and
/// headless use.
#[derive(Debug, Default)]
pub struct VecMarkerStore {
    markers: Mutex<Vec<Marker>>,
}

impl VecMarkerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the markers currently in the store, in emit order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Marker> {
        self.markers.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.lock().is_empty()
    }
}

impl MarkerStore for VecMarkerStore {
    fn add(&self, coordinate: Coordinate, title: &str, description: &str) {
        self.markers.lock().push(Marker {
            coordinate,
            title: title.to_owned(),
            description: description.to_owned(),
        });
    }

    fn clear_all(&self) {
        self.markers.lock().clear();
    }
}
