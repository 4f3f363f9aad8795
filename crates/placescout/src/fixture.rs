//! Canned in-memory implementations of the capability traits.
//!
//! [`FixtureProvider`] serves searches from a fixed list of places and
//! geocode entries, and [`FixtureLocator`] answers location requests with a
//! preset outcome. They back the examples, the doctests, and headless use;
//! no network is involved.

use async_trait::async_trait;

use crate::{
    geo::Coordinate,
    geolocate::{GeolocateError, LocationSource},
    provider::{GeoProvider, PlacePrediction, PlaceResult, ProviderError},
};

/// How close a coordinate must be to a geocode entry for reverse geocoding
/// to consider it a match, in meters.
const REVERSE_GEOCODE_RADIUS_M: f64 = 1_000.0;

/// A [`GeoProvider`] serving from fixed in-memory data.
///
/// Matching is deliberately simple: keyword and text searches are
/// radius-bounded, case-insensitive containment matches over a place's name
/// and description, returned in insertion order; geocoding is a
/// case-insensitive name match; autocomplete is a prefix match over the
/// geocode entries.
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    places: Vec<PlaceResult>,
    geocodes: Vec<(String, Coordinate)>,
}

impl FixtureProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place served by nearby and text searches.
    #[must_use]
    pub fn with_place(mut self, place: PlaceResult) -> Self {
        self.places.push(place);
        self
    }

    /// Add several places at once.
    #[must_use]
    pub fn with_places(mut self, places: impl IntoIterator<Item = PlaceResult>) -> Self {
        self.places.extend(places);
        self
    }

    /// Add a named geocode entry, served by geocoding, reverse geocoding
    /// and autocomplete.
    #[must_use]
    pub fn with_geocode(mut self, name: impl Into<String>, coordinate: Coordinate) -> Self {
        self.geocodes.push((name.into(), coordinate));
        self
    }

    fn matching_places(&self, anchor: Coordinate, radius_m: u32, needle: &str) -> Vec<PlaceResult> {
        let needle = needle.to_lowercase();
        self.places
            .iter()
            .filter(|place| place.coordinate.distance_meters(anchor) <= f64::from(radius_m))
            .filter(|place| {
                place.display_name.to_lowercase().contains(&needle)
                    || place.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl GeoProvider for FixtureProvider {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        Ok(self
            .geocodes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(address))
            .map(|(_, coordinate)| *coordinate))
    }

    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, ProviderError> {
        Ok(self
            .geocodes
            .iter()
            .find(|(_, entry)| entry.distance_meters(coordinate) <= REVERSE_GEOCODE_RADIUS_M)
            .map(|(name, _)| name.clone()))
    }

    async fn nearby_search(
        &self,
        anchor: Coordinate,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        Ok(self.matching_places(anchor, radius_m, keyword))
    }

    async fn text_search(
        &self,
        query: &str,
        anchor: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        Ok(self.matching_places(anchor, radius_m, query))
    }

    async fn autocomplete(&self, query: &str) -> Result<Option<PlacePrediction>, ProviderError> {
        let query = query.to_lowercase();
        Ok(self
            .geocodes
            .iter()
            .find(|(name, _)| name.to_lowercase().starts_with(&query))
            .map(|(name, _)| PlacePrediction {
                description: name.clone(),
            }))
    }
}

/// A [`LocationSource`] that answers with a preset outcome.
#[derive(Debug, Clone, Copy)]
pub struct FixtureLocator {
    outcome: Result<Coordinate, GeolocateError>,
}

impl FixtureLocator {
    /// A locator that always succeeds at `coordinate`.
    #[must_use]
    pub const fn at(coordinate: Coordinate) -> Self {
        Self {
            outcome: Ok(coordinate),
        }
    }

    /// A locator that always fails with `error`.
    #[must_use]
    pub const fn failing(error: GeolocateError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

#[async_trait]
impl LocationSource for FixtureLocator {
    async fn current_location(&self) -> Result<Coordinate, GeolocateError> {
        self.outcome
    }
}
