//! Geographic primitives shared across the crate.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used for great-circle distances.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 point in floating-point degrees.
///
/// Coordinates are immutable once obtained from a provider or a location
/// fix; every API in this crate passes them by value.
///
/// # Examples
///
/// ```rust
/// use placescout::Coordinate;
///
/// let pune = Coordinate::new(18.5204, 73.8567);
/// let mumbai = Coordinate::new(19.0760, 72.8777);
/// let km = pune.distance_meters(mumbai) / 1000.0;
/// assert!(km > 100.0 && km < 130.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle (haversine) distance to `other`, in meters.
    #[must_use]
    pub fn distance_meters(&self, other: Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let p = Coordinate::new(18.5204, 73.8567);
        assert_eq!(p.distance_meters(p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(18.5204, 73.8567);
        let b = Coordinate::new(18.5310, 73.8446);
        let forward = a.distance_meters(b);
        let backward = b.distance_meters(a);
        assert!((forward - backward).abs() < 1e-6);
    }

    #[test]
    fn test_known_distance() {
        // Pune railway station to Shivajinagar is roughly 2.5 km.
        let station = Coordinate::new(18.5286, 73.8742);
        let shivajinagar = Coordinate::new(18.5314, 73.8446);
        let d = station.distance_meters(shivajinagar);
        assert!(d > 2_000.0 && d < 4_000.0, "unexpected distance: {d}");
    }

    #[test]
    fn test_display_rounds_to_four_places() {
        let p = Coordinate::new(18.52041234, 73.85670001);
        assert_eq!(p.to_string(), "18.5204, 73.8567");
    }
}
