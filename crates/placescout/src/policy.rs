//! Zoom-dependent search reach.
//!
//! Maps the map widget's integer zoom level onto the radius and result cap
//! used by a nearby-search session. Wide views get fewer, farther markers
//! to avoid clutter; close views get more, nearer ones for detail.

/// Radius and result cap applied to one nearby-search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReach {
    /// Search radius in meters.
    pub radius_m: u32,
    /// Cross-keyword cap on accepted results.
    pub limit: usize,
}

/// Discrete zoom bucket.
///
/// Tiers are ordered and contiguous: every integer zoom maps to exactly one
/// tier, and each tier maps to exactly one [`SearchReach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ZoomTier {
    /// Zoom 11 and below: regional overview.
    Region,
    /// Zoom 12-13: district view.
    District,
    /// Zoom 14-15: locality view.
    Locality,
    /// Zoom 16 and above: street view.
    Street,
}

impl ZoomTier {
    /// Bucket an integer zoom level. Total over all of `i32`.
    #[must_use]
    pub const fn for_zoom(zoom: i32) -> Self {
        if zoom <= 11 {
            Self::Region
        } else if zoom <= 13 {
            Self::District
        } else if zoom <= 15 {
            Self::Locality
        } else {
            Self::Street
        }
    }

    /// The radius/limit pair for this tier.
    #[must_use]
    pub const fn reach(self) -> SearchReach {
        match self {
            Self::Region => SearchReach {
                radius_m: 20_000,
                limit: 10,
            },
            Self::District => SearchReach {
                radius_m: 12_000,
                limit: 20,
            },
            Self::Locality => SearchReach {
                radius_m: 6_000,
                limit: 40,
            },
            Self::Street => SearchReach {
                radius_m: 3_000,
                limit: 80,
            },
        }
    }
}

/// Resolve the search reach for an integer zoom level.
///
/// Pure and total: there are no error cases, every zoom maps to a tier.
#[must_use]
pub const fn reach_for_zoom(zoom: i32) -> SearchReach {
    ZoomTier::for_zoom(zoom).reach()
}
