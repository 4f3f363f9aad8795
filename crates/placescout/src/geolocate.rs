//! User geolocation capability.
//!
//! The device's positioning stack sits behind [`LocationSource`]. The
//! controller bounds the wait with a timeout and surfaces failures as
//! recoverable [`GeolocateError`]s; no failure mutates search or location
//! state.

use async_trait::async_trait;
use thiserror::Error;

use crate::geo::Coordinate;

/// Why a user-initiated location request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocateError {
    /// The device has no positioning capability.
    #[error("geolocation is not available on this device")]
    Unavailable,
    /// The user or platform denied the request.
    #[error("geolocation permission was denied")]
    Denied,
    /// No fix arrived within the bounded wait.
    #[error("geolocation request timed out")]
    Timeout,
}

/// One-shot position fix.
///
/// `current_location` may hang indefinitely on a misbehaving platform;
/// callers bound the wait (the controller uses its configured timeout and
/// maps expiry to [`GeolocateError::Timeout`]).
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_location(&self) -> Result<Coordinate, GeolocateError>;
}
