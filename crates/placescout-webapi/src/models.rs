//! Wire models for the Places-style JSON web service.
//!
//! Every endpoint answers with an envelope carrying a `status` word plus a
//! payload. `OK` and `ZERO_RESULTS` are the two healthy outcomes; anything
//! else is a service-side failure.

use placescout::{Coordinate, PlacePrediction, PlaceResult};
use serde::Deserialize;

use crate::error::{Result, WebApiError};

/// Check an envelope status. Returns whether the payload carries results;
/// a status other than `OK`/`ZERO_RESULTS` is an error.
pub(crate) fn has_results(status: &str) -> Result<bool> {
    match status {
        "OK" => Ok(true),
        "ZERO_RESULTS" => Ok(false),
        other => Err(WebApiError::Status(other.to_owned())),
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(value: LatLng) -> Self {
        Self::new(value.lat, value.lng)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlacesResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<WirePlace>,
}

/// One place entry. Nearby search labels the surroundings as `vicinity`,
/// text search as `formatted_address`; either may be absent.
#[derive(Debug, Deserialize)]
pub(crate) struct WirePlace {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

impl From<WirePlace> for PlaceResult {
    fn from(value: WirePlace) -> Self {
        let description = value
            .vicinity
            .or(value.formatted_address)
            .unwrap_or_default();
        Self::new(
            value.place_id,
            value.geometry.location.into(),
            value.name,
            description,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AutocompleteResponse {
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<WirePrediction>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePrediction {
    pub description: String,
}

impl From<WirePrediction> for PlacePrediction {
    fn from(value: WirePrediction) -> Self {
        Self {
            description: value.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_results() {
        assert!(has_results("OK").unwrap());
        assert!(!has_results("ZERO_RESULTS").unwrap());
        assert!(matches!(
            has_results("OVER_QUERY_LIMIT"),
            Err(WebApiError::Status(status)) if status == "OVER_QUERY_LIMIT"
        ));
    }

    #[test]
    fn test_deserialize_nearby_response() {
        let body = r#"{
            "status": "OK",
            "results": [
                {
                    "place_id": "ChIJabc123",
                    "name": "Acme industrial estate",
                    "vicinity": "Shivajinagar, Pune",
                    "geometry": { "location": { "lat": 18.5314, "lng": 73.8446 } }
                }
            ]
        }"#;

        let response: PlacesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "OK");
        let place = PlaceResult::from(response.results.into_iter().next().unwrap());
        assert_eq!(place.id, "ChIJabc123");
        assert_eq!(place.display_name, "Acme industrial estate");
        assert_eq!(place.description, "Shivajinagar, Pune");
        assert!((place.coordinate.latitude - 18.5314).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_text_response_uses_formatted_address() {
        let body = r#"{
            "status": "OK",
            "results": [
                {
                    "place_id": "ChIJdef456",
                    "name": "Corner cafe",
                    "formatted_address": "FC Road, Pune, Maharashtra",
                    "geometry": { "location": { "lat": 18.52, "lng": 73.84 } }
                }
            ]
        }"#;

        let response: PlacesResponse = serde_json::from_str(body).unwrap();
        let place = PlaceResult::from(response.results.into_iter().next().unwrap());
        assert_eq!(place.description, "FC Road, Pune, Maharashtra");
    }

    #[test]
    fn test_deserialize_geocode_response() {
        let body = r#"{
            "status": "OK",
            "results": [
                {
                    "formatted_address": "Shivajinagar, Pune, Maharashtra, India",
                    "geometry": { "location": { "lat": 18.5314, "lng": 73.8446 } }
                }
            ]
        }"#;

        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 1);
        let coordinate = Coordinate::from(response.results[0].geometry.location);
        assert!((coordinate.longitude - 73.8446).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_zero_results_without_results_field() {
        let body = r#"{ "status": "ZERO_RESULTS" }"#;
        let response: PlacesResponse = serde_json::from_str(body).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_deserialize_autocomplete_response() {
        let body = r#"{
            "status": "OK",
            "predictions": [
                { "description": "Shivajinagar, Pune, Maharashtra, India" },
                { "description": "Shivaji Park, Mumbai, Maharashtra, India" }
            ]
        }"#;

        let response: AutocompleteResponse = serde_json::from_str(body).unwrap();
        let best = PlacePrediction::from(response.predictions.into_iter().next().unwrap());
        assert_eq!(best.description, "Shivajinagar, Pune, Maharashtra, India");
    }
}
