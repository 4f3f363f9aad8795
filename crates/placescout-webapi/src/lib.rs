//! HTTP [`GeoProvider`] adapter for placescout.
//!
//! [`WebApiProvider`] speaks a Places-style JSON web service: geocoding,
//! reverse geocoding, keyword nearby search, free-text search, and
//! autocomplete, each a GET endpoint answering an envelope with a `status`
//! word. Transport failures and non-OK statuses map onto
//! [`placescout::ProviderError`], so the core's partial-failure policy
//! applies unchanged.
//!
//! # Examples
//!
//! ```rust,no_run
//! use placescout::{Coordinate, GeoProvider};
//! use placescout_webapi::WebApiProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = WebApiProvider::new("my-api-key");
//! let places = provider
//!     .nearby_search(Coordinate::new(18.5204, 73.8567), 6_000, "warehouse")
//!     .await?;
//! println!("found {} places", places.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use placescout::{Coordinate, GeoProvider, PlacePrediction, PlaceResult, ProviderError};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

pub mod error;
mod models;

pub use error::WebApiError;
use models::{AutocompleteResponse, GeocodeResponse, PlacesResponse, has_results};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// A [`GeoProvider`] backed by a Places-style web service.
#[derive(Debug, Clone)]
pub struct WebApiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WebApiProvider {
    /// Create a provider against the default service endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).build()
    }

    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> WebApiProviderBuilder {
        WebApiProviderBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            client: None,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, WebApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{path}", self.base_url);
        debug!(%url, "issuing provider request");
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    fn format_latlng(coordinate: Coordinate) -> String {
        format!("{},{}", coordinate.latitude, coordinate.longitude)
    }
}

#[async_trait]
impl GeoProvider for WebApiProvider {
    #[instrument(name = "Geocode", level = "debug", skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        let response: GeocodeResponse = self
            .get_json("geocode/json", &[("address", address.to_owned())])
            .await?;
        if !has_results(&response.status)? {
            return Ok(None);
        }
        Ok(response
            .results
            .into_iter()
            .next()
            .map(|result| result.geometry.location.into()))
    }

    #[instrument(name = "Reverse Geocode", level = "debug", skip(self))]
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, ProviderError> {
        let response: GeocodeResponse = self
            .get_json(
                "geocode/json",
                &[("latlng", Self::format_latlng(coordinate))],
            )
            .await?;
        if !has_results(&response.status)? {
            return Ok(None);
        }
        Ok(response
            .results
            .into_iter()
            .next()
            .map(|result| result.formatted_address))
    }

    #[instrument(name = "Nearby Search", level = "debug", skip(self, anchor))]
    async fn nearby_search(
        &self,
        anchor: Coordinate,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        let response: PlacesResponse = self
            .get_json(
                "place/nearbysearch/json",
                &[
                    ("location", Self::format_latlng(anchor)),
                    ("radius", radius_m.to_string()),
                    ("keyword", keyword.to_owned()),
                ],
            )
            .await?;
        if !has_results(&response.status)? {
            return Ok(Vec::new());
        }
        Ok(response.results.into_iter().map(Into::into).collect())
    }

    #[instrument(name = "Text Search", level = "debug", skip(self, anchor))]
    async fn text_search(
        &self,
        query: &str,
        anchor: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        let response: PlacesResponse = self
            .get_json(
                "place/textsearch/json",
                &[
                    ("query", query.to_owned()),
                    ("location", Self::format_latlng(anchor)),
                    ("radius", radius_m.to_string()),
                ],
            )
            .await?;
        if !has_results(&response.status)? {
            return Ok(Vec::new());
        }
        Ok(response.results.into_iter().map(Into::into).collect())
    }

    #[instrument(name = "Autocomplete", level = "debug", skip(self))]
    async fn autocomplete(&self, query: &str) -> Result<Option<PlacePrediction>, ProviderError> {
        let response: AutocompleteResponse = self
            .get_json(
                "place/autocomplete/json",
                &[
                    ("input", query.to_owned()),
                    ("types", "geocode".to_owned()),
                ],
            )
            .await?;
        if !has_results(&response.status)? {
            return Ok(None);
        }
        Ok(response.predictions.into_iter().next().map(Into::into))
    }
}

/// Builder for [`WebApiProvider`].
#[derive(Debug, Clone)]
pub struct WebApiProviderBuilder {
    api_key: String,
    base_url: String,
    client: Option<reqwest::Client>,
}

impl WebApiProviderBuilder {
    /// Point the provider at a different service root, e.g. a proxy or a
    /// test server.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Supply a preconfigured HTTP client (timeouts, proxies).
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    #[must_use]
    pub fn build(self) -> WebApiProvider {
        WebApiProvider {
            client: self.client.unwrap_or_default(),
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            api_key: self.api_key,
        }
    }
}
