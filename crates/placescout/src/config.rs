//! Search behavior configuration.
//!
//! [`SearchConfig`] controls the keyword fan-out and the fixed parameters
//! of the text-search and locate paths. Use [`SearchConfigBuilder`] for an
//! ergonomic way to create configurations with sensible defaults.

use std::time::Duration;

/// Categories fanned out as one nearby-search call each per session.
const INDUSTRY_KEYWORDS: &[&str] = &[
    "industrial estate",
    "manufacturing",
    "industry",
    "manufacturer",
    "warehouse",
];

/// Configuration for search operations.
///
/// # Examples
///
/// ```rust
/// use placescout::SearchConfig;
///
/// let config = SearchConfig::builder()
///     .keywords(["cafe", "restaurant"])
///     .text_search_limit(10)
///     .build();
/// assert_eq!(config.keywords.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Category keywords, one concurrent nearby-search call each.
    pub keywords: Vec<String>,
    /// Radius for direct text searches, in meters.
    pub text_search_radius_m: u32,
    /// Cap on emitted text-search results.
    pub text_search_limit: usize,
    /// Zoom committed when recentering onto a geocoded place name.
    pub city_zoom: i32,
    /// Zoom committed after a successful locate.
    pub locate_zoom: i32,
    /// Bounded wait for a geolocation fix.
    pub locate_timeout: Duration,
}

impl SearchConfig {
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keywords: INDUSTRY_KEYWORDS.iter().map(ToString::to_string).collect(),
            text_search_radius_m: 15_000,
            text_search_limit: 30,
            city_zoom: 13,
            locate_zoom: 15,
            locate_timeout: Duration::from_secs(20),
        }
    }
}

/// Builder for [`SearchConfig`] with ergonomic defaults.
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Create a new builder with the default (industrial) keyword set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the keyword list.
    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single keyword.
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.keywords.push(keyword.into());
        self
    }

    /// Set the direct text-search radius in meters.
    #[must_use]
    pub fn text_search_radius_m(mut self, radius_m: u32) -> Self {
        self.config.text_search_radius_m = radius_m;
        self
    }

    /// Set the cap on emitted text-search results (clamped to at least 1).
    #[must_use]
    pub fn text_search_limit(mut self, limit: usize) -> Self {
        self.config.text_search_limit = limit.max(1);
        self
    }

    /// Set the zoom committed when recentering onto a geocoded place.
    #[must_use]
    pub fn city_zoom(mut self, zoom: i32) -> Self {
        self.config.city_zoom = zoom;
        self
    }

    /// Set the zoom committed after a successful locate.
    #[must_use]
    pub fn locate_zoom(mut self, zoom: i32) -> Self {
        self.config.locate_zoom = zoom;
        self
    }

    /// Set the bounded wait for a geolocation fix.
    #[must_use]
    pub fn locate_timeout(mut self, timeout: Duration) -> Self {
        self.config.locate_timeout = timeout;
        self
    }

    /// Build the final configuration.
    #[must_use]
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
