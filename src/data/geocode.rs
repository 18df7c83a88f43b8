//! Open-Meteo geocoding API client
//!
//! Resolves free-text city names to coordinates and administrative metadata.
//! Used in two modes: autocomplete suggestions (failures absorbed, never shown
//! to the user) and best-match lookup for a submitted search (count of 1).

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::Location;

/// Base URL for the Open-Meteo geocoding search endpoint
const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Maximum number of autocomplete suggestions to request
const SUGGESTION_LIMIT: u8 = 5;

/// Queries shorter than this (after trimming) skip the network entirely
const MIN_QUERY_CHARS: usize = 2;

/// Errors that can occur when resolving a location
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The endpoint rejected the query (HTTP 400)
    #[error("Invalid location name. Please try a different city name.")]
    BadRequest,
}

/// Client for the Open-Meteo geocoding search endpoint
#[derive(Debug, Clone, Default)]
pub struct GeocodeClient {
    client: Client,
}

impl GeocodeClient {
    /// Create a new GeocodeClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new GeocodeClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch autocomplete suggestions for a partial query.
    ///
    /// Skips the network call entirely when the trimmed query is shorter than
    /// two characters. Any transport or decode failure yields an empty set;
    /// autocomplete failures are never surfaced to the user.
    pub async fn suggest(&self, query: &str) -> Vec<Location> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }
        self.search(trimmed, SUGGESTION_LIMIT).await.unwrap_or_default()
    }

    /// Resolve a submitted city name to its single best match.
    ///
    /// # Returns
    /// * `Ok(Some(Location))` - the best-matching location
    /// * `Ok(None)` - the endpoint returned zero results
    /// * `Err(GeocodeError)` - the request or parsing failed
    pub async fn best_match(&self, city: &str) -> Result<Option<Location>, GeocodeError> {
        let mut results = self.search(city, 1).await?;
        if results.is_empty() {
            Ok(None)
        } else {
            Ok(Some(results.remove(0)))
        }
    }

    /// Query the geocoding search endpoint
    async fn search(&self, name: &str, count: u8) -> Result<Vec<Location>, GeocodeError> {
        let count = count.to_string();
        let response = self
            .client
            .get(GEOCODING_BASE_URL)
            .query(&[
                ("name", name),
                ("count", count.as_str()),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(GeocodeError::BadRequest);
        }

        let text = response.text().await?;
        let api_response: GeocodingResponse = serde_json::from_str(&text)?;

        Ok(api_response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(GeocodingResult::into_location)
            .collect())
    }
}

/// Geocoding API response structure
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    /// Absent entirely when the query has no matches
    results: Option<Vec<GeocodingResult>>,
}

/// A single geocoding candidate from the API
#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl GeocodingResult {
    fn into_location(self) -> Location {
        Location {
            name: self.name,
            admin1: self.admin1,
            country: self.country,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample geocoding response with two candidates
    const TWO_RESULTS: &str = r#"{
        "results": [
            {
                "id": 2988507,
                "name": "Paris",
                "latitude": 48.85341,
                "longitude": 2.3488,
                "country_code": "FR",
                "timezone": "Europe/Paris",
                "country": "France",
                "admin1": "Île-de-France"
            },
            {
                "id": 4717560,
                "name": "Paris",
                "latitude": 33.66094,
                "longitude": -95.55551,
                "country_code": "US",
                "timezone": "America/Chicago",
                "country": "United States",
                "admin1": "Texas"
            }
        ],
        "generationtime_ms": 0.93
    }"#;

    /// Zero-match responses omit the results field entirely
    const NO_RESULTS: &str = r#"{"generationtime_ms": 0.35}"#;

    #[test]
    fn test_parse_candidates() {
        let response: GeocodingResponse =
            serde_json::from_str(TWO_RESULTS).expect("Failed to parse geocoding response");
        let locations: Vec<Location> = response
            .results
            .unwrap()
            .into_iter()
            .map(GeocodingResult::into_location)
            .collect();

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].name, "Paris");
        assert_eq!(locations[0].admin1.as_deref(), Some("Île-de-France"));
        assert_eq!(locations[0].country.as_deref(), Some("France"));
        assert!((locations[0].latitude - 48.85341).abs() < 0.0001);
        assert!((locations[0].longitude - 2.3488).abs() < 0.0001);
        assert_eq!(locations[1].admin1.as_deref(), Some("Texas"));
    }

    #[test]
    fn test_parse_zero_matches() {
        let response: GeocodingResponse =
            serde_json::from_str(NO_RESULTS).expect("Failed to parse empty response");
        assert!(response.results.is_none());
    }

    #[test]
    fn test_parse_missing_optional_fields() {
        let sparse = r#"{
            "results": [
                {"name": "Somewhere", "latitude": 1.0, "longitude": 2.0}
            ]
        }"#;
        let response: GeocodingResponse =
            serde_json::from_str(sparse).expect("Failed to parse sparse result");
        let location = response
            .results
            .unwrap()
            .remove(0)
            .into_location();
        assert!(location.admin1.is_none());
        assert!(location.country.is_none());
    }

    #[tokio::test]
    async fn test_suggest_skips_short_queries() {
        // Queries under two trimmed characters never hit the network, so this
        // resolves immediately even with no connectivity.
        let client = GeocodeClient::new();
        assert!(client.suggest("").await.is_empty());
        assert!(client.suggest("p").await.is_empty());
        assert!(client.suggest("  p  ").await.is_empty());
    }

    #[test]
    fn test_bad_request_message_is_generic() {
        let err = GeocodeError::BadRequest;
        assert_eq!(
            err.to_string(),
            "Invalid location name. Please try a different city name."
        );
    }
}
