//! Unsplash photo search client
//!
//! Best-effort lookup of a representative city photo. Callers absorb every
//! error here: photo failures are never shown to the user and never affect
//! weather data.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{CityPhoto, PhotoAttribution};

/// Base URL for the Unsplash photo search endpoint
const UNSPLASH_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Errors that can occur when searching for a photo
#[derive(Debug, Error)]
pub enum PhotoError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The endpoint returned a non-success status
    #[error("Photo search returned status {0}")]
    BadStatus(reqwest::StatusCode),
}

/// Client for the Unsplash search endpoint
#[derive(Debug, Clone, Default)]
pub struct PhotoClient {
    client: Client,
}

impl PhotoClient {
    /// Create a new PhotoClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new PhotoClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Search for one landscape photo matching the query.
    ///
    /// # Returns
    /// * `Ok(Some(CityPhoto))` - a photo with attribution
    /// * `Ok(None)` - the search succeeded but matched nothing
    /// * `Err(PhotoError)` - the request or parsing failed
    pub async fn search(
        &self,
        query: &str,
        access_key: &str,
    ) -> Result<Option<CityPhoto>, PhotoError> {
        let response = self
            .client
            .get(UNSPLASH_SEARCH_URL)
            .query(&[
                ("query", query),
                ("client_id", access_key),
                ("orientation", "landscape"),
                ("per_page", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::BadStatus(status));
        }

        let text = response.text().await?;
        let api_response: SearchResponse = serde_json::from_str(&text)?;

        Ok(api_response
            .results
            .into_iter()
            .next()
            .map(PhotoResult::into_city_photo))
    }
}

/// Unsplash search response structure
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<PhotoResult>,
}

/// A single photo result from Unsplash
#[derive(Debug, Deserialize)]
struct PhotoResult {
    urls: PhotoUrls,
    user: PhotoUser,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
    username: String,
    links: UserLinks,
}

#[derive(Debug, Deserialize)]
struct UserLinks {
    html: String,
}

impl PhotoResult {
    fn into_city_photo(self) -> CityPhoto {
        CityPhoto {
            url: self.urls.regular,
            attribution: PhotoAttribution {
                name: self.user.name,
                username: self.user.username,
                profile_link: self.user.links.html,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample Unsplash search response with one result
    const ONE_RESULT: &str = r#"{
        "total": 4521,
        "total_pages": 4521,
        "results": [
            {
                "id": "hV8zLK7qLiA",
                "width": 5472,
                "height": 3648,
                "urls": {
                    "raw": "https://images.unsplash.com/photo-1?ixid=abc",
                    "full": "https://images.unsplash.com/photo-1?q=85",
                    "regular": "https://images.unsplash.com/photo-1?w=1080",
                    "small": "https://images.unsplash.com/photo-1?w=400"
                },
                "user": {
                    "id": "XF3tkF",
                    "name": "Jane Doe",
                    "username": "janedoe",
                    "links": {
                        "self": "https://api.unsplash.com/users/janedoe",
                        "html": "https://unsplash.com/@janedoe"
                    }
                }
            }
        ]
    }"#;

    const EMPTY_RESULTS: &str = r#"{"total": 0, "total_pages": 0, "results": []}"#;

    #[test]
    fn test_parse_photo_result() {
        let response: SearchResponse =
            serde_json::from_str(ONE_RESULT).expect("Failed to parse photo response");
        let photo = response
            .results
            .into_iter()
            .next()
            .map(PhotoResult::into_city_photo)
            .expect("Expected one photo");

        assert_eq!(photo.url, "https://images.unsplash.com/photo-1?w=1080");
        assert_eq!(photo.attribution.name, "Jane Doe");
        assert_eq!(photo.attribution.username, "janedoe");
        assert_eq!(photo.attribution.profile_link, "https://unsplash.com/@janedoe");
    }

    #[test]
    fn test_parse_empty_results() {
        let response: SearchResponse =
            serde_json::from_str(EMPTY_RESULTS).expect("Failed to parse empty response");
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_parse_missing_results_field() {
        // Error payloads from Unsplash omit the results array entirely
        let response: SearchResponse =
            serde_json::from_str(r#"{"errors": ["OAuth error"]}"#).expect("Failed to parse");
        assert!(response.results.is_empty());
    }
}
