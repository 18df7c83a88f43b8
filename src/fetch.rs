//! Background fetch orchestration
//!
//! Searches and suggestion lookups run on spawned tasks and report back over a
//! tokio mpsc channel. Every request carries a sequence number; the app only
//! applies the message whose sequence matches its latest request, so a slow
//! response from an earlier search can never overwrite newer state.
//!
//! The primary pipeline is staged: geocode the city to its single best match,
//! then fetch the forecast for those coordinates. The photo lookup runs only
//! after both stages succeed and its failures are absorbed into `None`,
//! including the case where no API credential is configured.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::data::{
    CityPhoto, Dashboard, ForecastClient, ForecastError, GeocodeClient, GeocodeError, Location,
    PhotoClient,
};

/// Fallback shown when an underlying error has no message of its own
const GENERIC_FAILURE: &str = "Failed to fetch weather data";

/// Errors from the primary search pipeline
///
/// Photo failures are not represented here: they are absorbed before they can
/// become errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Geocoding returned zero results for the search term
    #[error("Location \"{0}\" not found. Please try a different city name.")]
    NotFound(String),

    /// Stage-1 geocoding failed
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// Stage-2 forecast fetch failed
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

impl FetchError {
    /// The message shown to the user for this failure
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

/// Messages sent from background fetch tasks to the app
#[derive(Debug)]
pub enum FetchMessage {
    /// Autocomplete suggestions are ready
    Suggestions { seq: u64, locations: Vec<Location> },
    /// A search finished successfully
    Loaded {
        seq: u64,
        dashboard: Box<Dashboard>,
        photo: Option<CityPhoto>,
    },
    /// A search failed; `message` is already user-facing
    Failed { seq: u64, message: String },
}

/// Spawns fetch tasks and hands their results to the app over a channel
#[derive(Debug, Clone)]
pub struct Fetcher {
    geocode: GeocodeClient,
    forecast: ForecastClient,
    photo: PhotoClient,
    photo_key: Option<String>,
    tx: mpsc::Sender<FetchMessage>,
}

impl Fetcher {
    /// Creates a Fetcher and the receiving end of its message channel.
    ///
    /// # Arguments
    /// * `photo_key` - Unsplash access key; `None` disables photo lookup
    pub fn new(photo_key: Option<String>) -> (Self, mpsc::Receiver<FetchMessage>) {
        let (tx, rx) = mpsc::channel(32);
        let fetcher = Self {
            geocode: GeocodeClient::new(),
            forecast: ForecastClient::new(),
            photo: PhotoClient::new(),
            photo_key,
            tx,
        };
        (fetcher, rx)
    }

    /// Spawns an autocomplete lookup for a partial query
    pub fn spawn_suggestions(&self, seq: u64, query: String) {
        let client = self.geocode.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let locations = client.suggest(&query).await;
            let _ = tx.send(FetchMessage::Suggestions { seq, locations }).await;
        });
    }

    /// Spawns the staged search pipeline for a submitted city name
    pub fn spawn_search(&self, seq: u64, city: String) {
        let geocode = self.geocode.clone();
        let forecast = self.forecast.clone();
        let photo_client = self.photo.clone();
        let photo_key = self.photo_key.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let message = match fetch_dashboard(&geocode, &forecast, &city).await {
                Ok(dashboard) => {
                    let photo =
                        fetch_photo(&photo_client, photo_key.as_deref(), &dashboard.location).await;
                    FetchMessage::Loaded {
                        seq,
                        dashboard: Box::new(dashboard),
                        photo,
                    }
                }
                Err(err) => FetchMessage::Failed {
                    seq,
                    message: err.user_message(),
                },
            };
            let _ = tx.send(message).await;
        });
    }
}

/// Runs the two-stage pipeline: geocode to the best match, then fetch the
/// forecast for its coordinates. Stage 2 never runs when stage 1 fails.
pub async fn fetch_dashboard(
    geocode: &GeocodeClient,
    forecast: &ForecastClient,
    city: &str,
) -> Result<Dashboard, FetchError> {
    let location = geocode
        .best_match(city)
        .await?
        .ok_or_else(|| FetchError::NotFound(city.to_string()))?;

    let bundle = forecast.fetch(location.latitude, location.longitude).await?;

    Ok(Dashboard {
        location,
        timezone: bundle.timezone,
        utc_offset_seconds: bundle.utc_offset_seconds,
        is_day: bundle.is_day,
        current: bundle.current,
        hourly: bundle.hourly,
        daily: bundle.daily,
    })
}

/// Best-effort photo lookup keyed by "<city> <country> city".
///
/// Returns `None` when no key is configured, when the search errors, or when
/// nothing matches; none of those outcomes reach the user.
pub async fn fetch_photo(
    client: &PhotoClient,
    access_key: Option<&str>,
    location: &Location,
) -> Option<CityPhoto> {
    let key = access_key?;
    let query = photo_query(location);
    client.search(&query, key).await.ok().flatten()
}

/// Builds the photo search query for a location
fn photo_query(location: &Location) -> String {
    match location.country.as_deref().filter(|c| !c.is_empty()) {
        Some(country) => format!("{} {} city", location.name, country),
        None => format!("{} city", location.name),
    }
}
