//! Open-Meteo forecast API client
//!
//! Fetches current, hourly, and daily forecast data for a coordinate pair and
//! normalizes it into the flat display model: hourly columns truncated to the
//! first 24 hours, daily arrays reduced to their first element.

use chrono::{NaiveDateTime, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{CurrentConditions, DailySummary, HourlySeries};

/// Base URL for the Open-Meteo forecast API
const FORECAST_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Current-conditions variables requested from the API
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,wind_direction_10m,weather_code,is_day,apparent_temperature,precipitation,cloud_cover,pressure_msl,surface_pressure,wind_gusts_10m,uv_index,dew_point_2m,visibility,wet_bulb_temperature_2m,uv_index_clear_sky,sunshine_duration,precipitation_probability";

/// Hourly variables requested from the API
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code,uv_index,precipitation_probability";

/// Daily variables requested from the API
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,sunrise,sunset,uv_index_max,precipitation_sum,sunshine_duration";

/// Number of hourly entries kept after truncation
const HOURLY_WINDOW: usize = 24;

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The endpoint rejected the coordinates (HTTP 400)
    #[error("Invalid location name. Please try a different city name.")]
    BadRequest,

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Everything one forecast call produces, ready for the display bundle
#[derive(Debug, Clone)]
pub struct ForecastBundle {
    /// IANA timezone name resolved by the API (`timezone=auto`)
    pub timezone: String,
    /// UTC offset of that timezone in seconds
    pub utc_offset_seconds: i32,
    /// Whether it is currently daytime at the location
    pub is_day: bool,
    /// Current conditions
    pub current: CurrentConditions,
    /// Hourly columns, truncated to the first 24 hours
    pub hourly: HourlySeries,
    /// First-day summary
    pub daily: DailySummary,
}

/// Client for the Open-Meteo forecast API
#[derive(Debug, Clone, Default)]
pub struct ForecastClient {
    client: Client,
}

impl ForecastClient {
    /// Create a new ForecastClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new ForecastClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch forecast data for the given coordinates.
    ///
    /// Requests the explicit current/hourly/daily field lists with automatic
    /// timezone resolution and normalizes the parallel arrays.
    ///
    /// # Arguments
    /// * `lat` - Latitude coordinate
    /// * `lon` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok(ForecastBundle)` - normalized forecast data
    /// * `Err(ForecastError)` - if the request or parsing fails
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<ForecastBundle, ForecastError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone=auto",
            FORECAST_BASE_URL, lat, lon, CURRENT_FIELDS, HOURLY_FIELDS, DAILY_FIELDS
        );

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(ForecastError::BadRequest);
        }

        let text = response.text().await?;
        let api_response: OpenMeteoResponse = serde_json::from_str(&text)?;

        parse_response(api_response)
    }
}

/// Normalize the raw API response into a ForecastBundle
fn parse_response(response: OpenMeteoResponse) -> Result<ForecastBundle, ForecastError> {
    let current = &response.current;

    let conditions = CurrentConditions {
        temperature: current.temperature_2m,
        humidity: current.relative_humidity_2m,
        wind_speed: current.wind_speed_10m,
        wind_direction: current.wind_direction_10m,
        weather_code: current.weather_code,
        apparent_temperature: current.apparent_temperature,
        precipitation: current.precipitation,
        cloud_cover: current.cloud_cover,
        pressure_msl: current.pressure_msl,
        surface_pressure: current.surface_pressure,
        wind_gusts: current.wind_gusts_10m,
        uv_index: current.uv_index,
        dew_point: current.dew_point_2m,
        visibility: current.visibility,
        wet_bulb_temperature: current.wet_bulb_temperature_2m,
        uv_index_clear_sky: current.uv_index_clear_sky,
        sunshine_duration: current.sunshine_duration,
        precipitation_probability: current.precipitation_probability,
    };

    let hourly = parse_hourly(response.hourly)?;
    let daily = parse_daily(&response.daily)?;

    Ok(ForecastBundle {
        timezone: response.timezone,
        utc_offset_seconds: response.utc_offset_seconds,
        is_day: current.is_day == 1,
        current: conditions,
        hourly,
        daily,
    })
}

/// Parse the hourly arrays, validate alignment, and keep the first 24 entries
fn parse_hourly(hourly: HourlyBlock) -> Result<HourlySeries, ForecastError> {
    let len = hourly.time.len();
    if hourly.temperature_2m.len() != len
        || hourly.relative_humidity_2m.len() != len
        || hourly.wind_speed_10m.len() != len
        || hourly.weather_code.len() != len
        || hourly.uv_index.len() != len
        || hourly.precipitation_probability.len() != len
    {
        return Err(ForecastError::MissingField(
            "hourly arrays have inconsistent lengths".to_string(),
        ));
    }

    let keep = len.min(HOURLY_WINDOW);
    let time = hourly.time[..keep]
        .iter()
        .map(|s| parse_datetime(s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HourlySeries {
        time,
        temperature: hourly.temperature_2m[..keep].to_vec(),
        humidity: hourly.relative_humidity_2m[..keep].to_vec(),
        wind_speed: hourly.wind_speed_10m[..keep].to_vec(),
        weather_code: hourly.weather_code[..keep].to_vec(),
        uv_index: hourly.uv_index[..keep].to_vec(),
        precipitation_probability: hourly.precipitation_probability[..keep].to_vec(),
    })
}

/// Reduce the daily arrays to their first element
fn parse_daily(daily: &DailyBlock) -> Result<DailySummary, ForecastError> {
    let first = |values: &[f64], field: &str| {
        values
            .first()
            .copied()
            .ok_or_else(|| ForecastError::MissingField(field.to_string()))
    };

    let sunrise_str = daily
        .sunrise
        .first()
        .ok_or_else(|| ForecastError::MissingField("sunrise".to_string()))?;
    let sunset_str = daily
        .sunset
        .first()
        .ok_or_else(|| ForecastError::MissingField("sunset".to_string()))?;

    Ok(DailySummary {
        max_temp: first(&daily.temperature_2m_max, "temperature_2m_max")?,
        min_temp: first(&daily.temperature_2m_min, "temperature_2m_min")?,
        sunrise: parse_time(sunrise_str)?,
        sunset: parse_time(sunset_str)?,
        uv_index_max: first(&daily.uv_index_max, "uv_index_max")?,
        precipitation_sum: first(&daily.precipitation_sum, "precipitation_sum")?,
        sunshine_duration: first(&daily.sunshine_duration, "sunshine_duration")?,
    })
}

/// Parse a datetime string in ISO 8601 format (e.g., "2024-07-15T05:30")
fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .map_err(|_| ForecastError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Parse the time portion of an ISO 8601 datetime string (after the 'T')
fn parse_time(time_str: &str) -> Result<NaiveTime, ForecastError> {
    let time_part = time_str
        .split('T')
        .nth(1)
        .ok_or_else(|| ForecastError::InvalidTimeFormat(time_str.to_string()))?;

    NaiveTime::parse_from_str(time_part, "%H:%M")
        .map_err(|_| ForecastError::InvalidTimeFormat(time_str.to_string()))
}

/// Open-Meteo forecast API response structure
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    timezone: String,
    utc_offset_seconds: i32,
    current: CurrentBlock,
    hourly: HourlyBlock,
    daily: DailyBlock,
}

/// Current conditions block from the API
#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    weather_code: u8,
    is_day: u8,
    apparent_temperature: f64,
    precipitation: f64,
    cloud_cover: f64,
    pressure_msl: f64,
    surface_pressure: f64,
    wind_gusts_10m: f64,
    uv_index: f64,
    dew_point_2m: f64,
    visibility: f64,
    wet_bulb_temperature_2m: f64,
    uv_index_clear_sky: f64,
    sunshine_duration: f64,
    precipitation_probability: f64,
}

/// Hourly parallel arrays from the API
#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    relative_humidity_2m: Vec<f64>,
    wind_speed_10m: Vec<f64>,
    weather_code: Vec<u8>,
    uv_index: Vec<f64>,
    precipitation_probability: Vec<f64>,
}

/// Daily arrays from the API
#[derive(Debug, Deserialize)]
struct DailyBlock {
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
    uv_index_max: Vec<f64>,
    precipitation_sum: Vec<f64>,
    sunshine_duration: Vec<f64>,
}
