//! Core data models for the city weather dashboard
//!
//! This module contains the display-ready data types produced by the geocoding,
//! forecast, and photo clients. All of them live only in UI state: a successful
//! search replaces the whole bundle, a failed one clears it.

pub mod forecast;
pub mod geocode;
pub mod photo;

pub use forecast::{ForecastClient, ForecastError};
pub use geocode::{GeocodeClient, GeocodeError};
pub use photo::{PhotoClient, PhotoError};

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A geocoded place returned by the location search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// City name
    pub name: String,
    /// First-level administrative region (state, province, ...), if known
    pub admin1: Option<String>,
    /// Country name, if known
    pub country: Option<String>,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

impl Location {
    /// Full label for the headline: name, admin region, country, skipping
    /// whatever is absent (e.g. "Paris, Île-de-France, France").
    pub fn display_label(&self) -> String {
        let mut label = self.name.clone();
        if let Some(admin1) = &self.admin1 {
            if !admin1.is_empty() {
                label.push_str(", ");
                label.push_str(admin1);
            }
        }
        if let Some(country) = &self.country {
            if !country.is_empty() {
                label.push_str(", ");
                label.push_str(country);
            }
        }
        label
    }

    /// Secondary label for suggestion rows: admin region and country, joined
    /// with a comma only when both are present.
    pub fn region_label(&self) -> String {
        let admin1 = self.admin1.as_deref().filter(|s| !s.is_empty());
        let country = self.country.as_deref().filter(|s| !s.is_empty());
        match (admin1, country) {
            (Some(a), Some(c)) => format!("{}, {}", a, c),
            (Some(a), None) => a.to_string(),
            (None, Some(c)) => c.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Current conditions, taken verbatim from the forecast response's current block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_direction: f64,
    /// WMO weather code
    pub weather_code: u8,
    /// Feels-like temperature in °C
    pub apparent_temperature: f64,
    /// Precipitation in mm
    pub precipitation: f64,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: f64,
    /// Mean sea level pressure in hPa
    pub pressure_msl: f64,
    /// Surface pressure in hPa
    pub surface_pressure: f64,
    /// Wind gusts in km/h
    pub wind_gusts: f64,
    /// UV index
    pub uv_index: f64,
    /// Dew point in °C
    pub dew_point: f64,
    /// Visibility in meters
    pub visibility: f64,
    /// Wet bulb temperature in °C
    pub wet_bulb_temperature: f64,
    /// Clear-sky UV index
    pub uv_index_clear_sky: f64,
    /// Sunshine duration in seconds
    pub sunshine_duration: f64,
    /// Precipitation probability percentage (0-100)
    pub precipitation_probability: f64,
}

/// Hourly forecast as parallel columns
///
/// Index `i` across all columns describes the same hour; the columns are
/// validated to have equal length before truncation and stay aligned after it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Forecast hour timestamps
    pub time: Vec<NaiveDateTime>,
    /// Temperature in °C per hour
    pub temperature: Vec<f64>,
    /// Relative humidity percentage per hour
    pub humidity: Vec<f64>,
    /// Wind speed in km/h per hour
    pub wind_speed: Vec<f64>,
    /// WMO weather code per hour
    pub weather_code: Vec<u8>,
    /// UV index per hour
    pub uv_index: Vec<f64>,
    /// Precipitation probability percentage per hour
    pub precipitation_probability: Vec<f64>,
}

impl HourlySeries {
    /// Number of forecast hours
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns true when no hours are present
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns true when every column has the same length as `time`
    pub fn is_aligned(&self) -> bool {
        let len = self.time.len();
        self.temperature.len() == len
            && self.humidity.len() == len
            && self.wind_speed.len() == len
            && self.weather_code.len() == len
            && self.uv_index.len() == len
            && self.precipitation_probability.len() == len
    }
}

/// Single-day summary taken from the first element of each daily array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    /// Maximum temperature in °C
    pub max_temp: f64,
    /// Minimum temperature in °C
    pub min_temp: f64,
    /// Sunrise time (local to the forecast location)
    pub sunrise: NaiveTime,
    /// Sunset time (local to the forecast location)
    pub sunset: NaiveTime,
    /// Maximum UV index for the day
    pub uv_index_max: f64,
    /// Total precipitation in mm
    pub precipitation_sum: f64,
    /// Sunshine duration in seconds
    pub sunshine_duration: f64,
}

/// Attribution for a background photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAttribution {
    /// Photographer's display name
    pub name: String,
    /// Photographer's handle
    pub username: String,
    /// Link to the photographer's profile
    pub profile_link: String,
}

/// A representative city photo with attribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityPhoto {
    /// URL of the photo
    pub url: String,
    /// Who took it
    pub attribution: PhotoAttribution,
}

/// The full display bundle produced by one successful search
///
/// Replaced wholesale on every successful search; cleared on any primary-path
/// failure. The photo lives outside this bundle because its lifecycle is
/// independent (see `fetch`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// The geocoded location the forecast is for
    pub location: Location,
    /// IANA timezone name resolved by the forecast endpoint
    pub timezone: String,
    /// UTC offset of that timezone in seconds, used for the clock
    pub utc_offset_seconds: i32,
    /// Whether it is currently daytime at the location
    pub is_day: bool,
    /// Current conditions
    pub current: CurrentConditions,
    /// Hourly forecast, truncated to the first 24 hours
    pub hourly: HourlySeries,
    /// Today's summary
    pub daily: DailySummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(admin1: Option<&str>, country: Option<&str>) -> Location {
        Location {
            name: "Paris".to_string(),
            admin1: admin1.map(str::to_string),
            country: country.map(str::to_string),
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    #[test]
    fn test_region_label_joins_with_comma_only_when_both_present() {
        assert_eq!(
            location(Some("Île-de-France"), Some("France")).region_label(),
            "Île-de-France, France"
        );
        assert_eq!(
            location(Some("Île-de-France"), None).region_label(),
            "Île-de-France"
        );
        assert_eq!(location(None, Some("France")).region_label(), "France");
        assert_eq!(location(None, None).region_label(), "");
    }

    #[test]
    fn test_region_label_treats_empty_strings_as_absent() {
        assert_eq!(location(Some(""), Some("France")).region_label(), "France");
        assert_eq!(location(Some("Texas"), Some("")).region_label(), "Texas");
    }

    #[test]
    fn test_display_label_includes_available_parts() {
        assert_eq!(
            location(Some("Île-de-France"), Some("France")).display_label(),
            "Paris, Île-de-France, France"
        );
        assert_eq!(
            location(None, Some("France")).display_label(),
            "Paris, France"
        );
        assert_eq!(location(None, None).display_label(), "Paris");
    }

    #[test]
    fn test_hourly_series_alignment() {
        let mut series = HourlySeries {
            time: vec![
                NaiveDateTime::parse_from_str("2024-07-15T00:00", "%Y-%m-%dT%H:%M").unwrap(),
                NaiveDateTime::parse_from_str("2024-07-15T01:00", "%Y-%m-%dT%H:%M").unwrap(),
            ],
            temperature: vec![15.0, 14.5],
            humidity: vec![70.0, 72.0],
            wind_speed: vec![5.0, 6.0],
            weather_code: vec![0, 1],
            uv_index: vec![0.0, 0.0],
            precipitation_probability: vec![10.0, 15.0],
        };
        assert!(series.is_aligned());
        assert_eq!(series.len(), 2);

        series.temperature.pop();
        assert!(!series.is_aligned());
    }

    #[test]
    fn test_hourly_series_default_is_empty_and_aligned() {
        let series = HourlySeries::default();
        assert!(series.is_empty());
        assert!(series.is_aligned());
        assert_eq!(series.len(), 0);
    }
}
