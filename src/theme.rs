//! Pure display derivation: temperature buckets and weather-code text
//!
//! No I/O here. Temperatures map to one of five buckets with closed upper
//! boundaries at 0, 15, 25, and 32 °C; each bucket carries the glyph, color,
//! and gradient pair used across the UI. WMO weather codes map to short
//! human-readable text, defaulting to "Unknown".

use ratatui::style::Color;

/// Temperature bucket used for icon and color selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBucket {
    /// At or below 0 °C
    Freezing,
    /// Above 0, at or below 15 °C
    Cool,
    /// Above 15, at or below 25 °C
    Mild,
    /// Above 25, at or below 32 °C
    Warm,
    /// Above 32 °C
    Hot,
}

/// Maps a temperature to its bucket. Boundaries are closed: exactly 15 °C is
/// still the Cool bucket.
pub fn temp_bucket(temp: f64) -> TempBucket {
    if temp <= 0.0 {
        TempBucket::Freezing
    } else if temp <= 15.0 {
        TempBucket::Cool
    } else if temp <= 25.0 {
        TempBucket::Mild
    } else if temp <= 32.0 {
        TempBucket::Warm
    } else {
        TempBucket::Hot
    }
}

impl TempBucket {
    /// Glyph shown next to a temperature in this bucket
    pub fn glyph(self) -> &'static str {
        match self {
            TempBucket::Freezing => "\u{2744}", // ❄
            TempBucket::Cool => "\u{1F321}",    // 🌡
            TempBucket::Mild => "\u{1F321}",    // 🌡
            TempBucket::Warm => "\u{1F525}",    // 🔥
            TempBucket::Hot => "\u{1F525}",     // 🔥
        }
    }

    /// Foreground color for a temperature in this bucket
    pub fn color(self) -> Color {
        match self {
            TempBucket::Freezing => Color::Blue,
            TempBucket::Cool => Color::Cyan,
            TempBucket::Mild => Color::Green,
            TempBucket::Warm => Color::LightRed,
            TempBucket::Hot => Color::Red,
        }
    }

    /// Gradient pair (stronger, softer) for panels keyed to this bucket
    pub fn gradient(self) -> (Color, Color) {
        match self {
            TempBucket::Freezing => (Color::Blue, Color::LightBlue),
            TempBucket::Cool => (Color::Cyan, Color::LightCyan),
            TempBucket::Mild => (Color::Green, Color::LightGreen),
            TempBucket::Warm => (Color::LightRed, Color::LightYellow),
            TempBucket::Hot => (Color::Red, Color::LightRed),
        }
    }
}

/// Human-readable text for a WMO weather code, "Unknown" for unlisted codes
pub fn weather_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        95 => "Thunderstorm",
        _ => "Unknown",
    }
}

/// Day/night headline glyph
pub fn sky_glyph(is_day: bool) -> &'static str {
    if is_day {
        "\u{2600}" // ☀
    } else {
        "\u{263E}" // ☾
    }
}

/// Day/night accent color for titles and highlights
pub fn sky_accent(is_day: bool) -> Color {
    if is_day {
        Color::Yellow
    } else {
        Color::LightBlue
    }
}
