//! Weather dashboard UI
//!
//! Renders the loaded view: a headline with the location, local clock, and
//! current conditions, a today summary, the detail grid, the scrollable
//! 24-hour strip, and the photo attribution footer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{can_scroll_left, can_scroll_right, App};
use crate::data::{CityPhoto, CurrentConditions, DailySummary, Dashboard, HourlySeries};
use crate::theme::{sky_accent, sky_glyph, temp_bucket, weather_description};

/// Color scheme for the dashboard sections
mod colors {
    use ratatui::style::Color;

    /// Section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Disabled affordances
    pub const DISABLED: Color = Color::DarkGray;
}

/// Width of one hourly column, including its trailing gap
const HOUR_COL_WIDTH: u16 = 7;

/// Width reserved for the row labels on the left of the hourly strip
const HOUR_LABEL_WIDTH: u16 = 7;

/// Renders the dashboard for the loaded state
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(total_hours) = app.dashboard.as_ref().map(|d| d.hourly.len()) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Headline
            Constraint::Length(3), // Today summary
            Constraint::Length(8), // Current detail grid
            Constraint::Min(6),    // Hourly strip
            Constraint::Length(1), // Photo attribution
        ])
        .split(area);

    // Clamp the scroll offset against the actual terminal width before
    // rendering, so resizes never leave a blank strip.
    let visible = visible_columns(chunks[3].width);
    app.hourly_offset = app.hourly_offset.min(max_offset(total_hours, visible));
    let offset = app.hourly_offset;

    let Some(dashboard) = app.dashboard.as_ref() else {
        return;
    };

    let headline = build_headline_lines(dashboard, app.clock_line());
    frame.render_widget(Paragraph::new(headline), chunks[0]);

    let today = build_today_lines(&dashboard.daily);
    frame.render_widget(Paragraph::new(today), chunks[1]);

    render_detail_grid(frame, chunks[2], &dashboard.current);

    let hourly = build_hourly_lines(&dashboard.hourly, offset, visible);
    frame.render_widget(Paragraph::new(hourly), chunks[3]);

    if let Some(photo) = &app.photo {
        frame.render_widget(Paragraph::new(build_photo_line(photo)), chunks[4]);
    }
}

/// Builds the headline: location and clock, then the big temperature line
fn build_headline_lines(dashboard: &Dashboard, clock: Option<String>) -> Vec<Line<'static>> {
    let accent = sky_accent(dashboard.is_day);
    let mut title_spans = vec![
        Span::styled(
            format!("{} ", sky_glyph(dashboard.is_day)),
            Style::default().fg(accent),
        ),
        Span::styled(
            dashboard.location.display_label(),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(clock) = clock {
        title_spans.push(Span::styled(
            format!("  {}", clock),
            Style::default().fg(accent),
        ));
        title_spans.push(Span::styled(
            format!("  ({})", dashboard.timezone.clone()),
            Style::default().fg(colors::SECONDARY),
        ));
    }

    let current = &dashboard.current;
    let bucket = temp_bucket(current.temperature);
    let temp_line = Line::from(vec![
        Span::raw(format!("{}  ", bucket.glyph())),
        Span::styled(
            format!("{:.1}\u{00B0}C", current.temperature),
            Style::default()
                .fg(bucket.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", weather_description(current.weather_code)),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::styled(
            format!("  (feels like {:.1}\u{00B0})", current.apparent_temperature),
            Style::default().fg(colors::SECONDARY),
        ),
    ]);

    vec![Line::from(title_spans), Line::from(""), temp_line]
}

/// Builds the today summary row from the daily forecast
fn build_today_lines(daily: &DailySummary) -> Vec<Line<'static>> {
    let high_bucket = temp_bucket(daily.max_temp);
    let low_bucket = temp_bucket(daily.min_temp);

    let line = Line::from(vec![
        Span::styled("High: ", Style::default().fg(colors::SECONDARY)),
        Span::styled(
            format!("{:.1}\u{00B0}", daily.max_temp),
            Style::default().fg(high_bucket.color()),
        ),
        Span::styled("  Low: ", Style::default().fg(colors::SECONDARY)),
        Span::styled(
            format!("{:.1}\u{00B0}", daily.min_temp),
            Style::default().fg(low_bucket.color()),
        ),
        Span::styled("  Sunrise: ", Style::default().fg(colors::SECONDARY)),
        Span::styled(
            daily.sunrise.format("%H:%M").to_string(),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::styled("  Sunset: ", Style::default().fg(colors::SECONDARY)),
        Span::styled(
            daily.sunset.format("%H:%M").to_string(),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::styled("  UV max: ", Style::default().fg(colors::SECONDARY)),
        Span::styled(
            format!("{:.1}", daily.uv_index_max),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::styled("  Rain: ", Style::default().fg(colors::SECONDARY)),
        Span::styled(
            format!("{:.1} mm", daily.precipitation_sum),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::styled("  Sunshine: ", Style::default().fg(colors::SECONDARY)),
        Span::styled(
            format!("{:.1} h", daily.sunshine_duration / 3600.0),
            Style::default().fg(colors::PRIMARY),
        ),
    ]);

    vec![
        Line::from(Span::styled(
            "TODAY",
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        line,
    ]
}

/// Renders the current conditions detail grid in three columns
fn render_detail_grid(frame: &mut Frame, area: Rect, current: &CurrentConditions) {
    let header = Line::from(Span::styled(
        "CURRENT CONDITIONS",
        Style::default()
            .fg(colors::HEADER)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(vec![header]),
        Rect {
            height: 1.min(area.height),
            ..area
        },
    );

    let grid_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(grid_area);

    let [left, middle, right] = build_detail_columns(current);
    frame.render_widget(Paragraph::new(left), columns[0]);
    frame.render_widget(Paragraph::new(middle), columns[1]);
    frame.render_widget(Paragraph::new(right), columns[2]);
}

/// Builds the three columns of the detail grid
fn build_detail_columns(current: &CurrentConditions) -> [Vec<Line<'static>>; 3] {
    let left = vec![
        metric_line("Humidity", format!("{:.0}%", current.humidity)),
        metric_line(
            "Wind",
            format!("{:.1} km/h {:.0}\u{00B0}", current.wind_speed, current.wind_direction),
        ),
        metric_line("Gusts", format!("{:.1} km/h", current.wind_gusts)),
        metric_line("Cloud cover", format!("{:.0}%", current.cloud_cover)),
        metric_line("Precipitation", format!("{:.1} mm", current.precipitation)),
        metric_line(
            "Rain chance",
            format!("{:.0}%", current.precipitation_probability),
        ),
    ];

    let middle = vec![
        metric_line("Pressure", format!("{:.0} hPa", current.pressure_msl)),
        metric_line(
            "Surface press.",
            format!("{:.0} hPa", current.surface_pressure),
        ),
        metric_line("Dew point", format!("{:.1}\u{00B0}C", current.dew_point)),
        metric_line(
            "Wet bulb",
            format!("{:.1}\u{00B0}C", current.wet_bulb_temperature),
        ),
        metric_line("Visibility", format!("{:.1} km", current.visibility / 1000.0)),
    ];

    let right = vec![
        metric_line("UV index", format!("{:.1}", current.uv_index)),
        metric_line(
            "UV clear sky",
            format!("{:.1}", current.uv_index_clear_sky),
        ),
        metric_line(
            "Sunshine",
            format!("{:.0} min", current.sunshine_duration / 60.0),
        ),
    ];

    [left, middle, right]
}

/// One "Label: value" row of the detail grid
fn metric_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<15}", format!("{}:", label)),
            Style::default().fg(colors::SECONDARY),
        ),
        Span::styled(value, Style::default().fg(colors::PRIMARY)),
    ])
}

/// Builds the scrollable hourly strip: a header with scroll affordances and
/// one row each for time, temperature, rain chance, and wind.
fn build_hourly_lines(hourly: &HourlySeries, offset: usize, visible: usize) -> Vec<Line<'static>> {
    let total = hourly.len();
    let end = (offset + visible).min(total);

    let left_style = if can_scroll_left(offset) {
        Style::default().fg(colors::PRIMARY)
    } else {
        Style::default().fg(colors::DISABLED)
    };
    let right_style = if can_scroll_right(offset, visible, total) {
        Style::default().fg(colors::PRIMARY)
    } else {
        Style::default().fg(colors::DISABLED)
    };

    let header = Line::from(vec![
        Span::styled(
            "NEXT 24 HOURS ",
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("\u{25C0}", left_style),
        Span::raw(" "),
        Span::styled("\u{25B6}", right_style),
    ]);

    let mut times = vec![row_label("Time")];
    let mut temps = vec![row_label("Temp")];
    let mut rain = vec![row_label("Rain")];
    let mut wind = vec![row_label("Wind")];

    for i in offset..end {
        times.push(Span::styled(
            hour_cell(hourly.time[i].format("%H:00").to_string()),
            Style::default().fg(colors::SECONDARY),
        ));
        let bucket = temp_bucket(hourly.temperature[i]);
        temps.push(Span::styled(
            hour_cell(format!("{:.0}\u{00B0}", hourly.temperature[i])),
            Style::default().fg(bucket.color()),
        ));
        rain.push(Span::styled(
            hour_cell(format!("{:.0}%", hourly.precipitation_probability[i])),
            Style::default().fg(colors::PRIMARY),
        ));
        wind.push(Span::styled(
            hour_cell(format!("{:.0}km/h", hourly.wind_speed[i])),
            Style::default().fg(colors::PRIMARY),
        ));
    }

    vec![
        header,
        Line::from(times),
        Line::from(temps),
        Line::from(rain),
        Line::from(wind),
    ]
}

/// Left-hand label for one row of the hourly strip
fn row_label(label: &str) -> Span<'static> {
    Span::styled(
        format!("{:<width$}", label, width = HOUR_LABEL_WIDTH as usize),
        Style::default().fg(colors::SECONDARY),
    )
}

/// Pads one hourly value to its fixed column width
fn hour_cell(value: String) -> String {
    format!("{:<width$}", value, width = HOUR_COL_WIDTH as usize)
}

/// How many hourly columns fit in the given strip width
pub fn visible_columns(width: u16) -> usize {
    (width.saturating_sub(HOUR_LABEL_WIDTH) / HOUR_COL_WIDTH).max(1) as usize
}

/// Largest valid scroll offset for the hourly strip
pub fn max_offset(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

/// Builds the attribution footer for the background photo
fn build_photo_line(photo: &CityPhoto) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(
                "Photo by {} (@{}) on Unsplash  ",
                photo.attribution.name, photo.attribution.username
            ),
            Style::default().fg(colors::SECONDARY),
        ),
        Span::styled(
            photo.attribution.profile_link.clone(),
            Style::default().fg(colors::DISABLED),
        ),
    ])
}
