//! Search bar and suggestion dropdown UI
//!
//! The input is a single bordered line; the dropdown is overlaid below it on
//! top of whatever the body is showing, one row per suggestion with the city
//! name emphasized and the region dimmed.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::Location;

/// Renders the search input with a block cursor at the end
pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Search city ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));

    let line = Line::from(vec![
        Span::styled(app.query.clone(), Style::default().fg(Color::White)),
        Span::styled("\u{2588}", Style::default().fg(Color::Cyan)),
    ]);
    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders the suggestion dropdown below the search bar.
///
/// # Arguments
/// * `input_area` - the rect the search bar occupies
/// * `screen` - the full frame area, used to clip the dropdown
pub fn render_suggestions(frame: &mut Frame, input_area: Rect, screen: Rect, app: &App) {
    let count = app.suggestions.len() as u16;
    let y = input_area.y + input_area.height;
    let available = screen.bottom().saturating_sub(y);
    let height = (count + 2).min(available);
    if height < 3 {
        return;
    }

    let dropdown_area = Rect {
        x: input_area.x,
        y,
        width: input_area.width,
        height,
    };

    let lines: Vec<Line> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, location)| suggestion_line(location, app.suggestion_index == Some(i)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    // Clear first so the dropdown covers the body underneath.
    frame.render_widget(Clear, dropdown_area);
    frame.render_widget(Paragraph::new(lines).block(block), dropdown_area);
}

/// Builds one dropdown row: city name emphasized, region dimmed
fn suggestion_line(location: &Location, selected: bool) -> Line<'static> {
    let name_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let marker = if selected { "\u{25B8} " } else { "  " };
    let mut spans = vec![
        Span::styled(marker.to_string(), name_style),
        Span::styled(location.name.clone(), name_style),
    ];

    let region = location.region_label();
    if !region.is_empty() {
        spans.push(Span::styled(
            format!("  {}", region),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vancouver() -> Location {
        Location {
            name: "Vancouver".to_string(),
            admin1: Some("British Columbia".to_string()),
            country: Some("Canada".to_string()),
            latitude: 49.25,
            longitude: -123.12,
        }
    }

    #[test]
    fn test_suggestion_line_includes_region() {
        let line = suggestion_line(&vancouver(), false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Vancouver"));
        assert!(text.contains("British Columbia, Canada"));
    }

    #[test]
    fn test_suggestion_line_without_region() {
        let mut location = vancouver();
        location.admin1 = None;
        location.country = None;
        let line = suggestion_line(&location, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.trim(), "Vancouver");
    }

    #[test]
    fn test_selected_suggestion_gets_marker() {
        let line = suggestion_line(&vancouver(), true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with('\u{25B8}'));
    }
}
