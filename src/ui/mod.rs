//! UI rendering module for the city weather dashboard
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod dashboard;
pub mod search;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};

/// Renders the whole frame: search bar on top, the state-dependent body
/// below, and the suggestion dropdown overlaid last so it sits on top.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Help line
        ])
        .split(area);

    search::render_input(frame, chunks[0], app);
    render_body(frame, chunks[1], app);
    render_help_line(frame, chunks[2], app);

    if app.show_suggestions && !app.suggestions.is_empty() {
        search::render_suggestions(frame, chunks[0], area, app);
    }
}

/// Renders the body area for the current state
fn render_body(frame: &mut Frame, area: Rect, app: &mut App) {
    match app.state.clone() {
        AppState::Idle => render_idle(frame, area),
        AppState::Loading => render_loading(frame, area),
        AppState::Error(message) => render_error(frame, area, &message),
        AppState::Loaded => dashboard::render(frame, area, app),
    }
}

/// Renders the idle placeholder shown before the first search
fn render_idle(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Type a city name and press Enter",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Renders the loading indicator while a search is in flight
fn render_loading(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Fetching weather...",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Renders the error box for a failed search
fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Error ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    )))
    .block(block)
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center);

    // A small centered box is enough; the message is one or two lines.
    let height = 4.min(area.height);
    let error_area = Rect {
        x: area.x,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width: area.width,
        height,
    };
    frame.render_widget(paragraph, error_area);
}

/// Renders the key binding hints at the bottom of the screen
fn render_help_line(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.state == AppState::Loaded {
        "Enter: search | \u{2190}/\u{2192}: scroll hours | Esc: clear | Ctrl+C: quit"
    } else {
        "Enter: search | \u{2191}/\u{2193}: pick suggestion | Esc: clear | Ctrl+C: quit"
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(paragraph, area);
}
