//! Application state management for the city weather dashboard
//!
//! This module contains the main application state machine, keyboard handling,
//! and the rules for applying background fetch results. The view state is one
//! of {Idle, Loading, Loaded, Error}; every user action goes through a single
//! transition function (`handle_key`) and every fetch result through
//! `apply_message`.

use std::time::Duration;

use chrono::{FixedOffset, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::data::{CityPhoto, Dashboard, Location};
use crate::debounce::Debouncer;
use crate::fetch::FetchMessage;

/// Quiescence delay before a typed query triggers a suggestion lookup
const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Minimum trimmed query length for the suggestion dropdown
const MIN_SUGGEST_CHARS: usize = 2;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Nothing searched yet
    Idle,
    /// A search is in flight
    Loading,
    /// A dashboard is on screen
    Loaded,
    /// The last search failed; holds the user-facing message
    Error(String),
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Text in the search input
    pub query: String,
    /// Current autocomplete suggestions
    pub suggestions: Vec<Location>,
    /// Index of the highlighted suggestion, if any
    pub suggestion_index: Option<usize>,
    /// Whether the suggestion dropdown is visible
    pub show_suggestions: bool,
    /// The loaded dashboard, replaced wholesale on each successful search
    pub dashboard: Option<Dashboard>,
    /// Background photo; cleared independently of the dashboard
    pub photo: Option<CityPhoto>,
    /// Scroll offset into the hourly strip (index of the leftmost hour)
    pub hourly_offset: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Debouncer for suggestion lookups
    pub debouncer: Debouncer,
    /// Monotonic request counter shared by searches and suggestion lookups
    next_seq: u64,
    /// Sequence of the newest submitted search
    latest_search_seq: Option<u64>,
    /// Sequence of the newest suggestion lookup
    latest_suggest_seq: Option<u64>,
    /// Search waiting to be spawned by the event loop
    pending_search: Option<(u64, String)>,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self {
            state: AppState::Idle,
            query: String::new(),
            suggestions: Vec::new(),
            suggestion_index: None,
            show_suggestions: false,
            dashboard: None,
            photo: None,
            hourly_offset: 0,
            should_quit: false,
            debouncer: Debouncer::new(DEBOUNCE_DELAY),
            next_seq: 0,
            latest_search_seq: None,
            latest_suggest_seq: None,
            pending_search: None,
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - printable characters: edit the search input (debounces suggestions)
    /// - `Backspace`: delete from the search input
    /// - `Up`/`Down`: move the suggestion highlight
    /// - `Enter`: submit the search
    /// - `Left`/`Right`: scroll the hourly strip when a dashboard is shown
    /// - `Esc`: close suggestions, else clear the input, else quit
    /// - `Ctrl+C`: quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        match key_event.code {
            KeyCode::Char(c) => {
                self.query.push(c);
                self.suggestion_index = None;
                self.show_suggestions = true;
                self.debouncer.trigger(self.query.clone());
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.suggestion_index = None;
                if self.query.trim().chars().count() < MIN_SUGGEST_CHARS {
                    self.suggestions.clear();
                    self.show_suggestions = false;
                    self.debouncer.cancel();
                } else {
                    self.debouncer.trigger(self.query.clone());
                }
            }
            KeyCode::Up => self.move_highlight_up(),
            KeyCode::Down => self.move_highlight_down(),
            KeyCode::Enter => self.submit(),
            KeyCode::Left => {
                if self.state == AppState::Loaded && !self.show_suggestions {
                    self.scroll_hourly_left();
                }
            }
            KeyCode::Right => {
                if self.state == AppState::Loaded && !self.show_suggestions {
                    self.scroll_hourly_right();
                }
            }
            KeyCode::Esc => {
                if self.show_suggestions {
                    self.show_suggestions = false;
                } else if !self.query.is_empty() {
                    self.query.clear();
                    self.suggestions.clear();
                    self.suggestion_index = None;
                    self.debouncer.cancel();
                } else {
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    /// Submits the current input as a search.
    ///
    /// A highlighted suggestion searches by its city name (and fills the input
    /// with the full label); free text searches by the segment before the
    /// first comma, so a pasted "Paris, Île-de-France, France" still resolves
    /// consistently.
    fn submit(&mut self) {
        let term = match self.highlighted_suggestion() {
            Some(suggestion) => {
                let term = suggestion.name.clone();
                self.query = suggestion.display_label();
                term
            }
            None => match self.query.split(',').next() {
                Some(head) => head.trim().to_string(),
                None => return,
            },
        };

        if term.is_empty() {
            return;
        }
        self.begin_search(term);
    }

    /// Returns the currently highlighted suggestion, if the dropdown is open
    fn highlighted_suggestion(&self) -> Option<&Location> {
        if !self.show_suggestions {
            return None;
        }
        self.suggestion_index
            .and_then(|i| self.suggestions.get(i))
    }

    /// Starts a search: allocates its sequence number and moves to Loading.
    ///
    /// The actual network work is spawned by the event loop via
    /// `take_pending_search`, keeping this type free of I/O.
    pub fn begin_search(&mut self, term: String) {
        let seq = self.alloc_seq();
        self.latest_search_seq = Some(seq);
        self.pending_search = Some((seq, term));
        self.state = AppState::Loading;
        self.suggestions.clear();
        self.suggestion_index = None;
        self.show_suggestions = false;
        self.debouncer.cancel();
    }

    /// Takes the search queued by `begin_search`, if any
    pub fn take_pending_search(&mut self) -> Option<(u64, String)> {
        self.pending_search.take()
    }

    /// Allocates a sequence number for a suggestion lookup and records it as
    /// the newest one
    pub fn begin_suggest(&mut self) -> u64 {
        let seq = self.alloc_seq();
        self.latest_suggest_seq = Some(seq);
        seq
    }

    fn alloc_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Applies a background fetch result.
    ///
    /// Results whose sequence number is not the latest for their kind are
    /// stale and dropped: a slow earlier search can never overwrite the state
    /// of a newer one.
    pub fn apply_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Suggestions { seq, locations } => {
                if self.latest_suggest_seq != Some(seq) {
                    return;
                }
                self.suggestions = locations;
                self.suggestion_index = None;
                self.show_suggestions =
                    self.query.trim().chars().count() >= MIN_SUGGEST_CHARS;
            }
            FetchMessage::Loaded {
                seq,
                dashboard,
                photo,
            } => {
                if self.latest_search_seq != Some(seq) {
                    return;
                }
                self.dashboard = Some(*dashboard);
                self.photo = photo;
                self.hourly_offset = 0;
                self.state = AppState::Loaded;
            }
            FetchMessage::Failed { seq, message } => {
                if self.latest_search_seq != Some(seq) {
                    return;
                }
                self.clear_results();
                self.state = AppState::Error(message);
            }
        }
    }

    /// Clears all derived display state so nothing stale can sit next to an
    /// error message. The timezone lives inside the dashboard and goes with it.
    fn clear_results(&mut self) {
        self.dashboard = None;
        self.photo = None;
        self.hourly_offset = 0;
    }

    /// Moves the suggestion highlight up, wrapping to the bottom
    fn move_highlight_up(&mut self) {
        if !self.show_suggestions || self.suggestions.is_empty() {
            return;
        }
        let count = self.suggestions.len();
        self.suggestion_index = Some(match self.suggestion_index {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
    }

    /// Moves the suggestion highlight down, wrapping to the top
    fn move_highlight_down(&mut self) {
        if !self.show_suggestions || self.suggestions.is_empty() {
            return;
        }
        let count = self.suggestions.len();
        self.suggestion_index = Some(match self.suggestion_index {
            None => 0,
            Some(i) => (i + 1) % count,
        });
    }

    /// Scrolls the hourly strip one hour to the left, stopping at 0
    pub fn scroll_hourly_left(&mut self) {
        self.hourly_offset = self.hourly_offset.saturating_sub(1);
    }

    /// Scrolls the hourly strip one hour to the right.
    ///
    /// The renderer clamps the offset to the actual visible window; here we
    /// only cap it at the last hour.
    pub fn scroll_hourly_right(&mut self) {
        let total = self
            .dashboard
            .as_ref()
            .map(|d| d.hourly.len())
            .unwrap_or(0);
        if self.hourly_offset + 1 < total {
            self.hourly_offset += 1;
        }
    }

    /// Current time at the loaded location, derived from the forecast's UTC
    /// offset. `None` until a timezone is known.
    pub fn clock_line(&self) -> Option<String> {
        let dashboard = self.dashboard.as_ref()?;
        let offset = FixedOffset::east_opt(dashboard.utc_offset_seconds)?;
        let now = Utc::now().with_timezone(&offset);
        Some(now.format("%I:%M:%S %p").to_string())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the hourly strip can scroll further left
pub fn can_scroll_left(offset: usize) -> bool {
    offset > 0
}

/// True when the hourly strip can scroll further right given how many columns
/// fit on screen
pub fn can_scroll_right(offset: usize, visible: usize, total: usize) -> bool {
    offset + visible < total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CurrentConditions, DailySummary, HourlySeries, PhotoAttribution};
    use chrono::{NaiveDateTime, NaiveTime};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
    }

    fn sample_location(name: &str) -> Location {
        Location {
            name: name.to_string(),
            admin1: Some("Île-de-France".to_string()),
            country: Some("France".to_string()),
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    fn sample_dashboard(hours: usize) -> Dashboard {
        let hourly = HourlySeries {
            time: (0..hours)
                .map(|h| {
                    NaiveDateTime::parse_from_str(
                        &format!("2024-07-15T{:02}:00", h % 24),
                        "%Y-%m-%dT%H:%M",
                    )
                    .unwrap()
                })
                .collect(),
            temperature: vec![20.0; hours],
            humidity: vec![60.0; hours],
            wind_speed: vec![10.0; hours],
            weather_code: vec![2; hours],
            uv_index: vec![4.0; hours],
            precipitation_probability: vec![10.0; hours],
        };
        Dashboard {
            location: sample_location("Paris"),
            timezone: "Europe/Paris".to_string(),
            utc_offset_seconds: 7200,
            is_day: true,
            current: CurrentConditions {
                temperature: 22.5,
                humidity: 65.0,
                wind_speed: 12.5,
                wind_direction: 270.0,
                weather_code: 2,
                apparent_temperature: 23.8,
                precipitation: 0.0,
                cloud_cover: 40.0,
                pressure_msl: 1014.2,
                surface_pressure: 1009.8,
                wind_gusts: 24.1,
                uv_index: 5.6,
                dew_point: 15.3,
                visibility: 24140.0,
                wet_bulb_temperature: 17.9,
                uv_index_clear_sky: 6.1,
                sunshine_duration: 2700.0,
                precipitation_probability: 5.0,
            },
            hourly,
            daily: DailySummary {
                max_temp: 26.4,
                min_temp: 15.1,
                sunrise: NaiveTime::from_hms_opt(6, 2, 0).unwrap(),
                sunset: NaiveTime::from_hms_opt(21, 49, 0).unwrap(),
                uv_index_max: 7.5,
                precipitation_sum: 0.3,
                sunshine_duration: 46800.0,
            },
        }
    }

    fn loaded_message(seq: u64, photo: Option<CityPhoto>) -> FetchMessage {
        FetchMessage::Loaded {
            seq,
            dashboard: Box::new(sample_dashboard(24)),
            photo,
        }
    }

    fn sample_photo() -> CityPhoto {
        CityPhoto {
            url: "https://images.unsplash.com/photo-1".to_string(),
            attribution: PhotoAttribution {
                name: "Jane Doe".to_string(),
                username: "janedoe".to_string(),
                profile_link: "https://unsplash.com/@janedoe".to_string(),
            },
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let app = App::new();
        assert_eq!(app.state, AppState::Idle);
        assert!(app.query.is_empty());
        assert!(app.dashboard.is_none());
        assert!(app.photo.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_typing_edits_query_and_arms_debouncer() {
        let mut app = App::new();
        type_str(&mut app, "van");
        assert_eq!(app.query, "van");
        assert!(app.show_suggestions);
        assert!(app.debouncer.is_pending());
    }

    #[test]
    fn test_backspace_below_two_chars_clears_suggestions() {
        let mut app = App::new();
        type_str(&mut app, "va");
        app.suggestions = vec![sample_location("Vancouver")];

        app.handle_key(key_event(KeyCode::Backspace));
        assert_eq!(app.query, "v");
        assert!(app.suggestions.is_empty());
        assert!(!app.show_suggestions);
        assert!(!app.debouncer.is_pending());
    }

    #[test]
    fn test_submit_extracts_text_before_first_comma() {
        let mut app = App::new();
        type_str(&mut app, "Paris, Île-de-France, France");
        app.handle_key(key_event(KeyCode::Enter));

        let (_, term) = app.take_pending_search().expect("Expected a queued search");
        assert_eq!(term, "Paris");
        assert_eq!(app.state, AppState::Loading);
    }

    #[test]
    fn test_submit_empty_query_does_nothing() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Enter));
        assert!(app.take_pending_search().is_none());
        assert_eq!(app.state, AppState::Idle);
    }

    #[test]
    fn test_submit_highlighted_suggestion_uses_its_name() {
        let mut app = App::new();
        type_str(&mut app, "par");
        app.suggestions = vec![sample_location("Paris")];
        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Enter));

        let (_, term) = app.take_pending_search().expect("Expected a queued search");
        assert_eq!(term, "Paris");
        assert_eq!(app.query, "Paris, Île-de-France, France");
        assert!(!app.show_suggestions);
    }

    #[test]
    fn test_suggestion_highlight_wraps() {
        let mut app = App::new();
        type_str(&mut app, "pa");
        app.suggestions = vec![sample_location("Paris"), sample_location("Palermo")];

        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.suggestion_index, Some(0));
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.suggestion_index, Some(1));
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.suggestion_index, Some(0));
        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.suggestion_index, Some(1));
    }

    #[test]
    fn test_loaded_result_applies_dashboard_and_photo() {
        let mut app = App::new();
        app.begin_search("Paris".to_string());
        let (seq, _) = app.take_pending_search().unwrap();

        app.apply_message(loaded_message(seq, Some(sample_photo())));

        assert_eq!(app.state, AppState::Loaded);
        assert!(app.dashboard.is_some());
        assert!(app.photo.is_some());
        assert_eq!(app.hourly_offset, 0);
    }

    #[test]
    fn test_photo_failure_leaves_weather_intact() {
        // A Loaded message with photo: None is exactly what an absorbed photo
        // failure produces; the weather data still applies cleanly.
        let mut app = App::new();
        app.begin_search("Paris".to_string());
        let (seq, _) = app.take_pending_search().unwrap();

        app.apply_message(loaded_message(seq, None));

        assert_eq!(app.state, AppState::Loaded);
        assert!(app.dashboard.is_some());
        assert!(app.photo.is_none());
    }

    #[test]
    fn test_failed_result_clears_all_display_state() {
        let mut app = App::new();
        app.begin_search("Paris".to_string());
        let (seq, _) = app.take_pending_search().unwrap();
        app.apply_message(loaded_message(seq, Some(sample_photo())));

        app.begin_search("Atlantis".to_string());
        let (seq2, _) = app.take_pending_search().unwrap();
        app.apply_message(FetchMessage::Failed {
            seq: seq2,
            message: "Location \"Atlantis\" not found. Please try a different city name."
                .to_string(),
        });

        match &app.state {
            AppState::Error(msg) => assert!(msg.contains("Atlantis")),
            other => panic!("Expected Error state, got {:?}", other),
        }
        assert!(app.dashboard.is_none());
        assert!(app.photo.is_none());
        assert!(app.clock_line().is_none());
    }

    #[test]
    fn test_stale_search_result_is_ignored() {
        let mut app = App::new();
        app.begin_search("Paris".to_string());
        let (old_seq, _) = app.take_pending_search().unwrap();

        // A newer search supersedes the first before it resolves.
        app.begin_search("London".to_string());
        let (new_seq, _) = app.take_pending_search().unwrap();

        app.apply_message(loaded_message(old_seq, None));
        assert_eq!(app.state, AppState::Loading, "stale result must not apply");
        assert!(app.dashboard.is_none());

        app.apply_message(loaded_message(new_seq, None));
        assert_eq!(app.state, AppState::Loaded);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut app = App::new();
        app.begin_search("Paris".to_string());
        let (old_seq, _) = app.take_pending_search().unwrap();
        app.begin_search("London".to_string());
        let (new_seq, _) = app.take_pending_search().unwrap();

        app.apply_message(FetchMessage::Failed {
            seq: old_seq,
            message: "boom".to_string(),
        });
        assert_eq!(app.state, AppState::Loading);

        app.apply_message(loaded_message(new_seq, None));
        assert_eq!(app.state, AppState::Loaded);
    }

    #[test]
    fn test_stale_suggestions_are_ignored() {
        let mut app = App::new();
        type_str(&mut app, "pa");
        let old_seq = app.begin_suggest();
        let new_seq = app.begin_suggest();

        app.apply_message(FetchMessage::Suggestions {
            seq: old_seq,
            locations: vec![sample_location("Palermo")],
        });
        assert!(app.suggestions.is_empty());

        app.apply_message(FetchMessage::Suggestions {
            seq: new_seq,
            locations: vec![sample_location("Paris")],
        });
        assert_eq!(app.suggestions.len(), 1);
        assert_eq!(app.suggestions[0].name, "Paris");
    }

    #[test]
    fn test_suggestions_hidden_when_query_shrank_meanwhile() {
        let mut app = App::new();
        type_str(&mut app, "pa");
        let seq = app.begin_suggest();

        // Query shrank below the threshold before the lookup resolved.
        app.handle_key(key_event(KeyCode::Backspace));
        app.apply_message(FetchMessage::Suggestions {
            seq,
            locations: vec![sample_location("Paris")],
        });
        assert!(!app.show_suggestions);
    }

    #[test]
    fn test_esc_closes_suggestions_then_clears_then_quits() {
        let mut app = App::new();
        type_str(&mut app, "pa");
        assert!(app.show_suggestions);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_suggestions);
        assert_eq!(app.query, "pa");

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.query.is_empty());
        assert!(!app.should_quit);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_hourly_scroll_bounds() {
        let mut app = App::new();
        app.begin_search("Paris".to_string());
        let (seq, _) = app.take_pending_search().unwrap();
        app.apply_message(loaded_message(seq, None));

        app.scroll_hourly_left();
        assert_eq!(app.hourly_offset, 0, "Should stop at 0");

        for _ in 0..40 {
            app.scroll_hourly_right();
        }
        assert_eq!(app.hourly_offset, 23, "Should cap at the last hour");
    }

    #[test]
    fn test_arrow_keys_scroll_only_when_loaded() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Right));
        assert_eq!(app.hourly_offset, 0);

        app.begin_search("Paris".to_string());
        let (seq, _) = app.take_pending_search().unwrap();
        app.apply_message(loaded_message(seq, None));

        app.handle_key(key_event(KeyCode::Right));
        assert_eq!(app.hourly_offset, 1);
        app.handle_key(key_event(KeyCode::Left));
        assert_eq!(app.hourly_offset, 0);
    }

    #[test]
    fn test_can_scroll_affordances() {
        assert!(!can_scroll_left(0));
        assert!(can_scroll_left(1));

        // 24 hours, 8 visible: offsets 0..=16 can still move right.
        assert!(can_scroll_right(0, 8, 24));
        assert!(can_scroll_right(15, 8, 24));
        assert!(!can_scroll_right(16, 8, 24));

        // Everything fits: neither side scrolls.
        assert!(!can_scroll_right(0, 24, 24));
        assert!(!can_scroll_right(0, 30, 24));
    }

    #[test]
    fn test_clock_line_requires_timezone() {
        let mut app = App::new();
        assert!(app.clock_line().is_none());

        app.begin_search("Paris".to_string());
        let (seq, _) = app.take_pending_search().unwrap();
        app.apply_message(loaded_message(seq, None));
        let clock = app.clock_line().expect("Expected a clock once loaded");
        assert!(clock.ends_with("AM") || clock.ends_with("PM"));
    }

    #[test]
    fn test_begin_search_enters_loading_and_closes_dropdown() {
        let mut app = App::new();
        type_str(&mut app, "paris");
        app.suggestions = vec![sample_location("Paris")];

        app.begin_search("paris".to_string());
        assert_eq!(app.state, AppState::Loading);
        assert!(app.suggestions.is_empty());
        assert!(!app.show_suggestions);
        assert!(!app.debouncer.is_pending());
    }
}
