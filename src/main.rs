//! Cityscope - city weather dashboard for the terminal
//!
//! Type a city name, pick a suggestion, and get the current conditions,
//! a 24-hour forecast strip, and the day's summary, with data from the
//! Open-Meteo APIs and an optional Unsplash city photo.

mod app;
mod cli;
mod data;
mod debounce;
mod fetch;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use cli::{Cli, StartupConfig};
use fetch::Fetcher;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StartupConfig::from_cli(Cli::parse());

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let (fetcher, mut rx) = Fetcher::new(config.photo_key);

    if let Some(city) = config.initial_city {
        app.begin_search(city);
    }

    // Main event loop
    loop {
        // Apply any finished background fetches
        while let Ok(message) = rx.try_recv() {
            app.apply_message(message);
        }

        // A quiescent search input fires the suggestion lookup
        if let Some(query) = app.debouncer.poll() {
            let seq = app.begin_suggest();
            fetcher.spawn_suggestions(seq, query);
        }

        // A submitted search fires the staged pipeline
        if let Some((seq, city)) = app.take_pending_search() {
            fetcher.spawn_search(seq, city);
        }

        terminal.draw(|f| ui::render(f, &mut app))?;

        // Poll for keyboard events with 100ms timeout; the short timeout also
        // keeps the clock ticking
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
