//! YouTube form - terminal front end for the channel sign-up form
//!
//! Renders the form state store with Ratatui: field values, validation
//! errors, the dynamic phone number list and a submit button that stays
//! disabled until the form is dirty.

mod app;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};
use youtube_form::FormConfig;

/// Log to a file under the cache dir so output does not draw over the UI
fn log_writer() -> BoxMakeWriter {
    let file = ProjectDirs::from("io", "ytform", "youtube-form").and_then(|dirs| {
        std::fs::create_dir_all(dirs.cache_dir()).ok()?;
        std::fs::File::create(dirs.cache_dir().join("youtube-form.log")).ok()
    });
    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::stderr),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "youtube_form=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_writer())
                .with_ansi(false),
        )
        .init();

    let config = FormConfig::load()?;
    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.render_count += 1;
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Only redraw in response to input
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key)?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
