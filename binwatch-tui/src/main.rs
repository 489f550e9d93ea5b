//! Terminal UI for binwatch that shows bin fill levels and urgent notifications.

mod app;
mod config;
mod input;
mod ui;

use std::{
    fs::File,
    io,
    path::Path,
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use anyhow::{Context, Result};
use binwatch_core::{plugin::SourceRegistry, service::BinwatchService};
use binwatch_source_file as file;
use binwatch_source_seed as seed;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::AppConfig;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env_and_args()?;
    init_logging(config.log_file.as_deref())?;

    info!(
        source = %config.source,
        threshold = %config.threshold,
        "starting binwatch"
    );

    // Source + service setup
    let mut plugins = vec![seed::plugin()];
    if let Some(path) = &config.data {
        plugins.push(file::plugin(path));
    }
    let registry = Arc::new(SourceRegistry::new(plugins));
    let service = Arc::new(BinwatchService::new(registry));

    // App state
    let app = App::new(service, config.source, config.threshold);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Send logs to `path`; the terminal itself belongs to the UI.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let log_file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    reload(terminal, &mut app).await?;

    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Reload => reload(terminal, &mut app).await?,
            }
        }
    }

    Ok(())
}

/// Load a fresh snapshot and swap it into the app in one step.
async fn reload(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    app.is_loading = true;
    app.error_message = None;
    terminal.draw(|frame| ui::draw(frame, app))?;

    let res = app.service.load_dashboard(&app.source, app.threshold).await;
    app.apply_load(res);
    Ok(())
}
