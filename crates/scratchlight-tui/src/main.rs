#![deny(unsafe_code)]

//! Scratchlight TUI — interactive terminal front end.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use scratchlight_config::AppConfig;
use scratchlight_core::logging::LogStore;
use scratchlight_core::search::{ScratchService, ScratchServiceHandle};
use scratchlight_core::spotlight::{SpotlightController, SpotlightDisplay};
use scratchlight_core::wiki::WikiClient;

mod app;
mod ui;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config (best-effort)
    let config_path = PathBuf::from("scratchlight.toml");
    let config = if config_path.exists() {
        AppConfig::load(&config_path)
            .await
            .unwrap_or_else(|_| AppConfig::default())
    } else {
        AppConfig::default()
    };

    // Log into the in-memory store only; stderr would fight the terminal UI.
    let store = LogStore::new(256);
    let log_view = store.view();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with(store)
        .init();

    info!("starting scratchlight TUI");

    let client = WikiClient::new(&config.api)?;
    let spotlight = SpotlightController::new(Duration::from_millis(config.spotlight.interval_ms));
    let (service, handle) = ScratchService::new(client, spotlight);
    tokio::spawn(service.run());

    let mut status_rx = handle.status();
    let mut term_rx = handle.current_term();
    let mut display_rx = handle.spotlight();

    // Set up terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(config.search.default_limit, log_view);

    let outcome = run_loop(
        &mut terminal,
        &mut app,
        &handle,
        &mut status_rx,
        &mut term_rx,
        &mut display_rx,
    )
    .await;

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    handle.shutdown().await.ok();

    outcome
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    handle: &ScratchServiceHandle,
    status_rx: &mut watch::Receiver<String>,
    term_rx: &mut watch::Receiver<String>,
    display_rx: &mut watch::Receiver<SpotlightDisplay>,
) -> Result<()> {
    while !app.should_quit {
        // Pull pending service updates before drawing.
        if status_rx.has_changed().unwrap_or(false) {
            app.set_status(status_rx.borrow_and_update().clone());
        }
        if term_rx.has_changed().unwrap_or(false) {
            app.set_current_term(term_rx.borrow_and_update().clone());
        }
        if display_rx.has_changed().unwrap_or(false) {
            app.set_display(display_rx.borrow_and_update().clone());
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(request) = app.handle_key(key) {
                        handle.search(request.term, request.limit).await?;
                    }
                }
            }
        }
    }

    Ok(())
}
