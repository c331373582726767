#![deny(unsafe_code)]

//! Scratchlight CLI — one-shot and live wiki scratching from the terminal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scratchlight_config::AppConfig;
use scratchlight_core::search::ScratchService;
use scratchlight_core::snippet::{build_snippet, clamp_limit, decompose};
use scratchlight_core::spotlight::{SpotlightController, SpotlightDisplay};
use scratchlight_core::wiki::WikiClient;

/// Scratchlight — scratch a wiki for a term and spotlight it in context.
#[derive(Parser)]
#[command(name = "scratchlight", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "scratchlight.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print every clip with its spotlight line.
    Search {
        /// Term to search for.
        term: String,

        /// Result limit; junk or out-of-range input falls back to sane values.
        #[arg(short, long, default_value = "")]
        limit: String,
    },

    /// Run the live spotlight rotation in the terminal until Ctrl-C.
    Watch {
        /// Term to search for.
        term: String,

        /// Result limit; junk or out-of-range input falls back to sane values.
        #[arg(short, long, default_value = "")]
        limit: String,
    },

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing subscriber with verbosity level
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Search { term, limit } => cmd_search(&cli.config, &term, &limit).await?,
        Commands::Watch { term, limit } => cmd_watch(&cli.config, &term, &limit).await?,
        Commands::Config { show } => cmd_config(&cli.config, show).await?,
    }

    Ok(())
}

async fn cmd_search(config_path: &Path, term: &str, limit: &str) -> Result<()> {
    let config = load_config(config_path).await?;
    let term = term.trim();
    if term.is_empty() {
        println!("Type a word to begin.");
        return Ok(());
    }

    let client = WikiClient::new(&config.api)?;
    let limit = clamp_limit(limit);

    let hits = client.search(term, limit).await?;
    if hits.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    let titles: Vec<String> = hits.into_iter().map(|hit| hit.title).collect();
    let pages = client.extracts(&titles).await?;

    let mut shown = 0;
    for page in &pages {
        let Some(extract) = page.extract.as_deref() else {
            continue;
        };
        let snippet = build_snippet(extract, term);
        let frame = decompose(&snippet, term);
        shown += 1;
        println!(
            "{:>3}. {}",
            shown,
            page.title.as_deref().unwrap_or("(untitled)")
        );
        println!("     {snippet}");
        println!("     {} [{}] {}", frame.left, frame.word, frame.right);
    }
    println!("Scratched {shown} pages.");
    Ok(())
}

async fn cmd_watch(config_path: &Path, term: &str, limit: &str) -> Result<()> {
    let config = load_config(config_path).await?;

    let client = WikiClient::new(&config.api)?;
    let spotlight = SpotlightController::new(Duration::from_millis(config.spotlight.interval_ms));
    let (service, handle) = ScratchService::new(client, spotlight);
    tokio::spawn(service.run());

    let mut status_rx = handle.status();
    let mut display_rx = handle.spotlight();

    handle.search(term, limit).await?;
    info!("watching; press Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", status_rx.borrow_and_update().as_str());
            }
            changed = display_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let display = display_rx.borrow_and_update().clone();
                if let SpotlightDisplay::Frame(frame) = display {
                    println!("  {} [{}] {}", frame.left, frame.word, frame.right);
                }
            }
        }
    }

    handle.shutdown().await.ok();
    Ok(())
}

async fn cmd_config(config_path: &Path, show: bool) -> Result<()> {
    let config = load_config(config_path).await?;
    if show {
        let toml_str =
            toml::to_string_pretty(&config).map_err(|e| anyhow::anyhow!("TOML error: {e}"))?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

async fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::load(path).await.map_err(|e| anyhow::anyhow!(e))
    } else {
        info!(path = %path.display(), "config file not found, using defaults");
        Ok(AppConfig::default())
    }
}
