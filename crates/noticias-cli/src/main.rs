//! Noticias CLI - scrape news headlines and manage the stored records.

use clap::Parser;
use noticias_cli::commands;
use noticias_cli::{Cli, Command, Config, Formatter};
use noticias_extractor::HttpFetcher;
use noticias_store::SqliteStore;
use std::sync::{Arc, Mutex};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> noticias_cli::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let database_path = cli.db.clone().unwrap_or_else(|| config.database_path.clone());
    debug!("Using database {}", database_path.display());
    let mut store = SqliteStore::new(&database_path)?;

    match cli.command {
        Command::Scrape(args) => {
            let fetcher = HttpFetcher::from_config(&config.ingest);
            let store = Arc::new(Mutex::new(store));
            commands::execute_scrape(args, fetcher, store, &config.ingest, &formatter).await?;
        }
        Command::List(args) => {
            commands::execute_list(args, &store, &formatter)?;
        }
        Command::Stats => {
            commands::execute_stats(&store, &formatter)?;
        }
        Command::Clear => {
            commands::execute_clear(&mut store, &formatter)?;
        }
    }

    Ok(())
}
