//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Noticias CLI - Scrape news headlines and manage the stored records.
#[derive(Debug, Parser)]
#[command(name = "noticias")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true, env = "NOTICIAS_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape a listing page into the store
    Scrape(ScrapeArgs),

    /// List stored articles, newest first
    List(ListArgs),

    /// Show article and source counts
    Stats,

    /// Delete every stored article
    Clear,
}

/// Arguments for the scrape command.
#[derive(Debug, Parser)]
pub struct ScrapeArgs {
    /// Listing page to scrape (defaults to the configured URL)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Delete every stored article before scraping
    #[arg(long, alias = "limpar")]
    pub clear: bool,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only articles from this source
    #[arg(short, long)]
    pub source: Option<String>,

    /// Only articles whose title or description contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
