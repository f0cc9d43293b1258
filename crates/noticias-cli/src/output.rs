//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use noticias_domain::{Article, Statistics};
use noticias_extractor::{IngestionReport, ItemOutcome, RunStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Width of titles in the article table
pub const LIST_TITLE_CHARS: usize = 50;

/// Width of titles in scrape progress lines
pub const SCRAPE_TITLE_CHARS: usize = 60;

const RULE_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format articles output.
    pub fn format_articles(&self, articles: &[Article]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(articles)?),
            OutputFormat::Table => Ok(self.format_articles_table(articles)),
        }
    }

    fn format_articles_table(&self, articles: &[Article]) -> String {
        if articles.is_empty() {
            return self.colorize("No articles found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Source", "Extracted At"]);

        for article in articles {
            builder.push_record([
                article.id.to_string(),
                shorten(&article.title, LIST_TITLE_CHARS),
                article.source.clone(),
                article.extracted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format aggregate counts.
    pub fn format_statistics(&self, stats: &Statistics) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                builder.push_record(["total_noticias".to_string(), stats.total_records.to_string()]);
                builder.push_record(["total_fontes".to_string(), stats.distinct_sources.to_string()]);

                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Heading printed before a scrape.
    pub fn banner(&self, title: &str) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!("\n{}\n{}\n{}\n", rule, self.colorize(title, "green"), rule)
    }

    /// One progress line per candidate.
    pub fn item_outcome(&self, item: &ItemOutcome) -> String {
        match item {
            ItemOutcome::Saved { title, .. } => self.success(&shorten(title, SCRAPE_TITLE_CHARS)),
            ItemOutcome::Failed { title, reason } => self.error(&format!(
                "Failed to save '{}': {}",
                shorten(title, SCRAPE_TITLE_CHARS),
                reason
            )),
        }
    }

    /// Every line of a finished scrape, from the cleared count to the totals.
    pub fn ingestion_report(&self, report: &IngestionReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(report)?);
        }

        let mut lines = Vec::new();

        if let Some(cleared) = report.cleared {
            lines.push(self.warning(&format!("{} old articles deleted", cleared)));
        }

        lines.push(format!("Fetching: {}", report.url));

        match &report.status {
            RunStatus::FetchFailed(reason) => {
                lines.push(self.error(&format!("Scrape failed: {}", reason)));
            }
            RunStatus::Completed => {
                lines.extend(report.items.iter().map(|item| self.item_outcome(item)));
                if report.skipped > 0 {
                    lines.push(self.info(&format!("{} entries skipped (no usable title)", report.skipped)));
                }
            }
        }

        lines.push(String::new());
        lines.push("=".repeat(RULE_WIDTH));
        lines.push(self.success(&format!("{} saved", report.saved)));
        lines.push(self.success(&format!("Total in store: {}", report.total)));
        lines.push("=".repeat(RULE_WIDTH));

        Ok(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Cut `text` to `max` characters, marking the cut with "..."
pub fn shorten(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
