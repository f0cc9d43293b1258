//! Scrape command implementation.

use crate::cli::ScrapeArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use noticias_domain::traits::{ArticleStore, PageFetcher};
use noticias_extractor::{IngestConfig, IngestionReport, IngestionRequest, IngestionRunner, RunStatus};
use std::sync::{Arc, Mutex};

/// Execute the scrape command.
///
/// Per-item failures are printed and the run continues; a failed page
/// fetch is returned as [`CliError::FetchFailed`] after the report.
pub async fn execute_scrape<F, S>(
    args: ScrapeArgs,
    fetcher: F,
    store: Arc<Mutex<S>>,
    config: &IngestConfig,
    formatter: &Formatter,
) -> Result<IngestionReport>
where
    F: PageFetcher + Send + Sync + 'static,
    F::Error: std::fmt::Display,
    S: ArticleStore,
    S::Error: std::fmt::Display,
{
    let url = args.url.unwrap_or_else(|| config.default_url.clone());
    if url::Url::parse(&url).is_err() {
        return Err(CliError::InvalidInput(format!("Not an absolute URL: {}", url)));
    }

    if formatter.format() == OutputFormat::Table {
        println!("{}", formatter.banner("NOTICIAS WEB SCRAPER"));
    }

    let runner = IngestionRunner::new(fetcher, store, config.clone());
    let report = runner
        .run(&IngestionRequest::new(url).clearing(args.clear))
        .await?;

    println!("{}", formatter.ingestion_report(&report)?);

    if let RunStatus::FetchFailed(reason) = &report.status {
        return Err(CliError::FetchFailed(reason.clone()));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use noticias_extractor::{FetchError, StaticFetcher};
    use noticias_store::SqliteStore;

    fn store() -> Arc<Mutex<SqliteStore>> {
        Arc::new(Mutex::new(SqliteStore::new(":memory:").unwrap()))
    }

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Table, false)
    }

    #[tokio::test]
    async fn test_scrape_uses_configured_url() {
        let fetcher = StaticFetcher::ok(
            r#"<div class="post"><h2>Manchete raspada com sucesso</h2></div>"#,
        );
        let args = ScrapeArgs { url: None, clear: false };

        let report = execute_scrape(args, fetcher.clone(), store(), &IngestConfig::default(), &formatter())
            .await
            .unwrap();

        assert_eq!(report.saved, 1);
        assert_eq!(fetcher.requested_urls(), vec!["https://g1.globo.com/"]);
    }

    #[tokio::test]
    async fn test_scrape_fetch_failure_is_error() {
        let fetcher = StaticFetcher::failing(FetchError::Timeout);
        let args = ScrapeArgs {
            url: Some("https://example.com/".to_string()),
            clear: false,
        };

        let result = execute_scrape(args, fetcher, store(), &IngestConfig::default(), &formatter()).await;

        assert!(matches!(result, Err(CliError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn test_failed_fetch_report_has_summary() {
        let runner = IngestionRunner::new(
            StaticFetcher::failing(FetchError::Status(500)),
            store(),
            IngestConfig::default(),
        );
        let report = runner
            .run(&IngestionRequest::new("https://g1.globo.com/"))
            .await
            .unwrap();

        let output = formatter().ingestion_report(&report).unwrap();

        assert!(output.contains("✗ Scrape failed: HTTP status 500"));
        assert!(output.contains("✓ 0 saved"));
        assert!(output.contains("✓ Total in store: 0"));
    }

    #[tokio::test]
    async fn test_scrape_rejects_relative_url() {
        let fetcher = StaticFetcher::ok("");
        let args = ScrapeArgs {
            url: Some("/noticias".to_string()),
            clear: false,
        };

        let result = execute_scrape(args, fetcher.clone(), store(), &IngestConfig::default(), &formatter()).await;

        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(fetcher.requested_urls().is_empty());
    }
}
