//! Core IngestionRunner implementation

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::extract::{scan, CandidateArticle};
use crate::types::{IngestionReport, IngestionRequest, ItemOutcome, RunStatus};
use noticias_domain::traits::{ArticleStore, PageFetcher};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Scrapes a listing page and writes every candidate to the store
pub struct IngestionRunner<F, S>
where
    F: PageFetcher,
    S: ArticleStore,
{
    fetcher: Arc<F>,
    store: Arc<Mutex<S>>,
    config: IngestConfig,
}

impl<F, S> IngestionRunner<F, S>
where
    F: PageFetcher + Send + Sync + 'static,
    F::Error: std::fmt::Display,
    S: ArticleStore,
    S::Error: std::fmt::Display,
{
    /// Create a runner over a shared store
    pub fn new(fetcher: F, store: Arc<Mutex<S>>, config: IngestConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            store,
            config,
        }
    }

    /// The shared store handle
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Run one ingestion.
    ///
    /// A failed fetch is not an error: the report comes back with
    /// [`RunStatus::FetchFailed`] and nothing saved. A candidate the store
    /// rejects is recorded as [`ItemOutcome::Failed`] and the run goes on.
    /// Only clearing or counting the store can fail the whole call.
    pub async fn run(&self, request: &IngestionRequest) -> Result<IngestionReport, IngestError> {
        let start = Instant::now();

        info!("Starting ingestion from {}", request.url);

        let cleared = if request.clear_first {
            let removed = self.with_store(|store| store.delete_all())?;
            info!("Cleared {} existing articles", removed);
            Some(removed)
        } else {
            None
        };

        let html = match self.fetch_page(&request.url).await {
            Ok(html) => html,
            Err(reason) => {
                error!("Failed to fetch {}: {}", request.url, reason);
                let total = self.with_store(|store| store.count())?;
                return Ok(IngestionReport {
                    url: request.url.clone(),
                    status: RunStatus::FetchFailed(reason),
                    cleared,
                    candidates: 0,
                    skipped: 0,
                    items: Vec::new(),
                    saved: 0,
                    total,
                    processing_time_ms: elapsed_ms(start),
                });
            }
        };

        debug!("Page length: {} bytes", html.len());

        let outcomes = scan(&html, &request.url);
        let candidates = outcomes.len();
        let mut skipped = 0;
        let mut items = Vec::new();

        for outcome in outcomes {
            let candidate = match outcome {
                Ok(candidate) => candidate,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };

            let title = candidate.title.clone();
            match self.process_candidate(candidate) {
                Ok(item) => items.push(item),
                Err(reason) => {
                    warn!("Failed to save '{}': {}", title, reason);
                    items.push(ItemOutcome::Failed { title, reason });
                }
            }
        }

        let saved = items
            .iter()
            .filter(|item| matches!(item, ItemOutcome::Saved { .. }))
            .count();
        let total = self.with_store(|store| store.count())?;

        info!(
            "Ingestion complete: {} saved, {} skipped, {} failed, {} total",
            saved,
            skipped,
            items.len() - saved,
            total
        );

        Ok(IngestionReport {
            url: request.url.clone(),
            status: RunStatus::Completed,
            cleared,
            candidates,
            skipped,
            items,
            saved,
            total,
            processing_time_ms: elapsed_ms(start),
        })
    }

    /// Persist a single candidate
    fn process_candidate(&self, candidate: CandidateArticle) -> Result<ItemOutcome, String> {
        let article = candidate.into_new_article(&self.config.source_label);

        let mut store = self
            .store
            .lock()
            .map_err(|e| format!("Store lock error: {}", e))?;
        let stored = store
            .create(article)
            .map_err(|e| format!("Store error: {}", e))?;

        debug!("Saved article {}: {}", stored.id, stored.title);

        Ok(ItemOutcome::Saved {
            id: stored.id,
            title: stored.title,
        })
    }

    /// Call the fetcher off the async runtime
    async fn fetch_page(&self, url: &str) -> Result<String, String> {
        let fetcher = Arc::clone(&self.fetcher);
        let url = url.to_string();

        // PageFetcher is blocking
        tokio::task::spawn_blocking(move || fetcher.fetch(&url).map_err(|e| e.to_string()))
            .await
            .map_err(|e| format!("Task join error: {}", e))?
    }

    fn with_store<T>(
        &self,
        op: impl FnOnce(&mut S) -> Result<T, S::Error>,
    ) -> Result<T, IngestError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| IngestError::Lock(e.to_string()))?;
        op(&mut *store).map_err(|e| IngestError::Store(e.to_string()))
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
