//! Request and report types for ingestion runs

use noticias_domain::ArticleId;
use serde::Serialize;

/// Request to scrape one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionRequest {
    /// Listing page to fetch
    pub url: String,

    /// Delete every stored article before fetching
    pub clear_first: bool,
}

impl IngestionRequest {
    /// Scrape `url` without clearing the store
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            clear_first: false,
        }
    }

    /// Set whether the store is cleared first
    pub fn clearing(mut self, clear_first: bool) -> Self {
        self.clear_first = clear_first;
        self
    }
}

/// What happened to one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// Persisted
    Saved {
        /// Store-assigned ID
        id: ArticleId,
        /// Stored title
        title: String,
    },

    /// Rejected by the store; the run went on
    Failed {
        /// Candidate title
        title: String,
        /// Error text
        reason: String,
    },
}

/// Whether the page was fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum RunStatus {
    /// Page fetched and every candidate attempted
    Completed,

    /// Page fetch failed; nothing was saved
    FetchFailed(String),
}

/// Summary of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    /// URL that was scraped
    pub url: String,

    /// Fetch outcome
    pub status: RunStatus,

    /// Records removed before fetching, when clearing was requested
    pub cleared: Option<usize>,

    /// Containers considered (at most 15)
    pub candidates: usize,

    /// Containers skipped for a missing or short title
    pub skipped: usize,

    /// One entry per candidate that reached the store, in page order
    pub items: Vec<ItemOutcome>,

    /// Articles persisted in this run
    pub saved: usize,

    /// Store size after the run
    pub total: usize,

    /// Wall-clock duration of the run
    pub processing_time_ms: u64,
}

impl IngestionReport {
    /// True when the page was fetched
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Candidates the store rejected
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items
            .iter()
            .filter(|item| matches!(item, ItemOutcome::Failed { .. }))
    }
}
