//! Noticias Extractor
//!
//! Turns a news listing page into stored article records.
//!
//! # Overview
//!
//! Extraction is a best-effort scrape: one generic heuristic looks for
//! article containers by tag and class, falls back to headings when no
//! container matches, and reads a title, link and description out of each
//! of the first 15 candidates. Ingestion wraps that in a single blocking
//! fetch and writes every surviving candidate to the record store.
//!
//! # Architecture
//!
//! ```text
//! URL → PageFetcher → HTML → extract → candidates → ArticleStore
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use noticias_extractor::{HttpFetcher, IngestConfig, IngestionRequest, IngestionRunner};
//! use noticias_store::SqliteStore;
//! use std::sync::{Arc, Mutex};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IngestConfig::default();
//! let fetcher = HttpFetcher::from_config(&config);
//! let store = Arc::new(Mutex::new(SqliteStore::new("noticias.db")?));
//!
//! let runner = IngestionRunner::new(fetcher, store, config);
//! let report = runner
//!     .run(&IngestionRequest::new("https://g1.globo.com/").clearing(true))
//!     .await?;
//!
//! println!("Saved: {}", report.saved);
//! println!("Total: {}", report.total);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extract;
mod fetch;
pub mod html;
mod ingest;
mod types;


pub use config::IngestConfig;
pub use error::{FetchError, IngestError};
pub use extract::{
    extract, resolve_link, scan, CandidateArticle, SkipReason, MAX_CANDIDATES, MIN_TITLE_CHARS,
};
pub use fetch::{HttpFetcher, StaticFetcher};
pub use ingest::IngestionRunner;
pub use types::{IngestionReport, IngestionRequest, ItemOutcome, RunStatus};
