//! Noticias Domain Layer
//!
//! This crate contains the domain model for Noticias: the article record
//! persisted for every scraped headline, the field limits and defaults that
//! every entry point applies, and the trait interfaces the infrastructure
//! crates implement.
//!
//! ## Key Concepts
//!
//! - **Article**: a stored news summary (title, description, link, source)
//!   stamped with the moment it was extracted
//! - **Fields**: per-field character limits, placeholder description and
//!   default source label
//! - **Traits**: `ArticleStore` (the record store) and `PageFetcher` (the
//!   network boundary used by ingestion)
//!
//! ## Architecture
//!
//! - Pure model and validation logic only
//! - Storage, HTTP and scraping live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod article;
pub mod fields;
pub mod traits;

// Re-exports for convenience
pub use article::{Article, ArticleFields, ArticleId, ArticleUpdate, NewArticle, Statistics};
pub use fields::ValidationError;
