//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Article, ArticleId, ArticleUpdate, NewArticle, Statistics};

/// Trait for storing and retrieving articles
///
/// Implemented by the infrastructure layer (noticias-store). Each call is
/// atomic on its own; sequences of calls are not.
pub trait ArticleStore {
    /// Error type for store operations
    type Error;

    /// Normalize, validate and insert a new article
    ///
    /// The store assigns `id` and `extracted_at`.
    fn create(&mut self, article: NewArticle) -> Result<Article, Self::Error>;

    /// Get an article by ID
    fn get(&self, id: ArticleId) -> Result<Option<Article>, Self::Error>;

    /// List every article, newest first
    fn list(&self) -> Result<Vec<Article>, Self::Error>;

    /// Apply an update; `None` if the article does not exist
    fn update(&mut self, id: ArticleId, update: ArticleUpdate) -> Result<Option<Article>, Self::Error>;

    /// Delete one article; `false` if it did not exist
    fn delete(&mut self, id: ArticleId) -> Result<bool, Self::Error>;

    /// Delete every article, returning how many were removed
    ///
    /// All-or-nothing: on failure no article is removed.
    fn delete_all(&mut self) -> Result<usize, Self::Error>;

    /// Number of stored articles
    fn count(&self) -> Result<usize, Self::Error>;

    /// Number of distinct source labels
    fn distinct_source_count(&self) -> Result<usize, Self::Error>;

    /// Both aggregate counts at once
    fn statistics(&self) -> Result<Statistics, Self::Error> {
        Ok(Statistics {
            total_records: self.count()?,
            distinct_sources: self.distinct_source_count()?,
        })
    }
}

/// Trait for downloading a page
///
/// Implemented by the application layer (noticias-extractor). Calls block
/// until the body arrives or the implementation's timeout expires.
pub trait PageFetcher {
    /// Error type for fetch operations
    type Error;

    /// Fetch `url` and return the decoded body of a successful response
    fn fetch(&self, url: &str) -> Result<String, Self::Error>;
}
