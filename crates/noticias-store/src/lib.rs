//! Noticias Storage Layer
//!
//! Implements the ArticleStore trait on top of SQLite.
//!
//! # Architecture
//!
//! - One `articles` table; the row id is the article id
//! - `extracted_at` is written once by `create` and never touched by `update`
//! - Listing is newest first, ties broken by id so insertion order is kept
//!
//! # Examples
//!
//! ```no_run
//! use noticias_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for article operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use noticias_domain::traits::ArticleStore;
use noticias_domain::{Article, ArticleFields, ArticleId, ArticleUpdate, NewArticle, ValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Field validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const SELECT_ARTICLE: &str =
    "SELECT id, title, description, link, source, extracted_at FROM articles";

/// SQLite-based implementation of ArticleStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share one store behind a
/// `Mutex`, or give each thread its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use noticias_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("noticias.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn article_from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
        Ok(Article {
            id: ArticleId::from_value(row.get(0)?),
            title: row.get(1)?,
            description: row.get(2)?,
            link: row.get(3)?,
            source: row.get(4)?,
            extracted_at: row.get::<_, DateTime<Utc>>(5)?,
        })
    }

    fn to_count(value: i64) -> Result<usize, StoreError> {
        usize::try_from(value)
            .map_err(|_| StoreError::InvalidData(format!("Negative count: {}", value)))
    }

    fn insert(&mut self, fields: ArticleFields) -> Result<Article, StoreError> {
        let extracted_at = Utc::now();
        self.conn.execute(
            "INSERT INTO articles (title, description, link, source, extracted_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &fields.title,
                &fields.description,
                &fields.link,
                &fields.source,
                extracted_at,
            ],
        )?;

        Ok(Article {
            id: ArticleId::from_value(self.conn.last_insert_rowid()),
            title: fields.title,
            description: fields.description,
            link: fields.link,
            source: fields.source,
            extracted_at,
        })
    }
}

impl ArticleStore for SqliteStore {
    type Error = StoreError;

    fn create(&mut self, article: NewArticle) -> Result<Article, Self::Error> {
        let fields = article.into_fields()?;
        self.insert(fields)
    }

    fn get(&self, id: ArticleId) -> Result<Option<Article>, Self::Error> {
        let article = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_ARTICLE),
                params![id.value()],
                Self::article_from_row,
            )
            .optional()?;

        Ok(article)
    }

    fn list(&self) -> Result<Vec<Article>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY extracted_at DESC, id DESC", SELECT_ARTICLE))?;

        let articles = stmt
            .query_map([], Self::article_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(articles)
    }

    fn update(&mut self, id: ArticleId, update: ArticleUpdate) -> Result<Option<Article>, Self::Error> {
        let tx = self.conn.transaction()?;

        let current = tx
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_ARTICLE),
                params![id.value()],
                Self::article_from_row,
            )
            .optional()?;

        let Some(current) = current else {
            return Ok(None);
        };

        let fields = update.apply_to(&current)?;
        tx.execute(
            "UPDATE articles SET title = ?1, description = ?2, link = ?3, source = ?4 WHERE id = ?5",
            params![
                &fields.title,
                &fields.description,
                &fields.link,
                &fields.source,
                id.value(),
            ],
        )?;
        tx.commit()?;

        Ok(Some(Article {
            id,
            title: fields.title,
            description: fields.description,
            link: fields.link,
            source: fields.source,
            extracted_at: current.extracted_at,
        }))
    }

    fn delete(&mut self, id: ArticleId) -> Result<bool, Self::Error> {
        let removed = self
            .conn
            .execute("DELETE FROM articles WHERE id = ?1", params![id.value()])?;
        Ok(removed > 0)
    }

    fn delete_all(&mut self) -> Result<usize, Self::Error> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM articles", [])?;
        tx.commit()?;
        Ok(removed)
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Self::to_count(count)
    }

    fn distinct_source_count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT source) FROM articles WHERE source IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Self::to_count(count)
    }
}
