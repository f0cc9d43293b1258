//! Article module - the record persisted for every scraped headline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::fields::{
    normalize_description, normalize_link, normalize_source, normalize_title, ValidationError,
};

/// Unique identifier for an article, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(i64);

impl ArticleId {
    /// Wrap a raw row identifier
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArticleId {
    type Err = String;

    /// Parse an id from its decimal form
    ///
    /// # Examples
    ///
    /// ```
    /// use noticias_domain::ArticleId;
    ///
    /// let id: ArticleId = "42".parse().unwrap();
    /// assert_eq!(id.value(), 42);
    /// assert!("abc".parse::<ArticleId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid article id '{}': {}", s, e))
    }
}

/// A stored article summary
///
/// `id` and `extracted_at` are owned by the store: both are assigned once,
/// at insertion, and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: ArticleId,

    /// Headline, at most 500 characters
    pub title: String,

    /// Summary text, or the placeholder when the page had none
    pub description: String,

    /// Absolute link to the full story, empty when unknown
    pub link: String,

    /// Label of the site the article came from
    pub source: String,

    /// When the record was created
    pub extracted_at: DateTime<Utc>,
}

/// The normalized, validated field set written by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    /// Truncated, non-blank title
    pub title: String,
    /// Truncated description or placeholder
    pub description: String,
    /// Truncated absolute URL or empty
    pub link: String,
    /// Truncated source label or default
    pub source: String,
}

/// Input for creating an article
///
/// Every field except `title` is optional; missing ones fall back to the
/// defaults in [`crate::fields`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    /// Headline (required, may exceed the limit; it is truncated)
    #[serde(default)]
    pub title: String,

    /// Optional summary text
    #[serde(default)]
    pub description: Option<String>,

    /// Optional absolute link
    #[serde(default)]
    pub link: Option<String>,

    /// Optional source label
    #[serde(default)]
    pub source: Option<String>,
}

impl NewArticle {
    /// Create an input with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the link
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Truncate, apply defaults and validate
    ///
    /// # Examples
    ///
    /// ```
    /// use noticias_domain::NewArticle;
    ///
    /// let fields = NewArticle::new("Chuva forte atinge a capital").into_fields().unwrap();
    /// assert_eq!(fields.description, "Sem descrição");
    /// assert_eq!(fields.source, "G1");
    /// assert_eq!(fields.link, "");
    /// ```
    pub fn into_fields(self) -> Result<ArticleFields, ValidationError> {
        Ok(ArticleFields {
            title: normalize_title(&self.title)?,
            description: normalize_description(self.description.as_deref()),
            link: normalize_link(self.link.as_deref())?,
            source: normalize_source(self.source.as_deref()),
        })
    }
}

/// Input for updating an article
///
/// A partial update carries only the fields to change. A full update is
/// built from a [`NewArticle`], which resets omitted optional fields to
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    /// New headline
    #[serde(default)]
    pub title: Option<String>,
    /// New summary text
    #[serde(default)]
    pub description: Option<String>,
    /// New link
    #[serde(default)]
    pub link: Option<String>,
    /// New source label
    #[serde(default)]
    pub source: Option<String>,
}

impl ArticleUpdate {
    /// Merge into `current` and normalize the result
    pub fn apply_to(self, current: &Article) -> Result<ArticleFields, ValidationError> {
        NewArticle {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            description: Some(self.description.unwrap_or_else(|| current.description.clone())),
            link: Some(self.link.unwrap_or_else(|| current.link.clone())),
            source: Some(self.source.unwrap_or_else(|| current.source.clone())),
        }
        .into_fields()
    }
}

impl From<NewArticle> for ArticleUpdate {
    fn from(article: NewArticle) -> Self {
        Self {
            title: Some(article.title),
            description: Some(article.description.unwrap_or_default()),
            link: Some(article.link.unwrap_or_default()),
            source: Some(article.source.unwrap_or_default()),
        }
    }
}

/// Aggregate counts over the whole store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of stored articles
    #[serde(rename = "total_noticias")]
    pub total_records: usize,

    /// Number of distinct source labels
    #[serde(rename = "total_fontes")]
    pub distinct_sources: usize,
}
