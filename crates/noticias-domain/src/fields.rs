//! Field limits, defaults and validation shared by every entry point
//!
//! Both the ingestion runner and the HTTP API funnel their input through
//! these helpers, so a record looks the same no matter who created it.

use thiserror::Error;

/// Maximum title length, in characters
pub const TITLE_MAX_CHARS: usize = 500;

/// Maximum description length, in characters
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Maximum link length, in characters
pub const LINK_MAX_CHARS: usize = 1000;

/// Maximum source label length, in characters
pub const SOURCE_MAX_CHARS: usize = 200;

/// Stored in place of a missing or empty description
pub const PLACEHOLDER_DESCRIPTION: &str = "Sem descrição";

/// Source label used when none is given
pub const DEFAULT_SOURCE: &str = "G1";

/// Errors raised when a record's fields are unacceptable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty or whitespace only
    #[error("{0}: this field may not be blank")]
    Blank(&'static str),

    /// A link that is neither empty nor an absolute URL
    #[error("{field}: enter a valid URL ({value})")]
    InvalidUrl {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: String,
    },
}

impl ValidationError {
    /// Name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Blank(field) => field,
            ValidationError::InvalidUrl { field, .. } => field,
        }
    }
}

/// Truncate `value` to at most `max` characters.
///
/// Counts Unicode scalar values, not bytes, so accented headlines are never
/// split inside a code point.
///
/// # Examples
///
/// ```
/// use noticias_domain::fields::truncate_chars;
///
/// assert_eq!(truncate_chars("ação rápida", 4), "ação");
/// assert_eq!(truncate_chars("curto", 100), "curto");
/// ```
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// Normalize a title: trimmed, truncated to [`TITLE_MAX_CHARS`], must not be blank.
pub fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::Blank("title"));
    }
    Ok(truncate_chars(title, TITLE_MAX_CHARS))
}

/// Normalize a description: blank or absent becomes the placeholder.
pub fn normalize_description(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.trim().is_empty() => truncate_chars(text, DESCRIPTION_MAX_CHARS),
        _ => PLACEHOLDER_DESCRIPTION.to_string(),
    }
}

/// Normalize a link: absent becomes empty, anything else must be an
/// absolute URL once truncated to [`LINK_MAX_CHARS`].
pub fn normalize_link(link: Option<&str>) -> Result<String, ValidationError> {
    let link = truncate_chars(link.unwrap_or_default().trim(), LINK_MAX_CHARS);
    if link.is_empty() {
        return Ok(link);
    }
    match url::Url::parse(&link) {
        Ok(_) => Ok(link),
        Err(_) => Err(ValidationError::InvalidUrl {
            field: "link",
            value: link,
        }),
    }
}

/// Normalize a source label: blank or absent becomes [`DEFAULT_SOURCE`].
pub fn normalize_source(source: Option<&str>) -> String {
    match source {
        Some(label) if !label.trim().is_empty() => truncate_chars(label, SOURCE_MAX_CHARS),
        _ => DEFAULT_SOURCE.to_string(),
    }
}
