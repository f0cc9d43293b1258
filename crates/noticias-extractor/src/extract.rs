//! The listing-page heuristic
//!
//! Tier 1 looks for `article`/`div` containers carrying a news class. Only
//! when tier 1 finds nothing does tier 2 take every `h2`/`h3` instead; the
//! two are never merged.

use noticias_domain::fields::{truncate_chars, DESCRIPTION_MAX_CHARS, LINK_MAX_CHARS, TITLE_MAX_CHARS};
use noticias_domain::NewArticle;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::html::{clean_text, first_descendant_matching, first_descendant_with_attr, select_all};

/// At most this many containers are read per page
pub const MAX_CANDIDATES: usize = 15;

/// Titles shorter than this (in characters) are navigation noise
pub const MIN_TITLE_CHARS: usize = 10;

const CONTAINER_TAGS: &[&str] = &["article", "div"];
const CONTAINER_CLASSES: &[&str] = &["news-article", "noticia", "post", "article", "news-item"];
const HEADING_TAGS: &[&str] = &["h2", "h3"];
const TITLE_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "a"];
const DESCRIPTION_TAGS: &[&str] = &["p", "span", "div"];
const DESCRIPTION_CLASSES: &[&str] = &["summary", "description", "excerpt", "resumo"];

/// A tentative article read from the page, before persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateArticle {
    /// Trimmed title text, at least [`MIN_TITLE_CHARS`] long
    pub title: String,
    /// Absolute link, or empty when the container had none
    pub link: String,
    /// Trimmed description text, possibly empty
    pub description: String,
}

impl CandidateArticle {
    /// Build the store input, truncating every field and stamping `source`
    pub fn into_new_article(self, source: &str) -> NewArticle {
        NewArticle {
            title: truncate_chars(&self.title, TITLE_MAX_CHARS),
            description: Some(truncate_chars(&self.description, DESCRIPTION_MAX_CHARS)),
            link: Some(truncate_chars(&self.link, LINK_MAX_CHARS)),
            source: Some(source.to_string()),
        }
    }
}

/// Why a container did not become a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No heading or anchor inside the container
    MissingTitle,

    /// Title present but shorter than [`MIN_TITLE_CHARS`]
    TitleTooShort {
        /// The rejected title
        title: String,
    },
}

/// Extract candidate articles from `html`, in document order.
///
/// Never returns more than [`MAX_CANDIDATES`] entries, and every entry has a
/// title of at least [`MIN_TITLE_CHARS`] characters.
///
/// # Examples
///
/// ```
/// use noticias_extractor::extract;
///
/// let html = r#"<div class="post"><h2><a href="/materia/1">Chuva forte atinge a capital</a></h2></div>"#;
/// let candidates = extract(html, "https://g1.globo.com/");
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].link, "https://g1.globo.com/materia/1");
/// ```
pub fn extract(html: &str, base_url: &str) -> Vec<CandidateArticle> {
    scan(html, base_url).into_iter().filter_map(Result::ok).collect()
}

/// Like [`extract`], but keeps one outcome per container considered
pub fn scan(html: &str, base_url: &str) -> Vec<Result<CandidateArticle, SkipReason>> {
    let document = Html::parse_document(html);

    let mut containers: Vec<ElementRef<'_>> =
        select_all(&document, CONTAINER_TAGS, Some(CONTAINER_CLASSES)).collect();

    if containers.is_empty() {
        debug!("No article containers matched; falling back to headings");
        containers = select_all(&document, HEADING_TAGS, None).collect();
    }

    if containers.is_empty() {
        debug!("No headings either; page yields nothing");
    }

    containers
        .into_iter()
        .take(MAX_CANDIDATES)
        .enumerate()
        .map(|(position, container)| {
            let outcome = read_candidate(container, base_url);
            if let Err(reason) = &outcome {
                debug!(position, ?reason, "Skipping container");
            }
            outcome
        })
        .collect()
}

fn read_candidate(container: ElementRef<'_>, base_url: &str) -> Result<CandidateArticle, SkipReason> {
    let title = first_descendant_matching(container, TITLE_TAGS, None)
        .map(|element| clean_text(&element))
        .ok_or(SkipReason::MissingTitle)?;

    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(SkipReason::TitleTooShort { title });
    }

    let link = first_descendant_with_attr(container, "a", "href")
        .map(|(_, href)| resolve_link(href, base_url))
        .unwrap_or_default();

    let description = first_descendant_matching(container, DESCRIPTION_TAGS, Some(DESCRIPTION_CLASSES))
        .map(|element| clean_text(&element))
        .unwrap_or_default();

    Ok(CandidateArticle {
        title,
        link,
        description,
    })
}

/// Resolve `href` against `base_url`.
///
/// Anything that already parses as an absolute URL is kept as is. Otherwise
/// the trailing slashes of the base and the leading slashes of the path are
/// stripped and the two are joined with exactly one slash.
///
/// # Examples
///
/// ```
/// use noticias_extractor::resolve_link;
///
/// assert_eq!(resolve_link("/materia/1", "https://g1.globo.com/"), "https://g1.globo.com/materia/1");
/// assert_eq!(resolve_link("https://x.com/a", "https://g1.globo.com/"), "https://x.com/a");
/// ```
pub fn resolve_link(href: &str, base_url: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if url::Url::parse(href).is_ok() {
        return href.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}
