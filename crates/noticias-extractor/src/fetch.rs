//! PageFetcher implementations

use crate::config::IngestConfig;
use crate::error::FetchError;
use noticias_domain::traits::PageFetcher;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Fetches pages over HTTP(S) with a fixed User-Agent and timeout
///
/// Blocking; the runner calls it from `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with an explicit User-Agent and timeout
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Create a fetcher from ingestion configuration
    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(config.user_agent.clone(), config.timeout())
    }

    /// The timeout applied to the whole request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl PageFetcher for HttpFetcher {
    type Error = FetchError;

    fn fetch(&self, url: &str) -> Result<String, Self::Error> {
        // Built per call: a blocking client must not be dropped inside a runtime
        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()?;

        debug!("GET {}", url);
        let response = client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Fetcher returning a canned response without touching the network
///
/// # Examples
///
/// ```
/// use noticias_extractor::{FetchError, StaticFetcher};
/// use noticias_domain::traits::PageFetcher;
///
/// let fetcher = StaticFetcher::ok("<html></html>");
/// assert_eq!(fetcher.fetch("https://g1.globo.com/").unwrap(), "<html></html>");
/// assert_eq!(fetcher.requested_urls(), vec!["https://g1.globo.com/".to_string()]);
///
/// let failing = StaticFetcher::failing(FetchError::Status(503));
/// assert!(failing.fetch("https://g1.globo.com/").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    response: Result<String, FetchError>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    /// Always answer with `body`
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            response: Ok(body.into()),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail with `error`
    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Err(error),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs passed to `fetch`, in call order
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl PageFetcher for StaticFetcher {
    type Error = FetchError;

    fn fetch(&self, url: &str) -> Result<String, Self::Error> {
        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
        self.response.clone()
    }
}
