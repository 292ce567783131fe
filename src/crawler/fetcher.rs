//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with timeouts and redirect policy
//! - Attaching freshly generated headers to every GET request
//! - Classifying the response into a fetch outcome
//!
//! Fetching never returns an error. Connection problems, timeouts and
//! non-success statuses are all reported through [`FetchOutcome`].

use crate::config::CrawlerConfig;
use crate::crawler::headers::HeaderGenerator;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpFailure {
        /// The HTTP status code
        status: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkFailure {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Returns true if the page body was retrieved
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Capability to retrieve one page
///
/// Implementations must report failures through the outcome instead of
/// panicking or blocking forever.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url`
    async fn fetch(&self, url: &Url) -> FetchOutcome;
}

/// Builds an HTTP client with proper configuration
///
/// Headers are attached per request, so the client itself carries no
/// default user agent.
///
/// # Example
///
/// ```no_run
/// use sitesweep::config::CrawlerConfig;
/// use sitesweep::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP with rotating request headers
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    headers: HeaderGenerator,
}

impl HttpFetcher {
    /// Creates a fetcher from an existing client and header generator
    pub fn new(client: Client, headers: HeaderGenerator) -> Self {
        Self { client, headers }
    }

    fn request_headers(&self) -> HeaderMap {
        self.headers.generate(&mut rand::rng())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        let headers = self.request_headers();
        fetch_url(&self.client, url.as_str(), headers).await
    }
}

/// Issues a GET request and classifies the response
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | 2xx with readable body | Success |
/// | Any other status | HttpFailure |
/// | Timeout | NetworkFailure |
/// | Connection refused / DNS / TLS | NetworkFailure |
/// | Body read failure | NetworkFailure |
pub async fn fetch_url(client: &Client, url: &str, headers: HeaderMap) -> FetchOutcome {
    let response = match client.get(url).headers(headers).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpFailure {
            status: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Success { body },
        Err(e) => classify_error(&e),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchOutcome {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchOutcome::NetworkFailure { error }
}
