//! Crawl diagnostics
//!
//! Counters that make fetch failures and budget starvation observable without
//! changing how the crawl proceeds. The scheduler treats every failure as
//! "zero new links"; these counters are the only place the difference shows.

use crate::crawler::fetcher::FetchOutcome;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Log a progress line every this many fetched pages
const PROGRESS_INTERVAL: usize = 10;

/// Shared counters for one crawl run
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicUsize,
    http_failures: AtomicUsize,
    network_failures: AtomicUsize,
    links_promoted: AtomicUsize,
    links_starved: AtomicUsize,
}

/// Point-in-time copy of [`CrawlStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Pages whose body was retrieved
    pub pages_fetched: usize,

    /// Fetches answered with a non-success status
    pub http_failures: usize,

    /// Fetches that failed before a status was received
    pub network_failures: usize,

    /// URLs newly inserted into the visited set by page extraction
    pub links_promoted: usize,

    /// Promoted URLs that were never fetched for lack of worker budget
    pub links_starved: usize,
}

impl StatsSnapshot {
    /// Total number of fetch attempts
    pub fn fetch_attempts(&self) -> usize {
        self.pages_fetched + self.http_failures + self.network_failures
    }
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a single fetch
    pub fn record_fetch(&self, url: &str, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Success { .. } => {
                let fetched = self.pages_fetched.fetch_add(1, Ordering::Relaxed) + 1;
                if fetched % PROGRESS_INTERVAL == 0 {
                    tracing::info!(
                        "Progress: {} pages fetched, {} links promoted",
                        fetched,
                        self.links_promoted.load(Ordering::Relaxed)
                    );
                }
            }
            FetchOutcome::HttpFailure { status } => {
                self.http_failures.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("HTTP {} for {}", status, url);
            }
            FetchOutcome::NetworkFailure { error } => {
                self.network_failures.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Network failure for {}: {}", url, error);
            }
        }
    }

    pub fn record_promoted(&self, count: usize) {
        self.links_promoted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_starved(&self, count: usize) {
        self.links_starved.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            http_failures: self.http_failures.load(Ordering::Relaxed),
            network_failures: self.network_failures.load(Ordering::Relaxed),
            links_promoted: self.links_promoted.load(Ordering::Relaxed),
            links_starved: self.links_starved.load(Ordering::Relaxed),
        }
    }
}
