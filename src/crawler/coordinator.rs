//! Crawler coordinator - run-level orchestration
//!
//! This module wires a crawl run together:
//! - Validating the seed URL, worker ceiling and configuration
//! - Building the HTTP fetcher and the shared crawl context
//! - Recording the origin before the first fetch
//! - Driving the scheduler and collecting the final report

use crate::config::{validate, validate_seed_url, validate_workers, Config};
use crate::crawler::diagnostics::{CrawlStats, StatsSnapshot};
use crate::crawler::extract::CrawlContext;
use crate::crawler::fetcher::{build_http_client, HttpFetcher, PageFetcher};
use crate::crawler::headers::HeaderGenerator;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::visited::VisitedSet;
use crate::url::{normalize_origin, LinkFilter, SameSitePolicy};
use crate::SiteSweepError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Outcome of a completed crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed URL as supplied
    pub origin: String,

    /// Number of distinct internal URLs found (visited set cardinality)
    pub total_links: usize,

    /// Worker ceiling used for the run
    pub workers: usize,

    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,

    /// Wall-clock end of the run
    pub finished_at: DateTime<Utc>,

    /// Elapsed time measured with a monotonic clock
    pub elapsed: Duration,

    /// Every URL recorded during the run, sorted
    pub visited_urls: Vec<String>,

    /// Fetch and budget diagnostics
    pub stats: StatsSnapshot,
}

/// A single crawl run, ready to start
pub struct Crawler {
    origin: Url,
    workers: usize,
    context: Arc<CrawlContext>,
}

impl Crawler {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `origin` - The seed URL; must be absolute `http`/`https`
    /// * `workers` - Ceiling on concurrently live child crawl units (>= 1)
    /// * `config` - Timeouts, redirect limit, headers and same-site policy
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - All inputs are valid and the HTTP client was built
    /// * `Err(SiteSweepError)` - Pre-flight validation or client setup failed
    pub fn new(origin: &str, workers: usize, config: &Config) -> Result<Self, SiteSweepError> {
        validate(config)?;
        validate_workers(workers)?;
        let origin = validate_seed_url(origin)?;

        let client = build_http_client(&config.crawler)?;
        let headers = HeaderGenerator::new(&config.headers)?;
        let fetcher = HttpFetcher::new(client, headers);

        Ok(Self::with_fetcher(
            origin,
            workers,
            config.crawler.same_site,
            Arc::new(fetcher),
        ))
    }

    /// Creates a crawler around any page fetcher
    pub fn with_fetcher(
        origin: Url,
        workers: usize,
        same_site: SameSitePolicy,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let context = CrawlContext {
            fetcher,
            filter: LinkFilter::new(&origin, same_site),
            visited: VisitedSet::new(),
            stats: CrawlStats::new(),
        };

        Self {
            origin,
            workers,
            context: Arc::new(context),
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs the crawl to completion
    ///
    /// The run cannot fail once started: fetch failures count as pages
    /// without links and budget exhaustion silently truncates the frontier.
    pub async fn run(self) -> CrawlReport {
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(
            "Starting crawl of {} with {} workers ({:?} same-site matching)",
            self.origin,
            self.workers,
            self.context.filter.policy()
        );

        self.context
            .visited
            .insert_if_absent(normalize_origin(&self.origin).as_str());

        let scheduler = Scheduler::new(Arc::clone(&self.context), self.workers);
        scheduler.run(self.origin.clone()).await;

        let elapsed = start.elapsed();
        let stats = self.context.stats.snapshot();
        let total_links = self.context.visited.len();

        tracing::info!(
            "Crawl completed: {} internal links found, {} pages fetched in {:?}",
            total_links,
            stats.pages_fetched,
            elapsed
        );

        CrawlReport {
            origin: self.origin.to_string(),
            total_links,
            workers: self.workers,
            started_at,
            finished_at: Utc::now(),
            elapsed,
            visited_urls: self.context.visited.snapshot(),
            stats,
        }
    }
}

/// Runs a complete crawl operation over HTTP
///
/// # Example
///
/// ```no_run
/// use sitesweep::config::Config;
/// use sitesweep::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl("https://example.com/", 8, &Config::default()).await?;
/// println!("{} internal links", report.total_links);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    origin: &str,
    workers: usize,
    config: &Config,
) -> Result<CrawlReport, SiteSweepError> {
    let crawler = Crawler::new(origin, workers, config)?;
    Ok(crawler.run().await)
}
