//! Crawler module for page fetching and link discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with rotating request headers
//! - Anchor extraction and link promotion into the shared visited set
//! - Budget-aware recursive scheduling of crawl units
//! - Run coordination and reporting

mod coordinator;
mod diagnostics;
mod extract;
mod fetcher;
mod headers;
mod parser;
mod scheduler;
mod visited;

pub use coordinator::{crawl, CrawlReport, Crawler};
pub use diagnostics::{CrawlStats, StatsSnapshot};
pub use extract::{fetch_and_extract, promote_links, CrawlContext, CrawlUnit};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, HttpFetcher, PageFetcher};
pub use headers::HeaderGenerator;
pub use parser::extract_hrefs;
pub use scheduler::{Scheduler, WorkerBudget, WorkerSlot};
pub use visited::VisitedSet;
