//! Page fetch and link promotion
//!
//! One call fetches a page, pulls its anchors, normalizes and filters them,
//! and promotes each eligible URL into the visited set. Only URLs this call
//! actually inserted are handed back to the scheduler.

use crate::crawler::diagnostics::CrawlStats;
use crate::crawler::fetcher::{FetchOutcome, PageFetcher};
use crate::crawler::parser::extract_hrefs;
use crate::crawler::visited::VisitedSet;
use crate::state::UnitState;
use crate::url::{normalize_href, LinkFilter};
use std::sync::Arc;
use url::Url;

/// Everything a crawl unit needs besides its own URL
pub struct CrawlContext {
    pub fetcher: Arc<dyn PageFetcher>,
    pub filter: LinkFilter,
    pub visited: VisitedSet,
    pub stats: CrawlStats,
}

/// Tracks the lifecycle of one crawl unit
#[derive(Debug)]
pub struct CrawlUnit {
    url: Url,
    state: UnitState,
}

impl CrawlUnit {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            state: UnitState::Scheduled,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn state(&self) -> UnitState {
        self.state
    }

    /// Moves the unit to its next lifecycle stage
    pub fn advance(&mut self, next: UnitState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid unit transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!("{}: {} -> {}", self.url, self.state, next);
        self.state = next;
    }
}

/// Fetches one page and returns the URLs it newly promoted
///
/// Fetch failures and pages without eligible links both yield an empty
/// vector. On failure the unit is left in `Done`; on success it is left in
/// `Extracting` for the scheduler to continue.
pub async fn fetch_and_extract(ctx: &CrawlContext, unit: &mut CrawlUnit) -> Vec<Url> {
    unit.advance(UnitState::Fetching);
    let outcome = ctx.fetcher.fetch(unit.url()).await;
    ctx.stats.record_fetch(unit.url().as_str(), &outcome);

    let body = match outcome {
        FetchOutcome::Success { body } => body,
        _ => {
            unit.advance(UnitState::Done);
            return Vec::new();
        }
    };

    unit.advance(UnitState::Extracting);
    let promoted = promote_links(ctx, unit.url(), &body);
    ctx.stats.record_promoted(promoted.len());
    promoted
}

/// Normalizes, filters and records the anchors of a fetched page
///
/// Relative hrefs resolve against `page_url`. A URL is returned only when
/// this call performed its insertion into the visited set, so concurrent
/// units never both claim the same URL.
pub fn promote_links(ctx: &CrawlContext, page_url: &Url, body: &str) -> Vec<Url> {
    let mut promoted = Vec::new();

    for href in extract_hrefs(body) {
        let Some(candidate) = normalize_href(&href, page_url) else {
            continue;
        };

        if !ctx.filter.is_eligible(&candidate, &ctx.visited) {
            continue;
        }

        if ctx.visited.insert_if_absent(candidate.as_str()) {
            promoted.push(candidate);
        }
    }

    promoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::SameSitePolicy;
    use async_trait::async_trait;

    struct FixedFetcher(FetchOutcome);

    #[async_trait]
    impl PageFetcher for FixedFetcher {
        async fn fetch(&self, _url: &Url) -> FetchOutcome {
            self.0.clone()
        }
    }

    fn context(outcome: FetchOutcome) -> CrawlContext {
        let origin = Url::parse("http://example.com/").unwrap();
        CrawlContext {
            fetcher: Arc::new(FixedFetcher(outcome)),
            filter: LinkFilter::new(&origin, SameSitePolicy::Substring),
            visited: VisitedSet::new(),
            stats: CrawlStats::new(),
        }
    }

    fn page(body: &str) -> FetchOutcome {
        FetchOutcome::Success {
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_promotes_internal_links_once() {
        let ctx = context(page(
            r#"<a href="/a">A</a><a href="/a?ref=1">A again</a><a href="http://external.com/b">B</a>"#,
        ));
        let mut unit = CrawlUnit::new(Url::parse("http://example.com/").unwrap());

        let links = fetch_and_extract(&ctx, &mut unit).await;

        assert_eq!(links, vec![Url::parse("http://example.com/a").unwrap()]);
        assert!(ctx.visited.contains("http://example.com/a"));
        assert!(!ctx.visited.contains("http://external.com/b"));
        assert_eq!(unit.state(), UnitState::Extracting);
        assert_eq!(ctx.stats.snapshot().links_promoted, 1);
    }

    #[tokio::test]
    async fn test_already_visited_not_returned() {
        let ctx = context(page(r#"<a href="/a">A</a><a href="/b">B</a>"#));
        ctx.visited.insert_if_absent("http://example.com/a");
        let mut unit = CrawlUnit::new(Url::parse("http://example.com/").unwrap());

        let links = fetch_and_extract(&ctx, &mut unit).await;

        assert_eq!(links, vec![Url::parse("http://example.com/b").unwrap()]);
        assert_eq!(ctx.visited.len(), 2);
    }

    #[tokio::test]
    async fn test_relative_links_resolve_against_page() {
        let ctx = context(page(r#"<a href="child">Child</a>"#));
        let mut unit = CrawlUnit::new(Url::parse("http://example.com/docs/").unwrap());

        let links = fetch_and_extract(&ctx, &mut unit).await;

        assert_eq!(
            links,
            vec![Url::parse("http://example.com/docs/child").unwrap()]
        );
    }

    #[tokio::test]
    async fn test_skips_empty_and_non_http() {
        let ctx = context(page(
            r#"<a href="">Empty</a><a href="mailto:x@example.com">Mail</a><a href="javascript:void(0)">JS</a>"#,
        ));
        let mut unit = CrawlUnit::new(Url::parse("http://example.com/").unwrap());

        assert!(fetch_and_extract(&ctx, &mut unit).await.is_empty());
        assert!(ctx.visited.is_empty());
    }

    #[tokio::test]
    async fn test_http_failure_yields_nothing() {
        let ctx = context(FetchOutcome::HttpFailure { status: 500 });
        let mut unit = CrawlUnit::new(Url::parse("http://example.com/").unwrap());

        assert!(fetch_and_extract(&ctx, &mut unit).await.is_empty());
        assert_eq!(unit.state(), UnitState::Done);
        assert_eq!(ctx.stats.snapshot().http_failures, 1);
    }

    #[tokio::test]
    async fn test_network_failure_yields_nothing() {
        let ctx = context(FetchOutcome::NetworkFailure {
            error: "Connection failed".to_string(),
        });
        let mut unit = CrawlUnit::new(Url::parse("http://example.com/").unwrap());

        assert!(fetch_and_extract(&ctx, &mut unit).await.is_empty());
        assert_eq!(unit.state(), UnitState::Done);
        assert_eq!(ctx.stats.snapshot().network_failures, 1);
    }

    #[test]
    fn test_self_link_to_visited_page_rejected() {
        let ctx = context(page(""));
        ctx.visited.insert_if_absent("http://example.com/");

        let page_url = Url::parse("http://example.com/").unwrap();
        let links = promote_links(&ctx, &page_url, r##"<a href="#top">Top</a>"##);
        assert!(links.is_empty());
    }
}
