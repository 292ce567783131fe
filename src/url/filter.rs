use crate::crawler::VisitedSet;
use serde::Deserialize;
use url::Url;

/// How a candidate's authority is compared with the crawl origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SameSitePolicy {
    /// Candidate authority contains the origin authority anywhere.
    ///
    /// This admits subdomains but also unrelated hosts such as
    /// `notexample.com` for an `example.com` origin.
    #[default]
    Substring,

    /// Candidate host equals the origin host or is a subdomain of it, and the
    /// ports match.
    HostSuffix,
}

/// Checks if a URL has a scheme the crawler will fetch
pub fn is_valid_link(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Returns `host[:port]` for a URL, or `None` when it has no host
///
/// Default ports are already dropped by the `url` crate, so
/// `http://example.com:80/` yields `example.com`.
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Decides whether a normalized candidate URL may be enqueued
#[derive(Debug, Clone)]
pub struct LinkFilter {
    origin_authority: String,
    origin_host: String,
    origin_port: Option<u16>,
    policy: SameSitePolicy,
}

impl LinkFilter {
    /// Creates a filter for a crawl rooted at `origin`
    ///
    /// An origin without a host yields a filter that rejects everything.
    pub fn new(origin: &Url, policy: SameSitePolicy) -> Self {
        Self {
            origin_authority: authority(origin).unwrap_or_default(),
            origin_host: origin.host_str().unwrap_or_default().to_string(),
            origin_port: origin.port_or_known_default(),
            policy,
        }
    }

    /// Returns the same-site policy in effect
    pub fn policy(&self) -> SameSitePolicy {
        self.policy
    }

    /// Checks if a candidate belongs to the origin's site
    pub fn is_same_site(&self, candidate: &Url) -> bool {
        if self.origin_authority.is_empty() {
            return false;
        }

        match self.policy {
            SameSitePolicy::Substring => authority(candidate)
                .map_or(false, |auth| auth.contains(&self.origin_authority)),
            SameSitePolicy::HostSuffix => {
                let Some(host) = candidate.host_str() else {
                    return false;
                };
                let host_matches = host == self.origin_host
                    || host.ends_with(&format!(".{}", self.origin_host));
                host_matches && candidate.port_or_known_default() == self.origin_port
            }
        }
    }

    /// Runs every eligibility rule against a candidate
    ///
    /// A candidate passes when it has an `http`/`https` scheme, is on the
    /// origin's site, and is not yet in the visited set. Re-filtering a URL
    /// that is already visited is always a plain rejection.
    pub fn is_eligible(&self, candidate: &Url, visited: &VisitedSet) -> bool {
        is_valid_link(candidate)
            && self.is_same_site(candidate)
            && !visited.contains(candidate.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn filter(origin: &str) -> LinkFilter {
        LinkFilter::new(&url(origin), SameSitePolicy::Substring)
    }

    #[test]
    fn test_valid_schemes() {
        assert!(is_valid_link(&url("http://example.com/")));
        assert!(is_valid_link(&url("https://example.com/")));
        assert!(!is_valid_link(&url("ftp://example.com/")));
        assert!(!is_valid_link(&url("mailto:someone@example.com")));
        assert!(!is_valid_link(&url("javascript:void(0)")));
    }

    #[test]
    fn test_authority_with_port() {
        assert_eq!(
            authority(&url("http://127.0.0.1:8080/x")),
            Some("127.0.0.1:8080".to_string())
        );
        assert_eq!(
            authority(&url("http://example.com:80/")),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_same_host_accepted() {
        assert!(filter("https://example.com").is_same_site(&url("https://example.com/x")));
    }

    #[test]
    fn test_subdomain_accepted() {
        assert!(filter("https://example.com").is_same_site(&url("https://sub.example.com/x")));
    }

    #[test]
    fn test_substring_match_accepts_lookalike_host() {
        // Loose check: any authority containing the origin's authority passes.
        assert!(filter("https://example.com").is_same_site(&url("https://notexample.com/")));
    }

    #[test]
    fn test_external_rejected() {
        assert!(!filter("http://example.com/").is_same_site(&url("http://external.com/b")));
    }

    #[test]
    fn test_substring_compares_authority_only() {
        // The origin host appearing in the path does not make a URL internal.
        assert!(!filter("http://example.com/")
            .is_same_site(&url("http://external.com/example.com/page")));
    }

    #[test]
    fn test_port_is_part_of_authority() {
        let filter = filter("http://127.0.0.1:4000/");
        assert!(filter.is_same_site(&url("http://127.0.0.1:4000/a")));
        assert!(!filter.is_same_site(&url("http://127.0.0.1:5000/a")));
    }

    #[test]
    fn test_host_suffix_policy() {
        let filter = LinkFilter::new(&url("https://example.com/"), SameSitePolicy::HostSuffix);
        assert!(filter.is_same_site(&url("https://example.com/a")));
        assert!(filter.is_same_site(&url("https://blog.example.com/a")));
        assert!(!filter.is_same_site(&url("https://notexample.com/")));
        assert!(!filter.is_same_site(&url("https://example.com:8443/")));
    }

    #[test]
    fn test_eligibility_rejects_visited() {
        let filter = filter("http://example.com/");
        let visited = VisitedSet::new();
        let candidate = url("http://example.com/a");

        assert!(filter.is_eligible(&candidate, &visited));
        assert!(visited.insert_if_absent(candidate.as_str()));
        assert!(!filter.is_eligible(&candidate, &visited));
        // Idempotent rejection.
        assert!(!filter.is_eligible(&candidate, &visited));
    }

    #[test]
    fn test_eligibility_rejects_bad_scheme() {
        let filter = filter("http://example.com/");
        let visited = VisitedSet::new();
        assert!(!filter.is_eligible(&url("ftp://example.com/file"), &visited));
    }
}
