use crate::UrlError;
use url::Url;

/// Normalizes a raw anchor href into a candidate URL
///
/// # Normalization Steps
///
/// 1. Skip empty (or whitespace-only) hrefs
/// 2. Resolve the href against the URL of the page it was found on
/// 3. Drop the query string
/// 4. Drop the fragment
///
/// Only scheme, authority and path survive, so `http://a.com/p?x=1#y` and
/// `http://a.com/p?x=2` both collapse to `http://a.com/p`. Scheme filtering is
/// left to the link filter; a `mailto:` href still normalizes.
///
/// # Arguments
///
/// * `href` - The raw `href` attribute value
/// * `base` - The URL of the page the anchor was found on
///
/// # Returns
///
/// * `Some(Url)` - The normalized absolute URL
/// * `None` - The href was empty or could not be resolved
///
/// # Examples
///
/// ```
/// use sitesweep::url::normalize_href;
/// use url::Url;
///
/// let base = Url::parse("http://example.com/docs/").unwrap();
/// let url = normalize_href("guide?page=2#intro", &base).unwrap();
/// assert_eq!(url.as_str(), "http://example.com/docs/guide");
/// ```
pub fn normalize_href(href: &str, base: &Url) -> Option<Url> {
    if href.trim().is_empty() {
        return None;
    }

    let mut url = base.join(href).ok()?;
    strip_query_and_fragment(&mut url);
    Some(url)
}

/// Parses the seed URL of a crawl run
///
/// The seed must be absolute, use `http` or `https`, and carry a host. The
/// returned URL is left untouched; use [`normalize_origin`] to obtain the form
/// that is recorded in the visited set.
pub fn parse_origin(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns the origin in the same shape as every other visited-set entry
pub fn normalize_origin(origin: &Url) -> Url {
    let mut url = origin.clone();
    strip_query_and_fragment(&mut url);
    url
}

fn strip_query_and_fragment(url: &mut Url) {
    url.set_query(None);
    url.set_fragment(None);
}
