//! HTML parser for extracting anchor hrefs
//!
//! Only `<a href="...">` values are collected, raw and in document order.
//! Resolution, normalization and filtering happen later in the pipeline.

use scraper::{Html, Selector};

/// Extracts every anchor `href` value from an HTML document
///
/// Anchors without an `href` attribute are ignored. Values are returned
/// exactly as written, including empty strings and duplicates.
///
/// # Example
///
/// ```
/// use sitesweep::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/a">A</a><a name="x">X</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/a".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
