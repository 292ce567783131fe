//! Post-run summary banner
//!
//! Renders a [`CrawlReport`] as a fixed-width text block for the terminal.

use crate::crawler::CrawlReport;

/// Width of the banner rule lines
const BANNER_WIDTH: usize = 78;

/// Fill character for the banner rule lines
const BANNER_FILL: char = '=';

/// Centers `title` in a rule of [`BANNER_WIDTH`] fill characters
fn rule(title: &str) -> String {
    let title_len = title.chars().count();
    if title_len >= BANNER_WIDTH {
        return title.to_string();
    }

    let padding = BANNER_WIDTH - title_len;
    let left = padding / 2;
    let right = padding - left;

    let mut line = String::with_capacity(BANNER_WIDTH);
    line.extend(std::iter::repeat(BANNER_FILL).take(left));
    line.push_str(title);
    line.extend(std::iter::repeat(BANNER_FILL).take(right));
    line
}

/// Formats a report as the summary banner
///
/// # Arguments
///
/// * `report` - The report of a finished crawl
///
/// # Returns
///
/// The banner text, one line per field, ending with a closing rule
pub fn format_summary(report: &CrawlReport) -> String {
    let stats = &report.stats;

    let starved = if stats.links_starved > 0 {
        format!(
            "Not fetched:       {} (worker budget exhausted)\n",
            stats.links_starved
        )
    } else {
        String::new()
    };

    format!(
        "{header}\n\
         Origin URL:        {origin}\n\
         Internal links:    {total}\n\
         Elapsed:           {elapsed:.3}s\n\
         Workers:           {workers}\n\
         Started at:        {started}\n\
         Pages fetched:     {fetched} ({http} HTTP errors, {network} network errors)\n\
         {starved}{footer}\n",
        header = rule(" CRAWL SUMMARY "),
        origin = report.origin,
        total = report.total_links,
        elapsed = report.elapsed.as_secs_f64(),
        workers = report.workers,
        started = report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        fetched = stats.pages_fetched,
        http = stats.http_failures,
        network = stats.network_failures,
        starved = starved,
        footer = rule(""),
    )
}

/// Prints the summary banner to stdout
pub fn print_summary(report: &CrawlReport) {
    println!();
    print!("{}", format_summary(report));
}
