//! Output module for reporting crawl results
//!
//! This module handles printing the post-run summary banner.

mod summary;

pub use summary::{format_summary, print_summary};
