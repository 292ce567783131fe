//! URL handling module for Sitesweep
//!
//! This module provides href normalization and the same-site link filter.

mod filter;
mod normalize;

// Re-export main functions
pub use filter::{authority, is_valid_link, LinkFilter, SameSitePolicy};
pub use normalize::{normalize_href, normalize_origin, parse_origin};
