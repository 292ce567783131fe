//! Configuration module for Sitesweep
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and the pre-flight checks on the run inputs.
//!
//! # Example
//!
//! ```no_run
//! use sitesweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitesweep.toml")).unwrap();
//! println!("Same-site policy: {:?}", config.crawler.same_site);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HeaderConfig, DEFAULT_REFERER, DEFAULT_USER_AGENTS,
};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{parse_header_values, validate, validate_seed_url, validate_workers};
