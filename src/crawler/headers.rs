//! Request header generation
//!
//! Each request carries one user agent drawn from a small rotation and a fixed
//! third-party referer. The random source is a parameter so callers (and tests)
//! decide how the agent is picked.

use crate::config::{parse_header_values, HeaderConfig};
use crate::ConfigError;
use rand::seq::IndexedRandom;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};

/// Builds request headers from a validated rotation
#[derive(Debug, Clone)]
pub struct HeaderGenerator {
    user_agents: Vec<HeaderValue>,
    referer: HeaderValue,
}

impl HeaderGenerator {
    /// Creates a generator from header configuration
    ///
    /// # Returns
    ///
    /// * `Ok(HeaderGenerator)` - Every value is a legal header value
    /// * `Err(ConfigError)` - The rotation fails header validation
    pub fn new(config: &HeaderConfig) -> Result<Self, ConfigError> {
        let (user_agents, referer) = parse_header_values(config)?;
        Ok(Self {
            user_agents,
            referer,
        })
    }

    /// Generates a header set for one request
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(agent) = self.user_agents.choose(rng) {
            headers.insert(USER_AGENT, agent.clone());
        }
        headers.insert(REFERER, self.referer.clone());
        headers
    }

    /// Number of user agents in the rotation
    pub fn rotation_len(&self) -> usize {
        self.user_agents.len()
    }
}
