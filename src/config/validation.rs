use crate::config::types::{Config, CrawlerConfig, HeaderConfig};
use crate::url::parse_origin;
use crate::{ConfigError, UrlError};
use reqwest::header::HeaderValue;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_header_config(&config.headers)?;
    Ok(())
}

/// Validates the seed URL of a run
///
/// # Returns
///
/// * `Ok(Url)` - The parsed seed URL
/// * `Err(UrlError)` - The value is not an absolute `http`/`https` URL with a host
pub fn validate_seed_url(url_str: &str) -> Result<Url, UrlError> {
    parse_origin(url_str)
}

/// Validates the worker ceiling of a run
pub fn validate_workers(workers: usize) -> Result<(), ConfigError> {
    if workers < 1 {
        return Err(ConfigError::Validation(format!(
            "workers must be >= 1, got {}",
            workers
        )));
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates header configuration
fn validate_header_config(config: &HeaderConfig) -> Result<(), ConfigError> {
    parse_header_values(config).map(|_| ())
}

/// Parses the user-agent rotation and referer into header values
///
/// # Returns
///
/// * `Ok((user_agents, referer))` - Every value is a legal header value
/// * `Err(ConfigError)` - The rotation is empty, an entry is blank, a value is
///   not a legal header, or the referer is not an absolute URL
pub fn parse_header_values(
    config: &HeaderConfig,
) -> Result<(Vec<HeaderValue>, HeaderValue), ConfigError> {
    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents must contain at least one entry".to_string(),
        ));
    }

    let mut user_agents = Vec::with_capacity(config.user_agents.len());
    for agent in &config.user_agents {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agents cannot contain empty entries".to_string(),
            ));
        }
        let value = HeaderValue::from_str(agent)
            .map_err(|e| ConfigError::InvalidHeader(format!("user agent '{}': {}", agent, e)))?;
        user_agents.push(value);
    }

    Url::parse(&config.referer)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid referer: {}", e)))?;
    let referer = HeaderValue::from_str(&config.referer)
        .map_err(|e| ConfigError::InvalidHeader(format!("referer '{}': {}", config.referer, e)))?;

    Ok((user_agents, referer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_workers() {
        assert!(validate_workers(1).is_ok());
        assert!(validate_workers(64).is_ok());
        assert!(matches!(validate_workers(0), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_seed_url() {
        assert!(validate_seed_url("http://example.com/").is_ok());
        assert!(validate_seed_url("https://example.com/path?q=1").is_ok());

        assert!(validate_seed_url("").is_err());
        assert!(validate_seed_url("example.com").is_err());
        assert!(validate_seed_url("ftp://example.com/").is_err());
        assert!(validate_seed_url("http//example.com").is_err());
    }

    #[test]
    fn test_empty_user_agents_rejected() {
        let mut config = Config::default();
        config.headers.user_agents.clear();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_user_agent_with_newline_rejected() {
        let mut config = Config::default();
        config.headers.user_agents = vec!["Bad\nAgent".to_string()];
        assert!(matches!(validate(&config), Err(ConfigError::InvalidHeader(_))));
    }

    #[test]
    fn test_invalid_referer_rejected() {
        let mut config = Config::default();
        config.headers.referer = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_header_values_keeps_rotation_order() {
        let config = HeaderConfig {
            user_agents: vec!["AgentA/1.0".to_string(), "AgentB/2.0".to_string()],
            referer: "https://ref.example/".to_string(),
        };
        let (agents, referer) = parse_header_values(&config).unwrap();

        assert_eq!(agents, vec!["AgentA/1.0", "AgentB/2.0"]);
        assert_eq!(referer, "https://ref.example/");
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        let mut config = Config::default();
        config.crawler.connect_timeout_secs = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }
}
