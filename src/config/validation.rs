use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, SiteConfig, TraversalConfig, UserAgentConfig,
};
use crate::ConfigError;
use regex::Regex;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_traversal_config(&config.traversal)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.concurrency_width < 1 || config.concurrency_width > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency_width must be between 1 and 100, got {}",
            config.concurrency_width
        )));
    }

    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be between 1 and 300, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(
            "progress_interval must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the site description
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' has no host",
            config.base_url
        )));
    }

    if !config.article_prefix.starts_with('/') || !config.article_prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "article_prefix must start and end with '/', got '{}'",
            config.article_prefix
        )));
    }

    for pattern in &config.allowed_domains {
        validate_domain_pattern(pattern)?;
    }

    for pattern in &config.skip_patterns {
        Regex::new(pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!("Invalid skip pattern '{}': {}", pattern, e))
        })?;
    }

    validate_selector(&config.content_selector)?;
    validate_selector(&config.title_selector)?;

    Ok(())
}

/// Validates a CSS selector
fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|e| {
        ConfigError::InvalidPattern(format!("Invalid CSS selector '{}': {:?}", selector, e))
    })?;
    Ok(())
}

/// Validates start and target identifiers
fn validate_traversal_config(config: &TraversalConfig) -> Result<(), ConfigError> {
    if config.start.trim().is_empty() {
        return Err(ConfigError::Validation("start cannot be empty".to_string()));
    }

    if config.target.trim().is_empty() {
        return Err(ConfigError::Validation("target cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.result_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "result_path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    if let Some(domain) = pattern.strip_prefix("*.") {
        validate_domain_string(domain)?;
    } else {
        validate_domain_string(pattern)?;
    }

    Ok(())
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
