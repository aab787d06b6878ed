//! Traversability predicate for candidate links
//!
//! A link is traversable when it is an article page on an allowed host:
//!
//! **Rejected:**
//! - Non-HTTP(S) schemes and hosts outside the allowlist
//! - Anything carrying a fragment (`#section`), including same-page jumps
//! - Anything carrying a query string (edit links, history, diffs)
//! - Paths outside the article prefix, or the bare prefix itself
//! - Page names containing a namespace separator (`Talk:`, `File:`, `Special:`)
//! - Page names matching a configured skip pattern (years, lists, identifiers)

use crate::config::SiteConfig;
use crate::url::{page_name, HostAllowlist};
use crate::ConfigError;
use regex::RegexSet;
use url::Url;

/// Pure predicate over candidate links, built once per run from static config
#[derive(Debug, Clone)]
pub struct LinkFilter {
    hosts: HostAllowlist,
    article_prefix: String,
    skip: RegexSet,
}

impl LinkFilter {
    /// Creates a filter from its parts
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if a skip pattern is not a valid regex.
    pub fn new<S: AsRef<str>>(
        hosts: HostAllowlist,
        article_prefix: impl Into<String>,
        skip_patterns: &[S],
    ) -> Result<Self, ConfigError> {
        let skip = RegexSet::new(skip_patterns.iter().map(|p| p.as_ref()))
            .map_err(|e| ConfigError::InvalidPattern(format!("Invalid skip pattern: {}", e)))?;

        Ok(Self {
            hosts,
            article_prefix: article_prefix.into(),
            skip,
        })
    }

    /// Builds the filter described by a site configuration
    pub fn from_site(site: &SiteConfig) -> Result<Self, ConfigError> {
        let hosts = HostAllowlist::from_site(site)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;
        Self::new(hosts, site.article_prefix.clone(), &site.skip_patterns)
    }

    /// Returns true if the link points at a traversable content page
    pub fn is_traversable(&self, link: &Url) -> bool {
        if link.scheme() != "http" && link.scheme() != "https" {
            return false;
        }

        if link.fragment().is_some() || link.query().is_some() {
            return false;
        }

        if !self.hosts.allows(link) {
            return false;
        }

        let Some(raw_name) = page_name(link, &self.article_prefix) else {
            return false;
        };

        let name = match urlencoding::decode(raw_name) {
            Ok(name) => name,
            Err(_) => return false,
        };

        !name.contains(':') && !self.skip.is_match(&name)
    }
}
