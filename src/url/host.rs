use crate::config::SiteConfig;
use crate::UrlError;
use url::Url;

/// Set of host patterns a traversal is allowed to stay within
///
/// Patterns are either exact hosts (`en.wikipedia.org`) or wildcards
/// (`*.wikipedia.org`). A wildcard also matches its bare base domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAllowlist {
    patterns: Vec<String>,
}

impl HostAllowlist {
    /// Creates an allowlist from the given patterns
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Builds the allowlist for a site
    ///
    /// An empty `allowed-domains` list restricts the traversal to the host of
    /// the site's base URL.
    pub fn from_site(site: &SiteConfig) -> Result<Self, UrlError> {
        if !site.allowed_domains.is_empty() {
            return Ok(Self::new(&site.allowed_domains));
        }

        let base = Url::parse(&site.base_url).map_err(|e| UrlError::Parse(e.to_string()))?;
        let host = host_of(&base).ok_or(UrlError::MissingDomain)?;
        Ok(Self::new([host]))
    }

    /// Returns true if the URL's host matches any pattern
    pub fn allows(&self, url: &Url) -> bool {
        match host_of(url) {
            Some(host) => self.patterns.iter().any(|p| matches_pattern(p, &host)),
            None => false,
        }
    }
}

/// Lowercased host of a URL, without port
pub fn host_of(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

fn matches_pattern(pattern: &str, host: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            host == base
                || host
                    .strip_suffix(base)
                    .is_some_and(|rest| rest.ends_with('.'))
        }
        None => host == pattern,
    }
}
