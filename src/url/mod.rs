//! URL handling module for Sumi-Degrees
//!
//! This module provides page identity (`PageId`) derived from URL normalization,
//! host allowlisting, identifier resolution and URL-derived page titles.

mod host;
mod normalize;
mod resolve;

use crate::UrlError;
use std::fmt;
use url::Url;

// Re-export main functions
pub use host::{host_of, HostAllowlist};
pub use normalize::normalize_url;
pub use resolve::{page_name, resolve_identifier, title_from_url, UNKNOWN_TITLE};

/// Canonical identity of a page
///
/// Two links that normalize to the same URL are the same node of the link
/// graph. Derivation is a pure function of the raw link string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(Url);

impl PageId {
    /// Normalizes a raw absolute link into a page identity
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        normalize_url(raw).map(Self)
    }

    /// Normalizes an already parsed URL into a page identity
    pub fn from_url(url: &Url) -> Result<Self, UrlError> {
        Self::parse(url.as_str())
    }

    /// The normalized URL, suitable for fetching
    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
