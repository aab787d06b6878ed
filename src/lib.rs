//! Sumi-Degrees: shortest link paths between two pages
//!
//! This crate implements a breadth-first crawler that discovers the shortest chain
//! of hyperlinks connecting a start page to a target page (the "degrees of
//! separation" game played on an encyclopedia site), bounded by a maximum depth.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Degrees operations
#[derive(Debug, Error)]
pub enum DegreesError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Start page {url} could not be fetched: {source}")]
    StartPage { url: String, source: FetchError },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Cannot resolve page identifier '{0}'")]
    UnresolvableIdentifier(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Fetch failures. For any page other than the start page these are dead ends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Http { status: u16 },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection refused")]
    Connect,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Expected HTML, got {content_type}")]
    ContentMismatch { content_type: String },

    #[error("Failed to read body: {0}")]
    Body(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, HtmlLinkExtractor, HttpFetcher, LinkExtractor, PageFetcher};
pub use state::{CrawlState, TraversalOutcome, TraversalResult, TraversalStats};
pub use url::{normalize_url, PageId};
