//! Crawler module for the shortest-path traversal
//!
//! This module contains the traversal logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - Link filtering and HTML link extraction behind the `LinkExtractor` trait
//! - Width-bounded scheduling of in-flight fetches
//! - The `Crawler` orchestrator that runs one breadth-first search

mod coordinator;
mod fetcher;
mod filter;
mod parser;
mod scheduler;

pub use coordinator::{CrawlSettings, Crawler};
pub use fetcher::{build_http_client, user_agent_string, FetchedPage, HttpFetcher, PageFetcher};
pub use filter::LinkFilter;
pub use parser::{prioritize, HtmlLinkExtractor, LinkExtractor};
pub use scheduler::{CompletedFetch, Scheduler};

use crate::config::Config;
use crate::state::TraversalResult;
use crate::DegreesError;

/// Runs a complete traversal over HTTP
///
/// This is the main entry point for a run. It will:
/// 1. Validate the configuration and resolve the start and target pages
/// 2. Build the HTTP client
/// 3. Fetch the start page and search breadth-first for the target
///
/// # Returns
///
/// * `Ok(TraversalResult)` - The run reached a terminal state
/// * `Err(DegreesError)` - Invalid configuration or unreachable start page
pub async fn find_path(config: &Config) -> Result<TraversalResult, DegreesError> {
    Crawler::from_config(config)?.run().await
}
