//! Crawler coordinator - the traversal loop
//!
//! This module contains the run loop that coordinates one traversal:
//! - Fetching the start page and seeding `TraversalState`
//! - Issuing frontier entries to the width-bounded `Scheduler`
//! - Expanding completed fetches into discoveries, one completion at a time
//! - Driving the `CrawlState` machine to exactly one terminal state
//!
//! The coordinator is the single owner of all traversal state. Fetches run
//! concurrently, but their results are applied sequentially on this task.

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchedPage, HttpFetcher, PageFetcher};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::scheduler::{CompletedFetch, Scheduler};
use crate::state::{
    CrawlState, FrontierEntry, TraversalOutcome, TraversalResult, TraversalState, TraversalStats,
};
use crate::url::{resolve_identifier, PageId};
use crate::{ConfigError, DegreesError, FetchError};
use std::time::{Duration, Instant};

/// Tunables for one run, taken from `[crawler]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSettings {
    pub max_depth: u32,
    pub width: usize,
    pub fetch_timeout: Duration,
    pub progress_interval: u64,
}

impl From<&CrawlerConfig> for CrawlSettings {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            width: config.concurrency_width as usize,
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
            progress_interval: config.progress_interval,
        }
    }
}

/// Breadth-first search for the shortest link path from a start page to a target
///
/// A `Crawler` is configured once and may be run any number of times; every
/// call to [`Crawler::run`] builds its own `TraversalState`.
pub struct Crawler<F, E = HtmlLinkExtractor> {
    settings: CrawlSettings,
    fetcher: F,
    extractor: E,
    start: PageId,
    target: PageId,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sumi_degrees::config::load_config;
    /// use sumi_degrees::Crawler;
    /// use std::path::Path;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = load_config(Path::new("config.toml"))?;
    /// let result = Crawler::from_config(&config)?.run().await?;
    /// println!("{} degrees", result.degrees);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &Config) -> Result<Self, DegreesError> {
        let timeout = Duration::from_secs(config.crawler.fetch_timeout_secs);
        let fetcher = HttpFetcher::from_config(&config.user_agent, timeout)?;
        Self::new(config, fetcher)
    }
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler over any fetcher, extracting links with the site's HTML rules
    ///
    /// Validates the configuration and resolves both identifiers, so every
    /// configuration error surfaces here, before any traversal state exists.
    pub fn new(config: &Config, fetcher: F) -> Result<Self, DegreesError> {
        validate(config)?;

        let start = resolve_identifier(&config.traversal.start, &config.site)?;
        let target = resolve_identifier(&config.traversal.target, &config.site)?;
        let extractor = HtmlLinkExtractor::from_site(&config.site, Some(target.clone()))?;

        // Only a link can reach the target, so it has to pass the link filter
        if start != target && !extractor.filter().is_traversable(target.url()) {
            return Err(ConfigError::Validation(format!(
                "target '{}' can never be reached: it is a namespace page or matches a skip pattern",
                config.traversal.target
            ))
            .into());
        }

        Ok(Self {
            settings: CrawlSettings::from(&config.crawler),
            fetcher,
            extractor,
            start,
            target,
        })
    }
}

impl<F, E> Crawler<F, E>
where
    F: PageFetcher,
    E: LinkExtractor,
{
    /// Replaces the link extractor
    pub fn with_extractor<E2: LinkExtractor>(self, extractor: E2) -> Crawler<F, E2> {
        Crawler {
            settings: self.settings,
            fetcher: self.fetcher,
            extractor,
            start: self.start,
            target: self.target,
        }
    }

    pub fn start(&self) -> &PageId {
        &self.start
    }

    pub fn target(&self) -> &PageId {
        &self.target
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Runs one traversal
    ///
    /// # Returns
    ///
    /// * `Ok(TraversalResult)` - Path found, or the search ran out of pages
    /// * `Err(DegreesError::StartPage)` - The start page could not be fetched
    pub async fn run(&self) -> Result<TraversalResult, DegreesError> {
        let started = Instant::now();
        let mut state = CrawlState::Seeded;
        let mut stats = TraversalStats::default();

        tracing::info!(
            start = %self.start,
            target = %self.target,
            max_depth = self.settings.max_depth,
            width = self.settings.width,
            "Starting traversal"
        );

        if self.start == self.target {
            state.transition(CrawlState::Succeeded)?;
            stats.pages_discovered = 1;
            let title = self.extractor.title_from_url(self.start.url());
            tracing::info!("Start page is the target");
            return Ok(TraversalResult::found(vec![title], 0, stats));
        }

        let page = self.fetch_start_page().await?;
        stats.pages_fetched += 1;

        let root = PageId::from_url(&page.final_url)?;
        let root_title = self.extractor.title_of(&page.body, &page.final_url);

        let mut traversal = TraversalState::new(self.settings.max_depth);
        traversal.seed(root.clone(), root_title.clone());
        traversal.mark_visited(&root);

        if root == self.target {
            state.transition(CrawlState::Succeeded)?;
            stats.pages_discovered = 1;
            tracing::info!(url = %root, "Start page landed on the target");
            return Ok(TraversalResult::found(vec![root_title], 0, stats));
        }

        state.transition(CrawlState::Running)?;

        if let Some(depth) = self.expand(&mut traversal, &root, 0, &page) {
            state.transition(CrawlState::Succeeded)?;
            let path = traversal.reconstruct_path(&self.target);
            return Ok(self.succeed(&traversal, path, depth, stats, started));
        }

        let mut scheduler = Scheduler::new(self.settings.width);

        loop {
            self.fill(&mut scheduler, &mut traversal, &mut stats);

            let Some(completed) = scheduler.next_completion().await else {
                break;
            };

            let found = self.handle_completion(completed, &mut traversal, &mut stats);
            if let Some((path, depth)) = found {
                state.transition(CrawlState::Succeeded)?;
                tracing::debug!(
                    abandoned = scheduler.in_flight(),
                    "Abandoning in-flight fetches"
                );
                drop(scheduler);
                return Ok(self.succeed(&traversal, path, depth, stats, started));
            }
        }

        stats.pages_discovered = traversal.discovered_count() as u64;
        stats.links_beyond_depth = traversal.links_beyond_depth();

        state.transition(CrawlState::Exhausted)?;

        let outcome = state.outcome().unwrap_or(TraversalOutcome::Exhausted);
        tracing::info!(
            outcome = %state,
            pages_fetched = stats.pages_fetched,
            fetch_failures = stats.fetch_failures,
            pages_discovered = stats.pages_discovered,
            links_beyond_depth = stats.links_beyond_depth,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "No path found"
        );

        Ok(TraversalResult::not_found(outcome, self.failure_message(), stats))
    }

    async fn fetch_start_page(&self) -> Result<FetchedPage, DegreesError> {
        let fetched =
            tokio::time::timeout(self.settings.fetch_timeout, self.fetcher.fetch(self.start.url()))
                .await
                .unwrap_or(Err(FetchError::Timeout));

        fetched.map_err(|source| {
            tracing::warn!(url = %self.start, error = %source, "Start page fetch failed");
            DegreesError::StartPage {
                url: self.start.to_string(),
                source,
            }
        })
    }

    /// Moves frontier entries into free scheduler slots, one depth level at a time
    ///
    /// Entries deeper than the in-flight level wait until that level drains, so
    /// every discovery at depth `d + 1` is made before any at `d + 2`.
    fn fill<'a>(
        &'a self,
        scheduler: &mut Scheduler<'a>,
        traversal: &mut TraversalState,
        stats: &mut TraversalStats,
    ) {
        while scheduler.capacity() > 0 {
            let batch = traversal.next_level_batch(scheduler.capacity(), scheduler.level());
            if batch.is_empty() {
                return;
            }

            for entry in batch {
                if entry.depth > self.settings.max_depth {
                    tracing::trace!(
                        url = %entry.id,
                        depth = entry.depth,
                        "Dropping entry past max depth"
                    );
                    stats.entries_dropped += 1;
                    continue;
                }
                if traversal.is_visited(&entry.id) {
                    tracing::trace!(url = %entry.id, "Already expanded through a redirect");
                    continue;
                }
                tracing::debug!(url = %entry.id, depth = entry.depth, "Fetching");
                scheduler.dispatch(&self.fetcher, entry, self.settings.fetch_timeout);
            }
        }
    }

    /// Applies one completed fetch to the traversal
    ///
    /// Returns the path and degree count when the completion reaches the target.
    fn handle_completion(
        &self,
        completed: CompletedFetch,
        traversal: &mut TraversalState,
        stats: &mut TraversalStats,
    ) -> Option<(Vec<String>, u32)> {
        let CompletedFetch { entry, result } = completed;

        let page = match result {
            Ok(page) => page,
            Err(error) => {
                stats.fetch_failures += 1;
                tracing::debug!(url = %entry.id, depth = entry.depth, error = %error, "Dead end");
                return None;
            }
        };

        stats.pages_fetched += 1;
        self.report_progress(traversal, stats);

        if !traversal.mark_visited(&entry.id) {
            tracing::trace!(url = %entry.id, "Ignoring completion for a visited page");
            return None;
        }

        if let Ok(landed) = PageId::from_url(&page.final_url) {
            if landed != entry.id {
                tracing::debug!(from = %entry.id, to = %landed, "Redirected");

                if landed == self.target {
                    let mut path = traversal.reconstruct_path(&entry.id);
                    if let Some(last) = path.last_mut() {
                        *last = self.extractor.title_of(&page.body, &page.final_url);
                    }
                    return Some((path, entry.depth));
                }

                if !traversal.claim_landing(&landed, entry.depth) {
                    tracing::trace!(url = %landed, "Redirect target expanded under its own entry");
                    return None;
                }
            }
        }

        let FrontierEntry { id, depth } = entry;
        self.expand(traversal, &id, depth, &page)
            .map(|depth| (traversal.reconstruct_path(&self.target), depth))
    }

    /// Discovers every link on a fetched page
    ///
    /// Returns the target's depth if it was discovered within `max_depth`.
    /// Extraction stops at the target; the remaining links are not recorded.
    fn expand(
        &self,
        traversal: &mut TraversalState,
        parent: &PageId,
        parent_depth: u32,
        page: &FetchedPage,
    ) -> Option<u32> {
        let depth = parent_depth + 1;
        let links = self.extractor.extract(&page.body, &page.final_url);
        tracing::trace!(url = %parent, links = links.len(), "Expanding");

        for link in links {
            let is_target = link == self.target;
            let title = self.extractor.title_from_url(link.url());

            let discovered = traversal.discover(link, title, parent, depth);
            if discovered && is_target && depth <= traversal.max_depth() {
                return Some(depth);
            }
        }

        None
    }

    fn succeed(
        &self,
        traversal: &TraversalState,
        path: Vec<String>,
        depth: u32,
        mut stats: TraversalStats,
        started: Instant,
    ) -> TraversalResult {
        stats.pages_discovered = traversal.discovered_count() as u64;
        stats.links_beyond_depth = traversal.links_beyond_depth();
        tracing::info!(
            degrees = depth,
            pages_fetched = stats.pages_fetched,
            pages_discovered = stats.pages_discovered,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Path found: {}",
            path.join(" -> ")
        );
        TraversalResult::found(path, depth, stats)
    }

    fn report_progress(&self, traversal: &TraversalState, stats: &TraversalStats) {
        if stats.pages_fetched % self.settings.progress_interval.max(1) == 0 {
            tracing::info!(
                "Progress: {} pages fetched, {} discovered, {} in frontier, {} dead ends",
                stats.pages_fetched,
                traversal.discovered_count(),
                traversal.pending(),
                stats.fetch_failures
            );
        }
    }

    fn failure_message(&self) -> String {
        format!(
            "Could not find a path from '{}' to '{}' within {} steps.",
            self.extractor.title_from_url(self.start.url()),
            self.extractor.title_from_url(self.target.url()),
            self.settings.max_depth
        )
    }
}
