//! Width-bounded set of in-flight fetches
//!
//! This module handles:
//! - Limiting the number of concurrently in-flight fetches to a fixed width
//! - Wrapping every fetch in its own timeout
//! - Yielding completions in the order they finish
//! - Keeping dispatch to one BFS depth level at a time
//!
//! Dropping a `Scheduler` drops every pending future, which abandons the
//! fetches still in flight.

use crate::crawler::fetcher::{FetchedPage, PageFetcher};
use crate::state::FrontierEntry;
use crate::FetchError;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;

/// A fetch that has finished, successfully or not
#[derive(Debug)]
pub struct CompletedFetch {
    /// The frontier entry the fetch was issued for
    pub entry: FrontierEntry,

    /// Fetched page, or the reason this branch is a dead end
    pub result: Result<FetchedPage, FetchError>,
}

/// Bounded pool of in-flight fetches
pub struct Scheduler<'a> {
    width: usize,
    level: Option<u32>,
    in_flight: FuturesUnordered<BoxFuture<'a, CompletedFetch>>,
}

impl<'a> Scheduler<'a> {
    /// Creates a scheduler allowing at most `width` fetches at once
    ///
    /// A width of 0 is treated as 1.
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            level: None,
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Free slots
    pub fn capacity(&self) -> usize {
        self.width.saturating_sub(self.in_flight.len())
    }

    /// Depth of the fetches currently in flight, if any
    pub fn level(&self) -> Option<u32> {
        if self.is_idle() {
            None
        } else {
            self.level
        }
    }

    /// Issues a fetch for `entry`, bounded by `timeout`
    ///
    /// A fetch that exceeds its timeout completes with `FetchError::Timeout`.
    pub fn dispatch<F>(&mut self, fetcher: &'a F, entry: FrontierEntry, timeout: Duration)
    where
        F: PageFetcher + ?Sized,
    {
        debug_assert!(self.capacity() > 0);
        debug_assert!(self.level().map_or(true, |level| level == entry.depth));
        self.level = Some(entry.depth);

        self.in_flight.push(Box::pin(async move {
            let result = match tokio::time::timeout(timeout, fetcher.fetch(entry.id.url())).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout),
            };
            CompletedFetch { entry, result }
        }));
    }

    /// Waits for the next fetch to finish. Returns None when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<CompletedFetch> {
        self.in_flight.next().await
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}
