//! Combined Frontier + PathTable state for one traversal run
//!
//! All mutation goes through `&mut self`, so one owner serializes every
//! check-and-insert.

use crate::state::frontier::{Frontier, FrontierEntry};
use crate::state::path_table::{PageRecord, PathTable};
use crate::url::PageId;

/// Traversal memory scoped to a single run
#[derive(Debug)]
pub struct TraversalState {
    max_depth: u32,
    paths: PathTable,
    frontier: Frontier,
    links_beyond_depth: u64,
}

impl TraversalState {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            paths: PathTable::new(),
            frontier: Frontier::new(),
            links_beyond_depth: 0,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Records the start page as the root (depth 0, no parent)
    ///
    /// The root is marked enqueued but never queued: it is expanded directly.
    pub fn seed(&mut self, start: PageId, title: String) {
        self.frontier.mark_enqueued(&start);
        self.paths.insert_root(start, title);
    }

    /// Registers a link found on `parent`
    ///
    /// Returns false for a duplicate. A new page always gets a record; it is
    /// queued for fetching only when `depth <= max_depth`.
    pub fn discover(&mut self, id: PageId, title: String, parent: &PageId, depth: u32) -> bool {
        if self.frontier.is_enqueued(&id) {
            return false;
        }

        if !self.paths.insert(id.clone(), title, parent, depth) {
            return false;
        }
        self.frontier.mark_enqueued(&id);

        if depth <= self.max_depth {
            self.frontier.push(FrontierEntry { id, depth });
        } else {
            self.links_beyond_depth += 1;
        }
        true
    }

    /// Pops up to `n` entries in FIFO order
    pub fn next_batch(&mut self, n: usize) -> Vec<FrontierEntry> {
        self.frontier.pop_batch(n)
    }

    /// Pops up to `n` entries of a single depth level
    ///
    /// With `level` set, only entries at that depth are returned; otherwise the
    /// level is taken from the head of the queue.
    pub fn next_level_batch(&mut self, n: usize, level: Option<u32>) -> Vec<FrontierEntry> {
        match level.or_else(|| self.frontier.front_depth()) {
            Some(depth) => self.frontier.pop_level(n, depth),
            None => Vec::new(),
        }
    }

    /// Marks a page as fully expanded. Returns false if it already was.
    pub fn mark_visited(&mut self, id: &PageId) -> bool {
        self.frontier.mark_visited(id)
    }

    /// Claims the page a redirected fetch landed on
    ///
    /// Returns true when the fetched content should be expanded under the
    /// redirecting entry; `landed` is then recorded as enqueued and visited so
    /// it is neither fetched nor expanded again. Returns false when `landed`
    /// was already expanded, or is waiting at the same or a shallower level
    /// and will be expanded under its own id.
    pub fn claim_landing(&mut self, landed: &PageId, depth: u32) -> bool {
        if self.frontier.is_visited(landed) {
            return false;
        }
        if let Some(record) = self.paths.get(landed) {
            if record.depth <= depth {
                return false;
            }
        }
        self.frontier.mark_enqueued(landed);
        self.frontier.mark_visited(landed)
    }

    /// Titles from the start page to `id`
    pub fn reconstruct_path(&self, id: &PageId) -> Vec<String> {
        self.paths.reconstruct_path(id)
    }

    pub fn record(&self, id: &PageId) -> Option<&PageRecord> {
        self.paths.get(id)
    }

    pub fn is_visited(&self, id: &PageId) -> bool {
        self.frontier.is_visited(id)
    }

    /// Entries still waiting to be fetched
    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    /// Pages discovered so far, the root included
    pub fn discovered_count(&self) -> usize {
        self.frontier.enqueued_count()
    }

    pub fn visited_count(&self) -> usize {
        self.frontier.visited_count()
    }

    /// Discoveries recorded but not queued because of the depth cap
    pub fn links_beyond_depth(&self) -> u64 {
        self.links_beyond_depth
    }
}
