//! BFS work queue with duplicate suppression

use crate::url::PageId;
use std::collections::{HashSet, VecDeque};

/// A discovered page waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub id: PageId,
    pub depth: u32,
}

/// FIFO queue of pending entries plus the enqueued and visited sets
///
/// Invariant: every visited id is also enqueued.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    enqueued: HashSet<PageId>,
    visited: HashSet<PageId>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` as discovered. Returns false if it already was.
    pub fn mark_enqueued(&mut self, id: &PageId) -> bool {
        if self.enqueued.contains(id) {
            return false;
        }
        self.enqueued.insert(id.clone())
    }

    /// Appends an entry. The id must already be marked enqueued.
    pub fn push(&mut self, entry: FrontierEntry) {
        debug_assert!(self.enqueued.contains(&entry.id));
        self.queue.push_back(entry);
    }

    /// Pops up to `n` entries in FIFO order
    pub fn pop_batch(&mut self, n: usize) -> Vec<FrontierEntry> {
        let take = n.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    /// Pops up to `n` entries at exactly `depth`, stopping at the first deeper one
    pub fn pop_level(&mut self, n: usize, depth: u32) -> Vec<FrontierEntry> {
        let take = self
            .queue
            .iter()
            .take(n)
            .take_while(|entry| entry.depth == depth)
            .count();
        self.queue.drain(..take).collect()
    }

    /// Depth of the entry that would be popped next
    pub fn front_depth(&self) -> Option<u32> {
        self.queue.front().map(|entry| entry.depth)
    }

    /// Records `id` as fully expanded
    ///
    /// Returns false if the id was never enqueued or was already visited.
    pub fn mark_visited(&mut self, id: &PageId) -> bool {
        if !self.enqueued.contains(id) || self.visited.contains(id) {
            return false;
        }
        self.visited.insert(id.clone())
    }

    pub fn is_enqueued(&self, id: &PageId) -> bool {
        self.enqueued.contains(id)
    }

    pub fn is_visited(&self, id: &PageId) -> bool {
        self.visited.contains(id)
    }

    /// Number of entries waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn enqueued_count(&self) -> usize {
        self.enqueued.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
