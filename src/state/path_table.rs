//! Discovery records and path reconstruction
//!
//! The table is an arena: records live in a `Vec`, an index maps each
//! `PageId` to its slot, and every record keeps the slot of its parent.
//! Reconstruction chases slots iteratively, so path length is not bounded by
//! stack depth.

use crate::url::PageId;
use std::collections::HashMap;

/// Discovery record for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub id: PageId,
    pub title: String,
    pub parent: Option<PageId>,
    pub depth: u32,
    parent_slot: Option<usize>,
}

/// Mapping from page identity to its first discovery
#[derive(Debug, Default)]
pub struct PathTable {
    records: Vec<PageRecord>,
    index: HashMap<PageId, usize>,
}

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the root record (no parent, depth 0)
    ///
    /// Returns false if the id is already recorded.
    pub fn insert_root(&mut self, id: PageId, title: String) -> bool {
        self.insert_slot(id, title, None, 0)
    }

    /// Inserts a record discovered from `parent`
    ///
    /// The first discovery wins: returns false and leaves the table untouched
    /// if `id` is already recorded or `parent` is unknown.
    pub fn insert(&mut self, id: PageId, title: String, parent: &PageId, depth: u32) -> bool {
        match self.index.get(parent).copied() {
            Some(slot) => self.insert_slot(id, title, Some(slot), depth),
            None => false,
        }
    }

    fn insert_slot(
        &mut self,
        id: PageId,
        title: String,
        parent_slot: Option<usize>,
        depth: u32,
    ) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }

        let parent = parent_slot.map(|slot| self.records[slot].id.clone());
        let slot = self.records.len();
        self.index.insert(id.clone(), slot);
        self.records.push(PageRecord {
            id,
            title,
            parent,
            depth,
            parent_slot,
        });
        true
    }

    pub fn get(&self, id: &PageId) -> Option<&PageRecord> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Titles from the root to `id`, inclusive
    ///
    /// Returns an empty path for an unknown id.
    pub fn reconstruct_path(&self, id: &PageId) -> Vec<String> {
        let mut titles = Vec::new();
        let mut cursor = self.index.get(id).copied();

        while let Some(slot) = cursor {
            let record = &self.records[slot];
            titles.push(record.title.clone());
            cursor = record.parent_slot;
        }

        titles.reverse();
        titles
    }
}
