//! Document-local element identifiers.

use std::collections::BTreeSet;

use crate::tree::{Document, NodeId};

/// Monotonic identifier source for one document.
///
/// Seeded past the highest numeric id already present in the skeleton, so
/// generated ids never collide with ids the template carries. Past
/// `u64::MAX` the counter wraps to 1 and skips every taken id.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
    taken: BTreeSet<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: 1,
            taken: BTreeSet::new(),
        }
    }

    /// Start after `max`.
    pub fn starting_after(max: u64) -> Self {
        let mut ids = Self::new();
        ids.taken.insert(max);
        ids.next = successor(max);
        ids
    }

    /// Start after the highest numeric id in `doc`.
    pub fn for_document(doc: &Document) -> Self {
        let taken: BTreeSet<u64> = doc.numeric_ids().collect();
        let next = taken.last().copied().map_or(1, successor);
        Self { next, taken }
    }

    pub fn next_id(&mut self) -> u64 {
        while self.taken.contains(&self.next) {
            self.next = successor(self.next);
        }
        let id = self.next;
        self.taken.insert(id);
        self.next = successor(id);
        id
    }

    /// Allocate an id and set it as the `id` attribute of `node`.
    pub fn assign(&mut self, doc: &mut Document, node: NodeId) -> u64 {
        let id = self.next_id();
        doc.set_attr(node, "id", id.to_string());
        id
    }
}

// Ids are positive; 0 is never handed out.
fn successor(id: u64) -> u64 {
    id.checked_add(1).unwrap_or(1)
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
