//! Bounded, score-ordered list of the best nodes found by one evaluation.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::graph::NodeId;
use super::traits::EvictionPolicy;

pub const DEFAULT_RECORD_RESULT_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedEntry {
    pub id: NodeId,
    pub score: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InsertOutcome {
    Inserted,
    /// The node was already recorded. Nodes are interned, so its parents are
    /// already shared with the existing entry.
    Merged,
    /// Scored below every entry of a non-empty list.
    Discarded,
    /// Inserted, and the given node was dropped to respect the capacity.
    Evicted(NodeId),
}

/// Top-K results kept in non-increasing score order, without duplicates.
#[derive(Clone, Debug)]
pub struct RecordedResults {
    entries: Vec<RecordedEntry>,
    capacity: usize,
}

impl Default for RecordedResults {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_RESULT_COUNT)
    }
}

impl RecordedResults {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity. Takes effect on the next insertion.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RecordedEntry] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Records `id` with the given score.
    ///
    /// The node goes in front of the first entry scoring `<=` it. If every
    /// entry scores higher the node is dropped, unless the list is empty.
    pub fn insert<P>(&mut self, id: NodeId, score: f32, policy: &mut P) -> InsertOutcome
    where
        P: EvictionPolicy + ?Sized,
    {
        if self.contains(id) {
            return InsertOutcome::Merged;
        }

        let position = match self.entries.iter().position(|entry| entry.score <= score) {
            Some(position) => position,
            None if self.entries.is_empty() => 0,
            None => return InsertOutcome::Discarded,
        };
        self.entries.insert(position, RecordedEntry { id, score });

        if self.entries.len() <= self.capacity {
            return InsertOutcome::Inserted;
        }

        let mut victim = policy.select_eviction(&self.entries);
        if victim >= self.entries.len() {
            victim = self.entries.len() - 1;
        }
        let evicted = self.entries.remove(victim);
        trace!("evicted {} (score {})", evicted.id, evicted.score);
        InsertOutcome::Evicted(evicted.id)
    }
}

/// Drops the lowest-scoring entry, i.e. the last one.
#[derive(Clone, Copy, Default, Debug)]
pub struct EvictLowest;

impl EvictionPolicy for EvictLowest {
    #[inline(always)]
    fn select_eviction(&mut self, entries: &[RecordedEntry]) -> usize {
        entries.len().saturating_sub(1)
    }
}

/// Drops a random entry among those tied for the lowest score.
#[derive(Clone, Debug)]
pub struct RandomTieBreak {
    rng: StdRng,
}

impl RandomTieBreak {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTieBreak {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionPolicy for RandomTieBreak {
    fn select_eviction(&mut self, entries: &[RecordedEntry]) -> usize {
        let last = match entries.last() {
            Some(last) => last,
            None => return 0,
        };
        let first_tied = entries
            .iter()
            .position(|entry| entry.score <= last.score)
            .unwrap_or(entries.len() - 1);
        self.rng.gen_range(first_tied..entries.len())
    }
}
