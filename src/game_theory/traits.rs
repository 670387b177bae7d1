//! Core traits for the generic game-tree search.

use std::fmt::Debug;
use std::hash::Hash;

use super::recorded_results::RecordedEntry;

/// A single game state.
///
/// Equality and hashing must describe the *state* (board position, pile size,
/// ...), not the allocation: the engine interns nodes by value, so two equal
/// nodes are treated as one vertex of the state graph. Inconsistent `Eq` and
/// `Hash` implementations break deduplication silently.
pub trait GameNode: Clone + Eq + Hash + Debug {
    type Children: IntoIterator<Item = Self>;

    /// Heuristic value of this state. Higher is better. Must be deterministic.
    fn evaluate(&self) -> f32;

    /// Returns true when the search should not expand this state any further.
    fn is_terminal(&self) -> bool;

    /// Generates the successor states, one per legal move.
    ///
    /// Called again every time the node is expanded. The sequence must be
    /// finite; bounding the branching factor is the implementor's job.
    fn child_nodes(&self) -> Self::Children;
}

/// Chooses which entry to drop when the recorded results overflow.
pub trait EvictionPolicy {
    /// Returns the index of the entry to remove. `entries` is sorted by
    /// non-increasing score and holds one more entry than the capacity.
    fn select_eviction(&mut self, entries: &[RecordedEntry]) -> usize;
}

impl<F> EvictionPolicy for F
where
    F: FnMut(&[RecordedEntry]) -> usize,
{
    fn select_eviction(&mut self, entries: &[RecordedEntry]) -> usize {
        self(entries)
    }
}
