//! Generic game-tree search over a graph of interned game states.
//!
//! Nodes are stored in a [`GameGraph`] arena and addressed by [`NodeId`]. The
//! [`GameTheory`] engine runs an exhaustive depth-limited best-value search,
//! keeping the best leaves in a bounded [`RecordedResults`] list, and can keep
//! re-seeding itself from non-terminal results until only terminal states
//! remain. [`ParentEnumerable`] walks the parent links back to explain how a
//! state was reached.

mod graph;
mod parent_enumerable;
mod recorded_results;
mod search;
mod traits;

#[cfg(test)]
mod tests;

pub use graph::{GameGraph, NodeId};
pub use parent_enumerable::{ParentEnumerable, ParentEnumerableNode, ParentIter};
pub use recorded_results::{
    EvictLowest, InsertOutcome, RandomTieBreak, RecordedEntry, RecordedResults,
    DEFAULT_RECORD_RESULT_COUNT,
};
pub use search::{Frontier, GameTheory, GameTheoryError, SearchConfig, SearchStats, Step};
pub use traits::{EvictionPolicy, GameNode};
