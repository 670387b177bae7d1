//! Common types re-exported for convenience.

pub use crate::game_theory::{
    EvictLowest, EvictionPolicy, GameGraph, GameNode, GameTheory, GameTheoryError, NodeId,
    ParentEnumerableNode, SearchConfig,
};
pub use crate::games::{MultiplierNode, NimNode};
