//! A number that grows along every move.
//!
//! Move `i` turns `value` into `value * (i + 1) + 1`, so every line of play
//! climbs strictly until it passes the threshold and the game ends.

use crate::game_theory::GameNode;

pub const DEFAULT_BRANCHING: u64 = 3;
pub const DEFAULT_THRESHOLD: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MultiplierNode {
    pub value: u64,
    pub branching: u64,
    pub threshold: u64,
}

impl MultiplierNode {
    pub fn new(value: u64) -> Self {
        Self::with_rules(value, DEFAULT_BRANCHING, DEFAULT_THRESHOLD)
    }

    pub fn with_rules(value: u64, branching: u64, threshold: u64) -> Self {
        Self {
            value,
            branching,
            threshold,
        }
    }
}

impl GameNode for MultiplierNode {
    type Children = Vec<MultiplierNode>;

    fn evaluate(&self) -> f32 {
        self.value as f32
    }

    fn is_terminal(&self) -> bool {
        self.value > self.threshold
    }

    fn child_nodes(&self) -> Vec<MultiplierNode> {
        (0..self.branching)
            .map(|i| MultiplierNode {
                value: self.value.saturating_mul(i + 1).saturating_add(1),
                ..*self
            })
            .collect()
    }
}
