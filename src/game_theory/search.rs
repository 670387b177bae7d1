//! The search engine.
//!
//! # Best-value selection
//!
//! [`GameTheory::evaluate`] walks the state graph depth first from the current
//! node. Every node that is terminal, or reached with no depth left, is offered
//! to the bounded [`RecordedResults`] list. Inner nodes return the best leaf of
//! their subtree, preferring the later branch when two leaves score the same.
//! Every child of every inner node is visited; there is no beta cutoff.
//!
//! # Exhaustive driver
//!
//! [`GameTheory::evaluate_until_terminal`] keeps a frontier stack of
//! non-terminal states. Each step pops one, evaluates from it, keeps the
//! terminal nodes of the batch and pushes the non-terminal ones back, skipping
//! states already waiting on the stack. It stops when the frontier is empty.
//!
//! Nothing bounds the amount of work besides `is_terminal` and the depth.
//! A game whose states can lead back to themselves through non-terminal nodes
//! may never drain the frontier.

use log::{debug, trace};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::graph::{GameGraph, NodeId};
use super::recorded_results::{
    EvictLowest, InsertOutcome, RecordedResults, DEFAULT_RECORD_RESULT_COUNT,
};
use super::traits::{EvictionPolicy, GameNode};

#[derive(Error, Debug, PartialEq)]
pub enum GameTheoryError {
    #[error("no current node to search from")]
    NoCurrentNode,
    #[error("node {0} does not belong to this graph")]
    UnknownNode(NodeId),
    #[error("depth must be at least 1 to search until terminal")]
    DepthTooLow,
}

/// Search parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Negative values behave like 0.
    pub depth: i32,
    pub record_result_count: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            record_result_count: DEFAULT_RECORD_RESULT_COUNT,
        }
    }
}

/// Statistics collected during search. Cumulative until [`GameTheory::reset`].
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    evaluations: usize,
    visited_nodes: usize,
    expanded_children: usize,
    recorded: usize,
    merged: usize,
    discarded: usize,
    evicted: usize,
    frontier_steps: usize,
}

impl SearchStats {
    fn record_outcome(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.recorded += 1,
            InsertOutcome::Merged => self.merged += 1,
            InsertOutcome::Discarded => self.discarded += 1,
            InsertOutcome::Evicted(_) => {
                self.recorded += 1;
                self.evicted += 1;
            }
        }
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn visited_nodes(&self) -> usize {
        self.visited_nodes
    }

    pub fn expanded_children(&self) -> usize {
        self.expanded_children
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn merged(&self) -> usize {
        self.merged
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn evicted(&self) -> usize {
        self.evicted
    }

    pub fn frontier_steps(&self) -> usize {
        self.frontier_steps
    }
}

/// Stack of states still waiting to be searched from.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    stack: Vec<NodeId>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `id` unless it is already somewhere on the stack.
    pub fn push_unique(&mut self, id: NodeId) -> bool {
        if self.stack.contains(&id) {
            return false;
        }
        self.stack.push(id);
        true
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.stack
    }
}

/// Progress report passed to the `evaluate_until_terminal_with` callback.
#[derive(Clone, Copy, Debug)]
pub struct Step<'a> {
    /// Terminal results accumulated so far.
    pub results: &'a [NodeId],
    /// Number of states left on the frontier.
    pub frontier_depth: usize,
}

pub struct GameTheory<N: GameNode, P: EvictionPolicy = EvictLowest> {
    graph: GameGraph<N>,
    recorded: RecordedResults,
    current_node: Option<NodeId>,
    best_node: Option<NodeId>,
    policy: P,
    config: SearchConfig,
    stats: SearchStats,
}

impl<N: GameNode> Default for GameTheory<N, EvictLowest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GameNode> GameTheory<N, EvictLowest> {
    pub fn new() -> Self {
        Self::with_policy(EvictLowest)
    }

    pub fn with_config(config: SearchConfig) -> Self {
        let mut engine = Self::new();
        engine.set_config(config);
        engine
    }
}

impl<N: GameNode, P: EvictionPolicy> GameTheory<N, P> {
    pub fn with_policy(policy: P) -> Self {
        let config = SearchConfig::default();
        Self {
            graph: GameGraph::new(),
            recorded: RecordedResults::new(config.record_result_count),
            current_node: None,
            best_node: None,
            policy,
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
        self.recorded.set_capacity(config.record_result_count);
    }

    pub fn graph(&self) -> &GameGraph<N> {
        &self.graph
    }

    /// Mutable access to the graph, e.g. to add or remove parent links.
    pub fn graph_mut(&mut self) -> &mut GameGraph<N> {
        &mut self.graph
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn recorded_results(&self) -> &RecordedResults {
        &self.recorded
    }

    pub fn record_result_count(&self) -> usize {
        self.recorded.capacity()
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current_node
    }

    /// Interns `node` and makes it the root of the next evaluation.
    pub fn set_current_node(&mut self, node: N) -> NodeId {
        let id = self.graph.intern(node);
        self.current_node = Some(id);
        id
    }

    pub fn set_current_node_id(&mut self, id: NodeId) -> Result<(), GameTheoryError> {
        if !self.graph.contains(id) {
            return Err(GameTheoryError::UnknownNode(id));
        }
        self.current_node = Some(id);
        Ok(())
    }

    /// The node picked by the last best-value selection, if any.
    pub fn best_node(&self) -> Option<NodeId> {
        self.best_node
    }

    /// Forgets every discovered state, the results and the statistics.
    pub fn reset(&mut self) {
        self.graph.clear();
        self.recorded.clear();
        self.current_node = None;
        self.best_node = None;
        self.stats = SearchStats::default();
    }

    /// Searches `depth` plies below the current node and returns the best
    /// `record_result_count` leaves, highest score first.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn evaluate(
        &mut self,
        depth: i32,
        record_result_count: usize,
    ) -> Result<Vec<NodeId>, GameTheoryError> {
        let current = self.current_node.ok_or(GameTheoryError::NoCurrentNode)?;
        if !self.graph.contains(current) {
            return Err(GameTheoryError::UnknownNode(current));
        }

        let depth = depth.max(0) as u32;
        self.recorded.set_capacity(record_result_count);
        self.recorded.clear();
        self.stats.evaluations += 1;

        self.best_node = self.alpha(current, depth).map(|(id, _)| id);

        debug!(
            "evaluate from {} at depth {}: {} results, best {:?}",
            current,
            depth,
            self.recorded.len(),
            self.best_node
        );
        Ok(self.recorded.ids())
    }

    /// Like [`evaluate`](Self::evaluate), resolved to the recorded states.
    pub fn evaluate_nodes(
        &mut self,
        depth: i32,
        record_result_count: usize,
    ) -> Result<Vec<N>, GameTheoryError> {
        let ids = self.evaluate(depth, record_result_count)?;
        self.resolve(&ids)
    }

    /// Evaluates with the configured depth and result count.
    pub fn search(&mut self) -> Result<Vec<NodeId>, GameTheoryError> {
        let SearchConfig {
            depth,
            record_result_count,
        } = self.config;
        self.evaluate(depth, record_result_count)
    }

    pub fn resolve(&self, ids: &[NodeId]) -> Result<Vec<N>, GameTheoryError> {
        ids.iter()
            .map(|&id| self.graph.get(id).map(|node| node.clone()))
            .collect()
    }

    /// Returns the best leaf below `id` and its score, or `None` for a
    /// non-terminal dead end.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn alpha(&mut self, id: NodeId, depth: u32) -> Option<(NodeId, f32)> {
        self.stats.visited_nodes += 1;
        let node = self
            .graph
            .node(id)
            .expect("search only visits interned nodes")
            .clone();

        if depth == 0 || node.is_terminal() {
            let score = node.evaluate();
            let outcome = self.recorded.insert(id, score, &mut self.policy);
            trace!("record {} score {}: {:?}", id, score, outcome);
            self.stats.record_outcome(outcome);
            return Some((id, score));
        }

        let mut alpha: Option<(NodeId, f32)> = None;
        for child in node.child_nodes() {
            let child_id = self.graph.intern(child);
            self.graph.add_parent(child_id, id);
            self.stats.expanded_children += 1;

            if let Some((candidate, score)) = self.alpha(child_id, depth - 1) {
                match alpha {
                    Some((_, best_score)) if score < best_score => {}
                    _ => alpha = Some((candidate, score)),
                }
            }
        }
        alpha
    }

    /// Searches until only terminal states are left, returning every terminal
    /// node recorded along the way.
    pub fn evaluate_until_terminal(
        &mut self,
        start: N,
        depth: i32,
        record_node_count: usize,
    ) -> Result<Vec<NodeId>, GameTheoryError> {
        self.evaluate_until_terminal_with(start, depth, record_node_count, |_| {})
    }

    /// [`evaluate_until_terminal`](Self::evaluate_until_terminal) with a
    /// callback invoked after every frontier step.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn evaluate_until_terminal_with<F>(
        &mut self,
        start: N,
        depth: i32,
        record_node_count: usize,
        mut on_stepped: F,
    ) -> Result<Vec<NodeId>, GameTheoryError>
    where
        F: FnMut(Step<'_>),
    {
        if start.is_terminal() {
            return Ok(Vec::new());
        }
        // With no depth every evaluation records the start node itself, which
        // would go straight back onto the frontier.
        if depth < 1 {
            return Err(GameTheoryError::DepthTooLow);
        }

        let mut frontier = Frontier::new();
        frontier.push_unique(self.graph.intern(start));
        let mut results = Vec::new();

        while let Some(id) = frontier.pop() {
            self.current_node = Some(id);
            let batch = self.evaluate(depth, record_node_count)?;

            for batch_id in batch {
                if self.graph.get(batch_id)?.is_terminal() {
                    results.push(batch_id);
                } else {
                    frontier.push_unique(batch_id);
                }
            }
            self.stats.frontier_steps += 1;

            debug!(
                "step from {}: {} terminal results, frontier depth {}",
                id,
                results.len(),
                frontier.len()
            );
            on_stepped(Step {
                results: &results,
                frontier_depth: frontier.len(),
            });
        }

        Ok(results)
    }

    /// Runs the exhaustive driver with the configured depth and result count.
    pub fn search_until_terminal(&mut self, start: N) -> Result<Vec<NodeId>, GameTheoryError> {
        let SearchConfig {
            depth,
            record_result_count,
        } = self.config;
        self.evaluate_until_terminal(start, depth, record_result_count)
    }
}
