//! Domain-agnostic tests for the search engine.
//!
//! Test coverage:
//! - Depth clamping and the exhaustive best-value selection
//! - Recorded results (bounds, ordering, merging of repeated states)
//! - The exhaustive driver (termination, terminal-only results, callbacks)
//! - Frontier deduplication
//! - Parent paths of search results

use super::*;
use crate::games::{MultiplierNode, NimNode};

/// A hand-written tree: 0 has children 1, 2 and 3; 9 is a dead end.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TableNode(u8);

impl GameNode for TableNode {
    type Children = Vec<TableNode>;

    fn evaluate(&self) -> f32 {
        match self.0 {
            1 | 2 => 5.0,
            3 => 1.0,
            _ => 0.0,
        }
    }

    fn is_terminal(&self) -> bool {
        self.0 != 0 && self.0 != 9
    }

    fn child_nodes(&self) -> Vec<TableNode> {
        match self.0 {
            0 => vec![TableNode(1), TableNode(2), TableNode(3)],
            _ => vec![],
        }
    }
}

fn values(engine: &GameTheory<MultiplierNode>, ids: &[NodeId]) -> Vec<u64> {
    engine
        .resolve(ids)
        .unwrap()
        .into_iter()
        .map(|node| node.value)
        .collect()
}

fn assert_non_increasing(engine: &GameTheory<MultiplierNode>) {
    let scores: Vec<f32> = engine
        .recorded_results()
        .entries()
        .iter()
        .map(|entry| entry.score)
        .collect();
    assert!(
        scores.windows(2).all(|pair| pair[0] >= pair[1]),
        "scores out of order: {:?}",
        scores
    );
}

#[test]
fn test_evaluate_without_current_node() {
    let mut engine = GameTheory::<MultiplierNode>::new();
    assert_eq!(engine.evaluate(3, 5), Err(GameTheoryError::NoCurrentNode));
}

#[test]
fn test_set_unknown_current_node() {
    let mut engine = GameTheory::<MultiplierNode>::new();
    assert_eq!(
        engine.set_current_node_id(NodeId(3)),
        Err(GameTheoryError::UnknownNode(NodeId(3)))
    );
}

#[test]
fn test_non_positive_depth_records_only_the_start() {
    for depth in &[0, -1, -100] {
        let mut engine = GameTheory::new();
        let start = engine.set_current_node(MultiplierNode::new(4));

        let results = engine.evaluate(*depth, 5).unwrap();

        assert_eq!(results, vec![start]);
        assert_eq!(engine.graph().len(), 1);
        assert_eq!(engine.stats().expanded_children(), 0);
        assert_eq!(engine.best_node(), Some(start));
    }
}

#[test]
fn test_evaluate_keeps_best_five_leaves() {
    let mut engine = GameTheory::new();
    engine.set_current_node(MultiplierNode::new(0));

    let results = engine.evaluate(3, 5).unwrap();

    assert_eq!(values(&engine, &results), vec![13, 10, 9, 7, 5]);
    assert_non_increasing(&engine);
    assert_eq!(engine.record_result_count(), 5);
    let best = engine.best_node().unwrap();
    assert_eq!(engine.graph().node(best).unwrap().value, 13);
}

#[test]
fn test_evaluate_respects_smaller_record_count() {
    let mut engine = GameTheory::new();
    engine.set_current_node(MultiplierNode::new(0));

    let results = engine.evaluate(3, 2).unwrap();
    assert_eq!(values(&engine, &results), vec![13, 10]);

    // results are cleared between evaluations
    let results = engine.evaluate(1, 5).unwrap();
    assert_eq!(values(&engine, &results), vec![1]);
}

#[test]
fn test_every_child_is_visited() {
    let mut engine = GameTheory::new();
    engine.set_current_node(MultiplierNode::new(0));

    engine.evaluate(3, 5).unwrap();

    // 1 + 3 * (1 + 3 * (1 + 3)) nodes in a full ternary tree of depth 3
    assert_eq!(engine.stats().visited_nodes(), 40);
    assert_eq!(engine.stats().expanded_children(), 39);
}

#[test]
fn test_repeated_state_is_recorded_once_with_both_parents() {
    let mut engine = GameTheory::new();
    engine.set_current_node(MultiplierNode::new(0));

    let results = engine.evaluate(3, 5).unwrap();

    let graph = engine.graph();
    let seven = graph.id_of(&MultiplierNode::new(7)).unwrap();
    let two = graph.id_of(&MultiplierNode::new(2)).unwrap();
    let three = graph.id_of(&MultiplierNode::new(3)).unwrap();
    assert_eq!(results.iter().filter(|&&id| id == seven).count(), 1);
    assert_eq!(graph.parents(seven), &[two, three]);
    assert!(engine.stats().merged() > 0);
}

#[test]
fn test_ties_prefer_the_later_branch() {
    let mut engine = GameTheory::new();
    engine.set_current_node(TableNode(0));

    let results = engine.evaluate(1, 5).unwrap();

    let one = engine.graph().id_of(&TableNode(1)).unwrap();
    let two = engine.graph().id_of(&TableNode(2)).unwrap();
    assert_eq!(engine.best_node(), Some(two));
    // 3 scores below everything already recorded and is dropped
    assert_eq!(results, vec![two, one]);
    assert_eq!(engine.stats().discarded(), 1);
}

#[test]
fn test_dead_end_records_nothing() {
    let mut engine = GameTheory::new();
    engine.set_current_node(TableNode(9));

    assert!(engine.evaluate(2, 5).unwrap().is_empty());
    assert_eq!(engine.best_node(), None);
    assert!(engine.evaluate_until_terminal(TableNode(9), 2, 5).unwrap().is_empty());
}

#[test]
fn test_custom_eviction_policy() {
    let mut engine = GameTheory::with_policy(RandomTieBreak::seeded(11));
    engine.set_current_node(MultiplierNode::new(0));

    let results = engine.evaluate(3, 3).unwrap();

    assert_eq!(results.len(), 3);
    let scores: Vec<f32> = engine
        .recorded_results()
        .entries()
        .iter()
        .map(|entry| entry.score)
        .collect();
    assert_eq!(scores, vec![13.0, 10.0, 9.0]);
}

#[test]
fn test_evaluate_nodes_resolves_states() {
    let mut engine = GameTheory::new();
    engine.set_current_node(MultiplierNode::new(4));

    let nodes = engine.evaluate_nodes(1, 5).unwrap();
    let values: Vec<u64> = nodes.iter().map(|node| node.value).collect();
    assert_eq!(values, vec![13, 9, 5]);
}

#[test]
fn test_search_uses_config() {
    let mut engine = GameTheory::with_config(SearchConfig {
        depth: 1,
        record_result_count: 2,
    });
    engine.set_current_node(MultiplierNode::new(4));

    let results = engine.search().unwrap();
    assert_eq!(values(&engine, &results), vec![13, 9]);
}

#[test]
fn test_until_terminal_on_terminal_start() {
    let mut engine = GameTheory::new();
    let mut steps = 0;

    let results = engine
        .evaluate_until_terminal_with(MultiplierNode::new(500), 3, 5, |_| steps += 1)
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(steps, 0);
    assert!(engine.graph().is_empty());
}

#[test]
fn test_until_terminal_rejects_zero_depth() {
    let mut engine = GameTheory::new();
    assert_eq!(
        engine.evaluate_until_terminal(MultiplierNode::new(0), 0, 5),
        Err(GameTheoryError::DepthTooLow)
    );
}

#[test]
fn test_until_terminal_returns_only_terminal_nodes() {
    let mut engine = GameTheory::new();
    let mut step_results = Vec::new();

    let results = engine
        .evaluate_until_terminal_with(MultiplierNode::new(0), 3, 5, |step| {
            step_results.push((step.results.len(), step.frontier_depth));
        })
        .unwrap();

    assert!(!results.is_empty());
    assert!(values(&engine, &results).iter().all(|&value| value > 100));
    assert_eq!(step_results.len(), engine.stats().frontier_steps());
    assert!(step_results.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    assert_eq!(step_results.last(), Some(&(results.len(), 0)));
}

#[test]
fn test_until_terminal_with_nim() {
    let mut engine = GameTheory::new();

    let results = engine
        .evaluate_until_terminal(NimNode::new(7, 3), 2, 5)
        .unwrap();

    let nodes = engine.resolve(&results).unwrap();
    assert!(nodes.iter().all(|node| node.pile == 0));
}

#[test]
fn test_terminal_results_trace_back_to_start() {
    let mut engine = GameTheory::new();
    let results = engine
        .evaluate_until_terminal(MultiplierNode::new(0), 3, 5)
        .unwrap();
    let start = engine.graph().id_of(&MultiplierNode::new(0)).unwrap();

    let target = results[0];
    let paths = engine.graph().parent_enumerable(target).root_paths();

    assert!(!paths.is_empty());
    for path in paths {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&target));
    }
}

#[test]
fn test_frontier_skips_queued_nodes() {
    let mut frontier = Frontier::new();
    assert!(frontier.push_unique(NodeId(1)));
    assert!(frontier.push_unique(NodeId(2)));
    assert!(!frontier.push_unique(NodeId(1)));
    assert_eq!(frontier.as_slice(), &[NodeId(1), NodeId(2)]);

    assert_eq!(frontier.pop(), Some(NodeId(2)));
    assert!(frontier.push_unique(NodeId(2)));
    assert_eq!(frontier.len(), 2);
}

#[test]
fn test_reset_forgets_everything() {
    let mut engine = GameTheory::new();
    engine.set_current_node(MultiplierNode::new(0));
    engine.evaluate(2, 5).unwrap();

    engine.reset();

    assert!(engine.graph().is_empty());
    assert!(engine.recorded_results().is_empty());
    assert_eq!(engine.current_node(), None);
    assert_eq!(engine.stats().evaluations(), 0);
}
