//! Lazy walk over the parent links of a node.
//!
//! Starting from a target node, every ancestor is visited depth first along
//! the parent links. Each visit carries the path that led to it, so a caller
//! can show how a state was reached. Ancestors reachable along several paths
//! are visited once per path. A node that already appears on its own path is
//! reported with `is_loop` set and is not expanded further, which keeps the
//! walk finite on cyclic graphs.

use super::graph::{GameGraph, NodeId};
use super::traits::GameNode;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParentEnumerableNode {
    pub node: NodeId,
    /// Path from `node` back to the target, nearest child first. Empty for
    /// the target itself.
    pub traversed_nodes: Vec<NodeId>,
    pub is_loop: bool,
    pub has_parents: bool,
}

impl ParentEnumerableNode {
    /// The full path from this node down to the target.
    pub fn path_to_target(&self) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.traversed_nodes.len() + 1);
        path.push(self.node);
        path.extend_from_slice(&self.traversed_nodes);
        path
    }
}

/// Restartable view over the ancestors of `target`. Every call to
/// [`iter`](Self::iter) starts a fresh traversal.
pub struct ParentEnumerable<'g, N: GameNode> {
    graph: &'g GameGraph<N>,
    target: NodeId,
}

impl<'g, N: GameNode> ParentEnumerable<'g, N> {
    pub fn new(graph: &'g GameGraph<N>, target: NodeId) -> Self {
        Self { graph, target }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn iter(&self) -> ParentIter<'g, N> {
        ParentIter {
            graph: self.graph,
            work: vec![self.target],
            traversed: Vec::new(),
        }
    }

    /// Every path from a parentless ancestor down to the target, root first.
    pub fn root_paths(&self) -> Vec<Vec<NodeId>> {
        self.iter()
            .filter(|visit| !visit.has_parents)
            .map(|visit| visit.path_to_target())
            .collect()
    }
}

impl<'a, 'g, N: GameNode> IntoIterator for &'a ParentEnumerable<'g, N> {
    type Item = ParentEnumerableNode;
    type IntoIter = ParentIter<'g, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ParentIter<'g, N: GameNode> {
    graph: &'g GameGraph<N>,
    work: Vec<NodeId>,
    // bottom is the target, top is the most recently expanded node
    traversed: Vec<NodeId>,
}

impl<'g, N: GameNode> ParentIter<'g, N> {
    /// The path this iteration currently stands on, target first.
    pub fn traversed_nodes(&self) -> &[NodeId] {
        &self.traversed
    }

    /// Pops the traversed path until its top lists `node` as a parent.
    fn unwind_to_child_of(&mut self, node: NodeId) {
        while let Some(&top) = self.traversed.last() {
            if self.graph.is_parent_of(node, top) {
                break;
            }
            self.traversed.pop();
        }
    }
}

impl<'g, N: GameNode> Iterator for ParentIter<'g, N> {
    type Item = ParentEnumerableNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.work.pop()?;
        let is_loop = self.traversed.contains(&node);
        let has_parents = self.graph.has_parents(node);
        let visit = ParentEnumerableNode {
            node,
            traversed_nodes: self.traversed.iter().rev().copied().collect(),
            is_loop,
            has_parents,
        };

        if has_parents && !is_loop {
            self.unwind_to_child_of(node);
            self.traversed.push(node);
            for &parent in self.graph.parents(node) {
                if !self.work.contains(&parent) {
                    self.work.push(parent);
                }
            }
        } else if let Some(&next) = self.work.last() {
            self.unwind_to_child_of(next);
        }

        Some(visit)
    }
}
