//! Arena of interned game states and their parent back-references.
//!
//! The state graph is not a tree: the same position can be reached through
//! several move orders, so every node keeps a set of parents rather than a
//! single owner. Nodes are stored once per distinct state and referenced by
//! [`NodeId`]; parent links are plain handles and never own anything.

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::parent_enumerable::ParentEnumerable;
use super::search::GameTheoryError;
use super::traits::GameNode;

/// Handle of a node inside a [`GameGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// Insertion ordered so traversals are reproducible.
type ParentSet = SmallVec<[NodeId; 4]>;

pub struct GameGraph<N: GameNode> {
    nodes: Vec<N>,
    parents: Vec<ParentSet>,
    index: FxHashMap<N, NodeId>,
}

impl<N: GameNode> Default for GameGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GameNode> GameGraph<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            parents: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Returns the handle of the node equal to `node`, allocating one if this
    /// state has not been seen before.
    pub fn intern(&mut self, node: N) -> NodeId {
        if let Some(&id) = self.index.get(&node) {
            return id;
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node.clone());
        self.parents.push(ParentSet::new());
        self.index.insert(node, id);
        id
    }

    pub fn id_of(&self, node: &N) -> Option<NodeId> {
        self.index.get(node).copied()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id.index())
    }

    pub fn get(&self, id: NodeId) -> Result<&N, GameTheoryError> {
        self.node(id).ok_or(GameTheoryError::UnknownNode(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.parents.clear();
        self.index.clear();
    }

    /// Parents of `id` in registration order. Unknown handles have none.
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.parents
            .get(id.index())
            .map(|set| set.as_slice())
            .unwrap_or(&[])
    }

    #[inline]
    pub fn has_parents(&self, id: NodeId) -> bool {
        !self.parents(id).is_empty()
    }

    #[inline]
    pub fn is_parent_of(&self, parent: NodeId, child: NodeId) -> bool {
        self.parents(child).contains(&parent)
    }

    /// Registers `parent` as a parent of `child`.
    ///
    /// Returns false when the link already existed or either handle does not
    /// belong to this graph; both cases are otherwise ignored.
    pub fn add_parent(&mut self, child: NodeId, parent: NodeId) -> bool {
        if !self.contains(parent) {
            return false;
        }
        match self.parents.get_mut(child.index()) {
            Some(set) if !set.contains(&parent) => {
                set.push(parent);
                true
            }
            _ => false,
        }
    }

    /// Removes the link from `child` to `parent`. Returns false if there was none.
    pub fn remove_parent(&mut self, child: NodeId, parent: NodeId) -> bool {
        match self.parents.get_mut(child.index()) {
            Some(set) => match set.iter().position(|&p| p == parent) {
                Some(pos) => {
                    set.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Adds every parent of `from` that `into` does not already have.
    /// Returns the number of links added.
    pub fn merge_parents(&mut self, into: NodeId, from: NodeId) -> usize {
        if into == from {
            return 0;
        }
        let incoming: ParentSet = self.parents(from).iter().copied().collect();
        incoming
            .into_iter()
            .filter(|&parent| self.add_parent(into, parent))
            .count()
    }

    /// Lazily walks the parent links of `target`.
    pub fn parent_enumerable(&self, target: NodeId) -> ParentEnumerable<'_, N> {
        ParentEnumerable::new(self, target)
    }
}
