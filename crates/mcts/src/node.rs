//! Search tree node types.
//!
//! Nodes live in an arena and point at each other by index, so the parent
//! link never owns anything.

use std::fmt;

/// Index into the node arena.
///
/// Ids are only meaningful for the arena that handed them out. Re-rooting
/// compacts the arena, so ids taken before a re-root must not be reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A vertex of the search tree.
#[derive(Clone, Debug)]
pub struct Node<S, A> {
    /// State reached at this node.
    pub state: S,

    /// Action that turned the parent's state into `state` (None for root).
    pub action: Option<A>,

    /// Parent index; always None for the root.
    pub parent: Option<NodeId>,

    /// Children in creation order.
    pub children: Vec<NodeId>,

    /// Accumulated score, only touched by backpropagation.
    pub score: f64,
}

impl<S, A> Node<S, A> {
    /// Create a detached node without an action.
    pub fn new(state: S) -> Self {
        Self {
            state,
            action: None,
            parent: None,
            children: Vec::new(),
            score: 0.0,
        }
    }

    /// Create a detached node reached through `action`.
    pub fn with_action(state: S, action: A) -> Self {
        Self {
            action: Some(action),
            ..Self::new(state)
        }
    }

    /// Add `result` to the accumulated score.
    pub fn update(&mut self, result: f64) {
        self.score += result;
    }

    /// A node without children is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<S: fmt::Display, A: fmt::Display> fmt::Display for Node<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)?;
        match &self.action {
            Some(action) => write!(f, " via {}", action)?,
            None => write!(f, " (root)")?,
        }
        write!(f, " score={}", self.score)
    }
}
