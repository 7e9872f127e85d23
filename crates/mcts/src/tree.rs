//! Arena-allocated search tree storage.
//!
//! Using a Vec<Node> with indices keeps parent links non-owning and makes
//! re-rooting a matter of compacting the vector.

use crate::node::{Node, NodeId};
use std::collections::VecDeque;

/// Arena holding every node of one search tree.
///
/// Index 0 is always the root.
#[derive(Debug, Clone)]
pub struct Arena<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A> Arena<S, A> {
    /// Create an arena whose root is `root`.
    ///
    /// Any parent or children the node carries are dropped.
    pub fn new(mut root: Node<S, A>) -> Self {
        root.parent = None;
        root.children.clear();
        Self { nodes: vec![root] }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S, A> {
        &mut self.nodes[id.0]
    }

    /// Checked lookup.
    pub fn try_get(&self, id: NodeId) -> Option<&Node<S, A>> {
        self.nodes.get(id.0)
    }

    /// Store a node without linking it, returning its ID.
    pub(crate) fn add(&mut self, node: Node<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Store `node` as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, mut node: Node<S, A>) -> NodeId {
        node.parent = Some(parent);
        node.children.clear();
        let id = self.add(node);
        self.get_mut(parent).children.push(id);
        id
    }

    /// Get the number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true, the root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<S, A> {
        self.get(NodeId::ROOT)
    }

    /// Make `keep` the new root, releasing every node outside its subtree.
    ///
    /// Surviving nodes are renumbered breadth-first, so the returned root is
    /// always `NodeId::ROOT` and children keep their relative order.
    pub fn retain_subtree(&mut self, keep: NodeId) -> NodeId {
        if keep == NodeId::ROOT {
            return NodeId::ROOT;
        }

        let mut old: Vec<Option<Node<S, A>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut remap: Vec<Option<usize>> = vec![None; old.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([keep.0]);

        while let Some(index) = queue.pop_front() {
            remap[index] = Some(order.len());
            order.push(index);
            if let Some(node) = &old[index] {
                queue.extend(node.children.iter().map(|c| c.0));
            }
        }

        let mut nodes = Vec::with_capacity(order.len());
        for index in order {
            let Some(mut node) = old[index].take() else {
                continue;
            };
            node.parent = node.parent.and_then(|p| remap[p.0]).map(NodeId);
            node.children = node
                .children
                .iter()
                .filter_map(|c| remap[c.0].map(NodeId))
                .collect();
            nodes.push(node);
        }
        nodes[0].parent = None;

        self.nodes = nodes;
        NodeId::ROOT
    }

    /// Discard everything and start over from `root`.
    pub fn reset(&mut self, root: Node<S, A>) {
        *self = Self::new(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Arena<u8, char>, [NodeId; 4]) {
        // 0 -> a(1) -> c(3)
        //   -> b(2) -> d(4)
        let mut arena = Arena::new(Node::new(0));
        let a = arena.attach(NodeId::ROOT, Node::with_action(1, 'a'));
        let b = arena.attach(NodeId::ROOT, Node::with_action(2, 'b'));
        let c = arena.attach(a, Node::with_action(3, 'c'));
        let d = arena.attach(b, Node::with_action(4, 'd'));
        (arena, [a, b, c, d])
    }

    #[test]
    fn test_arena_creation() {
        let arena: Arena<u8, char> = Arena::new(Node::new(9));
        assert_eq!(arena.len(), 1); // Root node
        assert!(!arena.is_empty());
        assert_eq!(arena.root().state, 9);
    }

    #[test]
    fn test_attach_links_both_ways() {
        let (arena, [a, b, c, _]) = sample();
        assert_eq!(arena.root().children, vec![a, b]);
        assert_eq!(arena.get(a).parent, Some(NodeId::ROOT));
        assert_eq!(arena.get(c).parent, Some(a));
    }

    #[test]
    fn test_retain_subtree_drops_siblings() {
        let (mut arena, [_, b, _, _]) = sample();
        arena.get_mut(b).score = 4.0;

        let root = arena.retain_subtree(b);

        assert_eq!(root, NodeId::ROOT);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.root().state, 2);
        assert_eq!(arena.root().score, 4.0);
        assert_eq!(arena.root().parent, None);

        let child = arena.root().children[0];
        assert_eq!(arena.get(child).state, 4);
        assert_eq!(arena.get(child).parent, Some(NodeId::ROOT));
    }

    #[test]
    fn test_only_root_is_parentless() {
        let (mut arena, [a, _, _, _]) = sample();
        let parentless = |arena: &Arena<u8, char>| {
            (0..arena.len())
                .filter(|&i| arena.get(NodeId(i)).parent.is_none())
                .collect::<Vec<_>>()
        };
        assert_eq!(parentless(&arena), vec![0]);

        arena.retain_subtree(a);
        assert_eq!(parentless(&arena), vec![0]);
    }

    #[test]
    fn test_retain_root_is_noop() {
        let (mut arena, _) = sample();
        arena.retain_subtree(NodeId::ROOT);
        assert_eq!(arena.len(), 5);
    }

    #[test]
    fn test_reset() {
        let (mut arena, _) = sample();
        arena.reset(Node::new(7));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.root().state, 7);
        assert!(arena.root().is_leaf());
    }
}
