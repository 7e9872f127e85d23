//! Monte Carlo Tree Search engine.
//!
//! Each search iteration runs four steps:
//! 1. Selection: descend from the search node through first children to a leaf
//! 2. Expansion: ask the transition for a new state and attach it
//! 3. Simulation: if the new state is not terminal, roll out until it is
//! 4. Backpropagation: add the terminal status to every node on the way up
//!
//! Selection is a fixed rule. It always takes the first child and never looks
//! at scores.

use crate::{
    config::MctsConfig,
    node::{Node, NodeId},
    transition::{Expansion, Transition},
    tree::Arena,
};
use montecarlo_core::{MctsError, Result, Status};
use tracing::{debug, trace};

/// Monte Carlo search tree over a caller-supplied transition.
///
/// Generic over:
/// - `T`: the transition capability, which also fixes the state, action and
///   player types
pub struct MonteCarloTree<T: Transition> {
    config: MctsConfig,
    transition: T,
    player: T::Player,
    arena: Arena<T::State, T::Action>,
}

impl<T: Transition> MonteCarloTree<T> {
    /// Create a tree rooted at `state` with the default config.
    pub fn new(state: T::State, player: T::Player, transition: T) -> Self {
        Self::with_config(state, player, transition, MctsConfig::default())
    }

    /// Create a tree rooted at `state`.
    pub fn with_config(state: T::State, player: T::Player, transition: T, config: MctsConfig) -> Self {
        Self {
            config,
            transition,
            player,
            arena: Arena::new(Node::new(state)),
        }
    }

    /// Record the action that produced the initial state.
    pub fn with_action(mut self, action: T::Action) -> Self {
        self.arena.get_mut(NodeId::ROOT).action = Some(action);
        self
    }

    /// The root node id. Always `NodeId::ROOT`.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The root node.
    pub fn root_node(&self) -> &Node<T::State, T::Action> {
        self.arena.root()
    }

    /// Look up a node, returning None for stale ids.
    pub fn node(&self, id: NodeId) -> Option<&Node<T::State, T::Action>> {
        self.arena.try_get(id)
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn player(&self) -> &T::Player {
        &self.player
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// The state at the root.
    pub fn current_state(&self) -> &T::State {
        &self.arena.root().state
    }

    /// Resolve an optional node argument to a valid id, defaulting to the root.
    fn resolve(&self, node: Option<NodeId>) -> Result<NodeId> {
        match node {
            None => Ok(NodeId::ROOT),
            Some(id) if id.0 < self.arena.len() => Ok(id),
            Some(id) => Err(MctsError::InvalidNode(id.0)),
        }
    }

    /// Descend through first children until reaching a leaf.
    pub fn select(&self, node: Option<NodeId>) -> Result<NodeId> {
        let mut current = self.resolve(node)?;
        while let Some(&first) = self.arena.get(current).children.first() {
            current = first;
        }
        Ok(current)
    }

    /// Ask the transition for a new state below `node`.
    ///
    /// The proposal is returned as-is; attaching it is up to the caller.
    pub fn expand(&self, node: Option<NodeId>) -> Result<Expansion<T::State, T::Action>> {
        let id = self.resolve(node)?;
        let node = self.arena.get(id);
        let existing: Vec<&T::State> = node
            .children
            .iter()
            .map(|&child| &self.arena.get(child).state)
            .collect();
        Ok(self
            .transition
            .propose_expansion(&node.state, &self.player, &existing))
    }

    /// Roll out from `node` until the transition reports a terminal status.
    ///
    /// Every rollout node is attached as the only child of the previous one.
    /// Returns the terminal node and its status.
    ///
    /// # Errors
    /// Returns `MctsError::RolloutLimitExceeded` if no terminal status is seen
    /// within `max_rollout_depth` steps. Nodes added so far stay in the tree.
    pub fn simulate(&mut self, node: Option<NodeId>) -> Result<(NodeId, Status)> {
        let mut current = self.resolve(node)?;

        for _ in 0..self.config.max_rollout_depth {
            let (next, status) = self
                .transition
                .rollout(&self.arena.get(current).state, &self.player);
            current = self.arena.attach(current, next);
            if status.is_terminal() {
                return Ok((current, status));
            }
        }

        Err(MctsError::RolloutLimitExceeded {
            limit: self.config.max_rollout_depth,
        })
    }

    /// Add `result` to `node` and every ancestor up to the root.
    ///
    /// With `result` absent, the walk instead takes `node`'s own score as the
    /// result and leaves `node` itself untouched; only its ancestors change.
    pub fn backpropagate(&mut self, node: NodeId, result: Option<f64>) -> Result<()> {
        let start = self.resolve(Some(node))?;

        let result = match result {
            Some(result) => {
                self.arena.get_mut(start).update(result);
                result
            }
            None => self.arena.get(start).score,
        };

        let mut current = self.arena.get(start).parent;
        while let Some(id) = current {
            let node = self.arena.get_mut(id);
            node.update(result);
            current = node.parent;
        }
        Ok(())
    }

    /// Run `config.iterations` search iterations below `node`.
    ///
    /// New nodes from the expansion step are attached to `node` itself, not
    /// to the leaf that selection reached. Pass the selected leaf explicitly
    /// to grow the tree below it instead.
    pub fn search(&mut self, node: Option<NodeId>) -> Result<()> {
        let node = self.resolve(node)?;

        for iteration in 0..self.config.iterations {
            let selected = self.select(Some(node))?;
            let Expansion {
                state,
                action,
                status,
            } = self.expand(Some(selected))?;

            let mut child = Node::new(state);
            child.action = action;
            let child = self.arena.attach(node, child);

            trace!(
                iteration,
                selected = selected.0,
                child = child.0,
                status = status.code(),
                "expanded"
            );

            if !status.is_terminal() {
                let (last, status) = self.simulate(Some(child))?;
                self.backpropagate(last, Some(status.result()))?;
            }
        }

        Ok(())
    }

    /// Child of `node` with the highest score, or `node` itself if it has none.
    ///
    /// Ties go to the earliest child.
    pub fn best_node(&self, node: Option<NodeId>) -> Result<NodeId> {
        let id = self.resolve(node)?;
        let mut best: Option<(NodeId, f64)> = None;

        for &child in &self.arena.get(id).children {
            let score = self.arena.get(child).score;
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child, score)),
            }
        }

        Ok(best.map_or(id, |(child, _)| child))
    }

    /// Search from the root, move the root to the best child and return the
    /// action that leads there.
    ///
    /// # Errors
    /// - `MctsError::NoActionsAvailable` if the root has no children after
    ///   searching; the tree is left unchanged
    /// - `MctsError::MissingAction` if the best child carries no action; the
    ///   tree has already been re-rooted to it
    /// - any error raised by the search itself
    pub fn best_action(&mut self) -> Result<T::Action> {
        self.search(None)?;

        let best = self.best_node(None)?;
        if best == NodeId::ROOT {
            return Err(MctsError::NoActionsAvailable);
        }

        let score = self.arena.get(best).score;
        let released = self.arena.len();
        self.arena.retain_subtree(best);
        debug!(
            score,
            kept = self.arena.len(),
            released = released - self.arena.len(),
            "re-rooted to best child"
        );

        self.arena
            .root()
            .action
            .clone()
            .ok_or(MctsError::MissingAction)
    }

    /// Move the root to match an externally observed `state`.
    ///
    /// If a child of the root holds an equal state, it becomes the root with
    /// its statistics intact. Otherwise the whole tree is replaced by a fresh
    /// root. Returns true when an existing child was reused.
    pub fn update(&mut self, state: T::State) -> bool {
        let found = self
            .arena
            .root()
            .children
            .iter()
            .copied()
            .find(|&child| self.arena.get(child).state == state);

        match found {
            Some(child) => {
                self.arena.retain_subtree(child);
                debug!(kept = self.arena.len(), "re-rooted to existing child");
                true
            }
            None => {
                self.arena.reset(Node::new(state));
                debug!("re-rooted to unseen state");
                false
            }
        }
    }
}
