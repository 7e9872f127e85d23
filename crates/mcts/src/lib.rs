//! Generic Monte Carlo Tree Search.
//!
//! This crate provides a search engine that works with any environment that
//! can answer two questions, supplied through the [`Transition`] trait:
//! "what new state could follow this one?" and "what happens next in a
//! rollout?".
//!
//! # Features
//!
//! - **Generic**: State, action and player types come from the transition
//! - **Arena tree**: Nodes are indexed, parents never own their children's memory
//! - **Tree reuse**: The root follows the chosen action and observed states,
//!   keeping statistics of the surviving subtree
//! - **Bounded rollouts**: Runaway rollouts surface as an error instead of
//!   growing without limit
//! - **Game adapter**: [`GamePlayout`] turns any [`montecarlo_core::Game`]
//!   into a random-playout transition
//!
//! # Example
//!
//! ```
//! use montecarlo_mcts::{games::Counter, MctsConfig, MonteCarloTree};
//!
//! let mut tree = MonteCarloTree::with_config(0, (), Counter::new(3), MctsConfig::default());
//!
//! let action = tree.best_action().unwrap();
//! assert_eq!(action, 1);
//! assert_eq!(*tree.current_state(), 1);
//!
//! // Someone else moved; follow them
//! tree.update(2);
//! assert_eq!(*tree.current_state(), 2);
//! ```

pub mod config;
pub mod games;
mod node;
pub mod search;
pub mod transition;
mod tree;

pub use config::MctsConfig;
pub use node::{Node, NodeId};
pub use search::MonteCarloTree;
pub use transition::{Expansion, GamePlayout, Payoff, Transition};
pub use tree::Arena;
