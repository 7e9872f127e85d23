//! Monte Carlo Core - shared abstractions for the tree search engine
//!
//! This crate holds the pieces that both the search engine and its callers
//! need to agree on.
//!
//! # Types
//!
//! - [`Status`] - Transition outcome code (`0` continues, anything else is terminal)
//! - [`Outcome`] - Win/draw/loss result of a finished game for one player
//! - [`Game`] - Trait for turn-based game implementations
//! - [`MctsError`] - Errors surfaced by the search engine

mod error;
mod game;
mod types;

pub use error::{MctsError, Result};
pub use game::Game;
pub use types::{Outcome, Status};
