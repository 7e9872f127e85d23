//! Transition abstraction for MCTS.
//!
//! The `Transition` trait is the only thing the engine knows about the
//! environment being searched. It has two calls with deliberately different
//! shapes:
//! - `propose_expansion` returns a bare state (plus the action that reached it)
//!   and is told which states already hang below the node
//! - `rollout` returns a ready-made `Node` for the next rollout step
//!
//! `GamePlayout` implements both calls for any [`Game`] using random play.

use crate::node::Node;
use montecarlo_core::{Game, MctsError, Outcome, Result, Status};
use rand::Rng;
use std::cell::RefCell;

/// State proposed by the expansion call.
#[derive(Clone, Debug, PartialEq)]
pub struct Expansion<S, A> {
    /// Next state to add to the tree.
    pub state: S,

    /// Action leading to `state`, if the transition can name one.
    pub action: Option<A>,

    /// `Status::CONTINUE` if a rollout should follow.
    pub status: Status,
}

/// Caller-supplied transition capability.
pub trait Transition {
    /// Environment state. Equality is used to match observed states to children.
    type State: PartialEq;

    /// Action leading from one state to the next.
    type Action: Clone;

    /// Identity of the acting player, passed through untouched.
    type Player;

    /// Propose a state to add below a node whose state is `state`.
    ///
    /// `existing` lists the states of the node's current children so the
    /// implementation can avoid proposing a duplicate.
    fn propose_expansion(
        &self,
        state: &Self::State,
        player: &Self::Player,
        existing: &[&Self::State],
    ) -> Expansion<Self::State, Self::Action>;

    /// Advance one rollout step from `state`.
    ///
    /// The returned node is attached as the only child of the current rollout
    /// node; its parent and children fields are overwritten by the engine.
    fn rollout(
        &self,
        state: &Self::State,
        player: &Self::Player,
    ) -> (Node<Self::State, Self::Action>, Status);
}

impl<T: Transition + ?Sized> Transition for &T {
    type State = T::State;
    type Action = T::Action;
    type Player = T::Player;

    fn propose_expansion(
        &self,
        state: &Self::State,
        player: &Self::Player,
        existing: &[&Self::State],
    ) -> Expansion<Self::State, Self::Action> {
        (**self).propose_expansion(state, player, existing)
    }

    fn rollout(
        &self,
        state: &Self::State,
        player: &Self::Player,
    ) -> (Node<Self::State, Self::Action>, Status) {
        (**self).rollout(state, player)
    }
}

/// Status codes reported for finished games.
///
/// Every code must be nonzero, since zero means "keep going". The defaults
/// are all positive so that any backpropagated child outscores one that was
/// never rolled out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payoff {
    win: i32,
    draw: i32,
    loss: i32,
}

impl Payoff {
    /// Build a payoff table.
    ///
    /// # Errors
    /// Returns `MctsError::InvalidPayoff` if any code is zero.
    pub fn new(win: i32, draw: i32, loss: i32) -> Result<Self> {
        if let Some(code) = [win, draw, loss].into_iter().find(|&c| c == 0) {
            return Err(MctsError::InvalidPayoff(code));
        }
        Ok(Self { win, draw, loss })
    }

    /// Status reported for `outcome`.
    pub fn status(&self, outcome: Outcome) -> Status {
        let code = match outcome {
            Outcome::Win => self.win,
            Outcome::Draw => self.draw,
            Outcome::Loss => self.loss,
        };
        Status::new(code)
    }
}

impl Default for Payoff {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 2,
            loss: 1,
        }
    }
}

/// Transition that plays any [`Game`] with uniformly random moves.
///
/// - Expansion: a random legal action whose resulting state is not already a
///   child, falling back to any legal action once all have been tried
/// - Rollout: a random legal action
pub struct GamePlayout<G: Game, R: Rng> {
    game: G,

    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,

    payoff: Payoff,
}

impl<G: Game, R: Rng> GamePlayout<G, R> {
    /// Create a playout transition with the default payoff table.
    pub fn new(game: G, rng: R) -> Self {
        Self {
            game,
            rng: RefCell::new(rng),
            payoff: Payoff::default(),
        }
    }

    /// Replace the payoff table.
    pub fn with_payoff(mut self, payoff: Payoff) -> Self {
        self.payoff = payoff;
        self
    }

    fn pick<T: Copy>(&self, choices: &[T]) -> T {
        let idx = self.rng.borrow_mut().gen_range(0..choices.len());
        choices[idx]
    }

    /// Status of `state` for `player`: continue, or the payoff of the result.
    fn status_of(&self, state: &G::State, player: G::Player) -> Status {
        if !self.game.is_terminal(state) {
            return Status::CONTINUE;
        }
        // A terminal state without a reported outcome counts as a draw
        let outcome = self.game.outcome(state, player).unwrap_or(Outcome::Draw);
        self.payoff.status(outcome)
    }
}

impl<G: Game, R: Rng> Transition for GamePlayout<G, R> {
    type State = G::State;
    type Action = G::Action;
    type Player = G::Player;

    fn propose_expansion(
        &self,
        state: &G::State,
        player: &G::Player,
        existing: &[&G::State],
    ) -> Expansion<G::State, G::Action> {
        let legal = self.game.legal_actions(state);
        if legal.is_empty() {
            // Nothing to expand; report the finished state itself
            return Expansion {
                state: state.clone(),
                action: None,
                status: self.status_of(state, *player),
            };
        }

        let mut untried: Vec<(G::Action, G::State)> = legal
            .iter()
            .map(|&action| (action, self.game.apply(state, action)))
            .filter(|(_, next)| !existing.contains(&next))
            .collect();

        let (action, next) = if untried.is_empty() {
            let action = self.pick(&legal);
            (action, self.game.apply(state, action))
        } else {
            let idx = self.rng.borrow_mut().gen_range(0..untried.len());
            untried.swap_remove(idx)
        };

        let status = self.status_of(&next, *player);
        Expansion {
            state: next,
            action: Some(action),
            status,
        }
    }

    fn rollout(&self, state: &G::State, player: &G::Player) -> (Node<G::State, G::Action>, Status) {
        let legal = self.game.legal_actions(state);
        if legal.is_empty() {
            return (Node::new(state.clone()), self.status_of(state, *player));
        }

        let action = self.pick(&legal);
        let next = self.game.apply(state, action);
        let status = self.status_of(&next, *player);
        (Node::with_action(next, action), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Player, TicTacToe, TicTacToeAction};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn playout(seed: u64) -> GamePlayout<TicTacToe, ChaCha8Rng> {
        GamePlayout::new(TicTacToe, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_payoff_rejects_zero() {
        assert_eq!(Payoff::new(1, 0, -1), Err(MctsError::InvalidPayoff(0)));
        assert!(Payoff::new(1, 2, -1).is_ok());
    }

    #[test]
    fn test_payoff_default_is_positive_and_ordered() {
        let payoff = Payoff::default();
        let win = payoff.status(Outcome::Win).code();
        let draw = payoff.status(Outcome::Draw).code();
        let loss = payoff.status(Outcome::Loss).code();
        assert!(win > draw && draw > loss && loss > 0);
    }

    #[test]
    fn test_expansion_avoids_existing_children() {
        let transition = playout(7);
        let game = TicTacToe;
        let state = game.initial_state();

        // Every cell except 4 is already a child
        let taken: Vec<_> = (0..9u8)
            .filter(|&c| c != 4)
            .map(|c| game.apply(&state, TicTacToeAction(c)))
            .collect();
        let existing: Vec<&_> = taken.iter().collect();

        let expansion = transition.propose_expansion(&state, &Player::X, &existing);
        assert_eq!(expansion.action, Some(TicTacToeAction(4)));
        assert_eq!(expansion.status, Status::CONTINUE);
    }

    #[test]
    fn test_expansion_falls_back_when_all_tried() {
        let transition = playout(3);
        let game = TicTacToe;
        let state = game.initial_state();

        let taken: Vec<_> = (0..9u8)
            .map(|c| game.apply(&state, TicTacToeAction(c)))
            .collect();
        let existing: Vec<&_> = taken.iter().collect();

        let expansion = transition.propose_expansion(&state, &Player::X, &existing);
        assert!(expansion.action.is_some());
        assert!(existing.contains(&&expansion.state));
    }

    #[test]
    fn test_rollout_reaches_terminal() {
        let transition = playout(11);
        let game = TicTacToe;
        let mut state = game.initial_state();

        for _ in 0..9 {
            let (node, status) = transition.rollout(&state, &Player::O);
            assert!(node.action.is_some());
            state = node.state;
            if status.is_terminal() {
                assert!(game.is_terminal(&state));
                return;
            }
        }
        panic!("tic-tac-toe rollout did not finish within 9 moves");
    }

    #[test]
    fn test_terminal_state_expansion_has_no_action() {
        let transition = playout(0);
        let game = TicTacToe;
        // X wins on the top row
        let state = [0u8, 3, 1, 4, 2]
            .into_iter()
            .fold(game.initial_state(), |s, c| game.apply(&s, TicTacToeAction(c)));

        let expansion = transition.propose_expansion(&state, &Player::X, &[]);
        assert_eq!(expansion.action, None);
        assert_eq!(expansion.state, state);
        assert_eq!(expansion.status, Payoff::default().status(Outcome::Win));
    }
}
