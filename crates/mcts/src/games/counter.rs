//! Deterministic counting transition.
//!
//! Every step adds one to the state. Reaching `target` is terminal with
//! status 1, anything below it continues. The action is the value counted to.

use crate::node::Node;
use crate::transition::{Expansion, Transition};
use montecarlo_core::Status;

/// Counts upward until `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter {
    target: u32,
}

impl Counter {
    pub fn new(target: u32) -> Self {
        Self { target }
    }

    fn step(&self, state: u32) -> (u32, Status) {
        let next = state + 1;
        if next < self.target {
            (next, Status::CONTINUE)
        } else {
            (next, Status::new(1))
        }
    }
}

impl Transition for Counter {
    type State = u32;
    type Action = u32;
    type Player = ();

    fn propose_expansion(&self, state: &u32, _player: &(), _existing: &[&u32]) -> Expansion<u32, u32> {
        let (next, status) = self.step(*state);
        Expansion {
            state: next,
            action: Some(next),
            status,
        }
    }

    fn rollout(&self, state: &u32, _player: &()) -> (Node<u32, u32>, Status) {
        let (next, status) = self.step(*state);
        (Node::with_action(next, next), status)
    }
}
