//! Small environments used to exercise the engine.
//!
//! - `Counter` implements `Transition` directly and reproduces the counting
//!   scenario the engine is validated against
//! - `TicTacToe` implements `Game` and is searched through `GamePlayout`

pub mod counter;
pub mod tictactoe;

pub use counter::Counter;
pub use tictactoe::{Player, TicTacToe, TicTacToeAction, TicTacToeState};
