//! Tic-tac-toe on two 9-bit masks.
//!
//! Small enough to play out completely in a handful of moves, which makes it
//! a convenient end-to-end check of the engine and the playout transition.

use montecarlo_core::{Game, Outcome};
use std::fmt;

/// Winning lines as bit masks over cells 0-8 (row-major).
const LINES: [u16; 8] = [
    0b000_000_111,
    0b000_111_000,
    0b111_000_000,
    0b001_001_001,
    0b010_010_010,
    0b100_100_100,
    0b100_010_001,
    0b001_010_100,
];

const FULL: u16 = 0b111_111_111;

/// Tic-tac-toe player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Board position. X always moves first, so the side to move follows from
/// the number of marks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct TicTacToeState {
    x: u16,
    o: u16,
}

impl TicTacToeState {
    /// Empty board, X to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Player to move.
    pub fn current_player(&self) -> Player {
        if (self.x | self.o).count_ones() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Mark in `cell`, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        let bit = 1u16.checked_shl(cell as u32)?;
        if self.x & bit != 0 {
            Some(Player::X)
        } else if self.o & bit != 0 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Player owning a complete line.
    pub fn winner(&self) -> Option<Player> {
        let owns = |mask: u16| LINES.iter().any(|&line| mask & line == line);
        if owns(self.x) {
            Some(Player::X)
        } else if owns(self.o) {
            Some(Player::O)
        } else {
            None
        }
    }

    fn is_full(&self) -> bool {
        self.x | self.o == FULL
    }

    fn empty_cells(&self) -> impl Iterator<Item = u8> + '_ {
        let occupied = self.x | self.o;
        (0..9u8).filter(move |&c| occupied & (1 << c) == 0)
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                write!(f, "/")?;
            }
            for col in 0..3 {
                match self.get(row * 3 + col) {
                    Some(player) => write!(f, "{}", player)?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

/// Tic-tac-toe action (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeAction(pub u8);

impl fmt::Display for TicTacToeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0 / 3, self.0 % 3)
    }
}

/// Tic-tac-toe game implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = TicTacToeState;
    type Action = TicTacToeAction;
    type Player = Player;

    fn initial_state(&self) -> TicTacToeState {
        TicTacToeState::new()
    }

    fn to_move(&self, state: &TicTacToeState) -> Player {
        state.current_player()
    }

    fn legal_actions(&self, state: &TicTacToeState) -> Vec<TicTacToeAction> {
        if state.winner().is_some() {
            return Vec::new();
        }
        state.empty_cells().map(TicTacToeAction).collect()
    }

    fn apply(&self, state: &TicTacToeState, action: TicTacToeAction) -> TicTacToeState {
        let bit = 1u16 << action.0;
        let mut next = *state;
        match state.current_player() {
            Player::X => next.x |= bit,
            Player::O => next.o |= bit,
        }
        next
    }

    fn is_terminal(&self, state: &TicTacToeState) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn outcome(&self, state: &TicTacToeState, player: Player) -> Option<Outcome> {
        match state.winner() {
            Some(winner) if winner == player => Some(Outcome::Win),
            Some(_) => Some(Outcome::Loss),
            None if state.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }
}
