//! Small value types shared between the engine and its callers.

use std::fmt;

/// Outcome code returned by every transition call.
///
/// `0` means the state is not terminal and the search should keep going.
/// Any other value is terminal, and the value itself is the result that gets
/// backpropagated: sign and magnitude are defined by whoever implements the
/// transition.
///
/// # Example
/// ```
/// use montecarlo_core::Status;
///
/// assert!(!Status::CONTINUE.is_terminal());
/// assert!(Status::new(-1).is_terminal());
/// assert_eq!(Status::new(2).result(), 2.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Status(i32);

impl Status {
    /// Non-terminal status.
    pub const CONTINUE: Status = Status(0);

    /// Wrap a raw status code.
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// The raw status code.
    pub const fn code(self) -> i32 {
        self.0
    }

    /// True for every nonzero code.
    pub const fn is_terminal(self) -> bool {
        self.0 != 0
    }

    /// The value added to each node's score during backpropagation.
    pub fn result(self) -> f64 {
        f64::from(self.0)
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminal() {
            write!(f, "terminal({})", self.0)
        } else {
            write!(f, "continue")
        }
    }
}

/// Result of a finished game for a single player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}
