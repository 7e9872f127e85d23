use thiserror::Error;

/// Errors that can occur while searching or navigating the tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MctsError {
    #[error("Rollout exceeded {limit} steps without reaching a terminal status")]
    RolloutLimitExceeded { limit: usize },

    #[error("No actions available from the current root")]
    NoActionsAvailable,

    #[error("Best node carries no action")]
    MissingAction,

    #[error("Payoff codes must be nonzero, got {0}")]
    InvalidPayoff(i32),

    #[error("Invalid node id: {0}")]
    InvalidNode(usize),
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, MctsError>;
