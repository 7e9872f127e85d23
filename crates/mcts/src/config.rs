//! Search configuration parameters.

/// Default number of select/expand/simulate cycles per search.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default cap on rollout length before a search is aborted.
pub const DEFAULT_MAX_ROLLOUT_DEPTH: usize = 10_000;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MctsConfig {
    /// Number of iterations performed by one `search` call.
    pub iterations: usize,

    /// Maximum number of rollout steps a single simulation may take.
    /// A transition that never reports a terminal status trips this limit
    /// instead of growing the tree forever.
    pub max_rollout_depth: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            max_rollout_depth: DEFAULT_MAX_ROLLOUT_DEPTH,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Replace the rollout depth limit.
    pub fn with_max_rollout_depth(mut self, max_rollout_depth: usize) -> Self {
        self.max_rollout_depth = max_rollout_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 100);
        assert_eq!(config.max_rollout_depth, 10_000);
    }

    #[test]
    fn test_with_iterations() {
        let config = MctsConfig::with_iterations(7);
        assert_eq!(config.iterations, 7);
        // Other values should be default
        assert_eq!(config.max_rollout_depth, DEFAULT_MAX_ROLLOUT_DEPTH);
    }

    #[test]
    fn test_builder_chain() {
        let config = MctsConfig::with_iterations(3).with_max_rollout_depth(12);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.max_rollout_depth, 12);
    }
}
