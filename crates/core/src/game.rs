/// A turn-based game that can be driven by the search engine.
///
/// The engine itself never sees this trait; it only talks to a transition
/// capability. `Game` exists so that ordinary rule implementations can be
/// adapted into one without writing the two transition calls by hand.
pub trait Game: Clone {
    /// The game state (e.g., a board position)
    type State: Clone + PartialEq;

    /// A game action (e.g., a cell to mark)
    type Action: Clone + Copy + PartialEq;

    /// Identity of a participant
    type Player: Clone + Copy + PartialEq;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns the player whose turn it is in `state`
    fn to_move(&self, state: &Self::State) -> Self::Player;

    /// Returns all legal actions from the given state
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action, returning a new state (immutable operation)
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns true if the game has ended
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Returns the result of a finished game from `player`'s point of view,
    /// or `None` if the game is still running.
    fn outcome(&self, state: &Self::State, player: Self::Player) -> Option<crate::Outcome>;
}
