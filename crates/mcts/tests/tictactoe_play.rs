//! End-to-end games of tic-tac-toe driven by search trees.
//!
//! The tree always re-roots to the child it picked and follows the
//! opponent through `update`, exactly as a real driver would.

use montecarlo_core::{Game, MctsError};
use montecarlo_mcts::{
    games::{Player, TicTacToe, TicTacToeState},
    GamePlayout, MctsConfig, MonteCarloTree,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type TicTacToeTree = MonteCarloTree<GamePlayout<TicTacToe, ChaCha8Rng>>;

fn create_tree(player: Player, seed: u64, iterations: usize) -> TicTacToeTree {
    let transition = GamePlayout::new(TicTacToe, ChaCha8Rng::seed_from_u64(seed));
    MonteCarloTree::with_config(
        TicTacToe.initial_state(),
        player,
        transition,
        MctsConfig::with_iterations(iterations),
    )
}

/// Let `tree` move from `state`, checking the move and the new root.
fn tree_move(tree: &mut TicTacToeTree, state: &TicTacToeState) -> TicTacToeState {
    let game = TicTacToe;
    let action = tree.best_action().expect("tree should always find a move");
    assert!(
        game.legal_actions(state).contains(&action),
        "illegal move {} from {}",
        action,
        state
    );
    let next = game.apply(state, action);
    assert_eq!(*tree.current_state(), next);
    next
}

fn random_move(rng: &mut ChaCha8Rng, state: &TicTacToeState) -> TicTacToeState {
    let actions = TicTacToe.legal_actions(state);
    let idx = rng.gen_range(0..actions.len());
    TicTacToe.apply(state, actions[idx])
}

/// Tree plays `side` against a random opponent; returns the final position.
fn play_vs_random(side: Player, seed: u64, iterations: usize) -> TicTacToeState {
    let game = TicTacToe;
    let mut tree = create_tree(side, seed, iterations);
    let mut rng = ChaCha8Rng::seed_from_u64(seed + 1000);
    let mut state = game.initial_state();

    while !game.is_terminal(&state) {
        if game.to_move(&state) == side {
            state = tree_move(&mut tree, &state);
        } else {
            state = random_move(&mut rng, &state);
            tree.update(state);
            assert_eq!(*tree.current_state(), state);
        }
    }
    state
}

#[test]
fn test_tree_finishes_games_as_x() {
    for seed in 0..20 {
        let state = play_vs_random(Player::X, seed, 50);
        assert!(TicTacToe.outcome(&state, Player::X).is_some());
    }
}

#[test]
fn test_tree_finishes_games_as_o() {
    for seed in 0..20 {
        let state = play_vs_random(Player::O, seed, 50);
        assert!(TicTacToe.outcome(&state, Player::O).is_some());
    }
}

#[test]
fn test_two_trees_play_out() {
    let game = TicTacToe;

    for seed in 0..10 {
        let mut x = create_tree(Player::X, seed, 30);
        let mut o = create_tree(Player::O, seed + 500, 30);
        let mut state = game.initial_state();
        let mut moves = 0;

        while !game.is_terminal(&state) {
            let (mover, waiter) = match game.to_move(&state) {
                Player::X => (&mut x, &mut o),
                Player::O => (&mut o, &mut x),
            };
            state = tree_move(mover, &state);
            waiter.update(state);
            moves += 1;
        }

        assert!((5..=9).contains(&moves));
        assert_eq!(*x.current_state(), state);
        assert_eq!(*o.current_state(), state);
    }
}

#[test]
fn test_same_seed_same_game() {
    let a = play_vs_random(Player::X, 77, 40);
    let b = play_vs_random(Player::X, 77, 40);
    assert_eq!(a, b);
}

#[test]
fn test_terminal_root_has_no_move() {
    let game = TicTacToe;
    // X wins on the diagonal
    let state = [0u8, 1, 4, 2, 8]
        .into_iter()
        .fold(game.initial_state(), |s, c| {
            game.apply(&s, montecarlo_mcts::games::TicTacToeAction(c))
        });
    assert!(game.is_terminal(&state));

    let mut tree = create_tree(Player::X, 1, 5);
    tree.update(state);

    // Every expansion of a finished board yields the board itself, without an
    // action, so the best child cannot be turned into a move.
    assert_eq!(tree.best_action(), Err(MctsError::MissingAction));
    assert_eq!(*tree.current_state(), state);
}
