//! Tic-tac-toe driver for the Monte Carlo search engine.
//!
//! Plays search trees against a random opponent or against each other and
//! reports the results. The driver owns the game and turn order; the trees
//! only see their own moves and the states reported through `update`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use montecarlo_core::{Game, Outcome};
use montecarlo_mcts::{
    games::{Player, TicTacToe, TicTacToeState},
    GamePlayout, MctsConfig, MonteCarloTree,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

type TicTacToeTree = MonteCarloTree<GamePlayout<TicTacToe, ChaCha8Rng>>;

/// Monte Carlo tree search self-play tool.
#[derive(Parser)]
#[command(name = "montecarlo-selfplay")]
#[command(about = "Play tic-tac-toe with Monte Carlo search trees")]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Print the summary as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search tree against a uniformly random opponent.
    Play {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Search iterations per move.
        #[arg(short, long, default_value = "100")]
        iterations: usize,

        /// Maximum rollout length before a search is abandoned.
        #[arg(long, default_value = "10000")]
        rollout_depth: usize,

        /// Side the tree plays.
        #[arg(long, value_enum, default_value = "x")]
        side: Side,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Two search trees against each other.
    Duel {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Search iterations per move for X.
        #[arg(long, default_value = "100")]
        x_iterations: usize,

        /// Search iterations per move for O.
        #[arg(long, default_value = "100")]
        o_iterations: usize,

        /// Maximum rollout length before a search is abandoned.
        #[arg(long, default_value = "10000")]
        rollout_depth: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Side {
    X,
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

/// One finished game.
#[derive(Serialize, Debug)]
struct GameRecord {
    seed: u64,

    /// Cells marked, in play order.
    moves: Vec<u8>,

    /// Final board, row by row.
    board: String,

    /// "x", "o" or "draw".
    winner: &'static str,

    /// Moves where the tree had no usable action and a random one was played.
    fallbacks: usize,
}

/// Aggregate over a batch of games, counted from X's point of view.
#[derive(Serialize, Debug, Default)]
struct Summary {
    mode: &'static str,
    games: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    fallbacks: usize,
    elapsed_secs: f64,
    records: Vec<GameRecord>,
}

impl Summary {
    fn record(&mut self, record: GameRecord) {
        match record.winner {
            "x" => self.x_wins += 1,
            "o" => self.o_wins += 1,
            _ => self.draws += 1,
        }
        self.fallbacks += record.fallbacks;
        self.games += 1;
        self.records.push(record);
    }
}

/// Who moves for one side of the board.
enum Mover {
    Tree(Box<TicTacToeTree>),
    Random(ChaCha8Rng),
}

impl Mover {
    fn tree(player: Player, seed: u64, config: &MctsConfig) -> Self {
        let transition = GamePlayout::new(TicTacToe, ChaCha8Rng::seed_from_u64(seed));
        let tree = MonteCarloTree::with_config(
            TicTacToe.initial_state(),
            player,
            transition,
            config.clone(),
        );
        Mover::Tree(Box::new(tree))
    }

    /// Choose a move from `state`. Returns the cell and whether the tree had
    /// to fall back to a random move.
    fn choose(&mut self, state: &TicTacToeState, fallback: &mut ChaCha8Rng) -> Result<(u8, bool)> {
        let game = TicTacToe;
        let legal = game.legal_actions(state);
        match self {
            Mover::Random(rng) => Ok((legal[rng.gen_range(0..legal.len())].0, false)),
            Mover::Tree(tree) => match tree.best_action() {
                Ok(action) if legal.contains(&action) => Ok((action.0, false)),
                Ok(action) => {
                    warn!(%action, %state, "tree proposed an illegal move, playing at random");
                    Ok((legal[fallback.gen_range(0..legal.len())].0, true))
                }
                Err(montecarlo_core::MctsError::MissingAction) => {
                    warn!(%state, "tree has no action for its best node, playing at random");
                    Ok((legal[fallback.gen_range(0..legal.len())].0, true))
                }
                Err(e) => Err(e).with_context(|| format!("search failed from {}", state)),
            },
        }
    }

    /// Tell the mover which state the board is in now.
    fn observe(&mut self, state: TicTacToeState) {
        if let Mover::Tree(tree) = self {
            if *tree.current_state() == state {
                return;
            }
            let reused = tree.update(state);
            debug!(%state, reused, "tree followed the board");
        }
    }
}

/// Play one game between `x` and `o`.
fn play_game(x: &mut Mover, o: &mut Mover, seed: u64) -> Result<GameRecord> {
    let game = TicTacToe;
    let mut fallback = ChaCha8Rng::seed_from_u64(seed.wrapping_add(7));
    let mut state = game.initial_state();
    let mut moves = Vec::new();
    let mut fallbacks = 0;

    while !game.is_terminal(&state) {
        let (mover, waiter) = match game.to_move(&state) {
            Player::X => (&mut *x, &mut *o),
            Player::O => (&mut *o, &mut *x),
        };
        let (cell, fell_back) = mover.choose(&state, &mut fallback)?;
        fallbacks += usize::from(fell_back);

        state = game.apply(&state, montecarlo_mcts::games::TicTacToeAction(cell));
        moves.push(cell);

        // Both sides see the real board; the mover may have re-rooted elsewhere
        mover.observe(state);
        waiter.observe(state);
    }

    let winner = match game.outcome(&state, Player::X) {
        Some(Outcome::Win) => "x",
        Some(Outcome::Loss) => "o",
        _ => "draw",
    };

    Ok(GameRecord {
        seed,
        moves,
        board: state.to_string(),
        winner,
        fallbacks,
    })
}

/// Run the play command.
fn cmd_play(games: usize, config: &MctsConfig, side: Side, seed: u64) -> Result<Summary> {
    let player = Player::from(side);
    info!(games, iterations = config.iterations, side = %player, "tree vs random");

    let mut summary = Summary {
        mode: "play",
        ..Default::default()
    };
    for i in 0..games {
        let game_seed = seed.wrapping_add(i as u64 * 1000);
        let tree = Mover::tree(player, game_seed, config);
        let random = Mover::Random(ChaCha8Rng::seed_from_u64(game_seed.wrapping_add(1)));
        let (mut x, mut o) = match player {
            Player::X => (tree, random),
            Player::O => (random, tree),
        };
        let record = play_game(&mut x, &mut o, game_seed)
            .with_context(|| format!("game {} (seed {})", i, game_seed))?;
        debug!(game = i, winner = record.winner, board = %record.board, "game finished");
        summary.record(record);
    }
    Ok(summary)
}

/// Run the duel command.
fn cmd_duel(games: usize, x_config: &MctsConfig, o_config: &MctsConfig, seed: u64) -> Result<Summary> {
    info!(
        games,
        x_iterations = x_config.iterations,
        o_iterations = o_config.iterations,
        "tree vs tree"
    );

    let mut summary = Summary {
        mode: "duel",
        ..Default::default()
    };
    for i in 0..games {
        let game_seed = seed.wrapping_add(i as u64 * 1000);
        let mut x = Mover::tree(Player::X, game_seed, x_config);
        let mut o = Mover::tree(Player::O, game_seed.wrapping_add(1), o_config);
        let record = play_game(&mut x, &mut o, game_seed)
            .with_context(|| format!("game {} (seed {})", i, game_seed))?;
        debug!(game = i, winner = record.winner, board = %record.board, "game finished");
        summary.record(record);
    }
    Ok(summary)
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_summary(summary: &Summary) {
    let pct = |n: usize| n as f64 / summary.games.max(1) as f64 * 100.0;

    println!("================================================");
    println!("RESULTS ({}, {} games)", summary.mode, summary.games);
    println!("================================================");
    println!("X wins: {} ({:.1}%)", summary.x_wins, pct(summary.x_wins));
    println!("O wins: {} ({:.1}%)", summary.o_wins, pct(summary.o_wins));
    println!("Draws:  {} ({:.1}%)", summary.draws, pct(summary.draws));
    println!("------------------------------------------------");
    println!("Random fallbacks: {}", summary.fallbacks);
    println!("Completed in {:.2}s", summary.elapsed_secs);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let start = Instant::now();
    let mut summary = match cli.command {
        Commands::Play {
            games,
            iterations,
            rollout_depth,
            side,
            seed,
        } => {
            let config = MctsConfig::with_iterations(iterations).with_max_rollout_depth(rollout_depth);
            cmd_play(games, &config, side, seed)?
        }

        Commands::Duel {
            games,
            x_iterations,
            o_iterations,
            rollout_depth,
            seed,
        } => {
            let x_config = MctsConfig::with_iterations(x_iterations).with_max_rollout_depth(rollout_depth);
            let o_config = MctsConfig::with_iterations(o_iterations).with_max_rollout_depth(rollout_depth);
            cmd_duel(games, &x_config, &o_config, seed)?
        }
    };
    summary.elapsed_secs = start.elapsed().as_secs_f64();

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", json);
    } else {
        print_summary(&summary);
    }

    Ok(())
}
