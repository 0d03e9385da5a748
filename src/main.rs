//! L-Game: play, analyze and watch games on the 4x4 board.
//!
//! ## Usage
//!
//! - `l-game` - Show a demo game
//! - `l-game play --p2 ai` - Play against the computer on the console
//! - `l-game analyze --setup "..."` - Search a position and print statistics
//! - `l-game demo` - Computer vs computer from the standard setup

use std::io;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use l_game::agent::{AlphaBetaAgent, MinimaxAgent, RandomAgent};
use l_game::board::{BoardState, PlayerId};
use l_game::constants::{DEFAULT_DEPTH, DEFAULT_SETUP};
use l_game::movegen::{NeutralRule, Rules, count_legal_moves};
use l_game::notation::parse_setup;
use l_game::search::{SearchConfig, Searcher};
use l_game::session::{GameSession, Side};

/// L-Game: an alpha-beta engine for de Bono's L-Game
#[derive(Parser)]
#[command(name = "l-game")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter such as `info` or `l_game=debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the console
    Play {
        /// Who plays Player 1
        #[arg(long, value_enum, default_value_t = Player::Human)]
        p1: Player,
        /// Who plays Player 2
        #[arg(long, value_enum, default_value_t = Player::Ai)]
        p2: Player,
        #[command(flatten)]
        game: GameArgs,
        /// Seed for random players
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search a position and report the best move
    Analyze {
        #[command(flatten)]
        game: GameArgs,
        /// Player to search for
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
        player: u8,
    },
    /// Run a computer vs computer demo game
    Demo,
}

#[derive(clap::Args)]
struct GameArgs {
    /// Search depth in plies, or `inf` for no limit
    #[arg(long, default_value_t = Depth(Some(DEFAULT_DEPTH)))]
    depth: Depth,
    /// Initial position: P1 L, two neutral cells, P2 L (e.g. "3 1 W 1 1 4 4 2 4 E")
    #[arg(long, default_value = DEFAULT_SETUP)]
    setup: String,
    /// Require a neutral piece to move every turn
    #[arg(long)]
    mandatory_neutral: bool,
}

impl GameArgs {
    fn rules(&self) -> Rules {
        if self.mandatory_neutral {
            Rules::new(NeutralRule::Mandatory)
        } else {
            Rules::default()
        }
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_depth(self.depth.0)
            .with_rules(self.rules())
    }

    fn initial_state(&self) -> Result<BoardState> {
        parse_setup(&self.setup).with_context(|| format!("invalid setup {:?}", self.setup))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Player {
    Human,
    /// Alpha-beta search
    Ai,
    /// Unpruned minimax (slow beyond depth 2)
    Minimax,
    Random,
}

/// Search depth; `None` searches until the ply cutoff.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Depth(Option<u32>);

impl FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("inf") {
            return Ok(Depth(None));
        }
        s.parse::<u32>()
            .map(|d| Depth(Some(d)))
            .map_err(|_| format!("expected a depth or 'inf', got {s:?}"))
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(d) => write!(f, "{d}"),
            None => write!(f, "inf"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Some(Commands::Play { p1, p2, game, seed }) => run_play(p1, p2, &game, seed),
        Some(Commands::Analyze { game, player }) => run_analyze(&game, player),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter {level:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn make_side(player: Player, game: &GameArgs, seed: u64) -> Side {
    match player {
        Player::Human => Side::Human,
        Player::Ai => Side::Computer(Box::new(AlphaBetaAgent::new(game.search_config()))),
        Player::Minimax => Side::Computer(Box::new(MinimaxAgent::new(
            game.search_config().root_depth(),
            game.rules(),
        ))),
        Player::Random => Side::Computer(Box::new(RandomAgent::new(seed, game.rules()))),
    }
}

fn run_play(p1: Player, p2: Player, game: &GameArgs, seed: Option<u64>) -> Result<()> {
    let state = game.initial_state()?;
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    info!(?p1, ?p2, depth = %game.depth, seed, "starting game");

    let sides = [
        make_side(p1, game, seed),
        make_side(p2, game, seed.wrapping_add(1)),
    ];
    let mut session = GameSession::new(state, sides, game.search_config());
    session
        .run(io::stdin().lock(), io::stdout().lock())
        .context("console I/O failed")
}

fn run_analyze(game: &GameArgs, player: u8) -> Result<()> {
    let player = if player == 1 {
        PlayerId::Player1
    } else {
        PlayerId::Player2
    };
    let state = game.initial_state()?.with_turn(player);
    let rules = game.rules();

    println!("{state}\n");
    println!("Legal moves: {}", count_legal_moves(&state, player, rules));

    let mut searcher = Searcher::new(game.search_config());
    let result = searcher.search(&state, player);
    match result.best_move {
        Some(mv) => println!("Best move:   {mv}"),
        None => println!("Best move:   none ({player} has lost)"),
    }
    println!("Score:       {}", result.score);
    println!("Depth:       {}", game.depth);
    println!("Nodes:       {}", result.stats.nodes);
    println!("Leaves:      {}", result.stats.leaves);
    println!("Cache hits:  {}", result.stats.cache_hits);
    println!("Cutoffs:     {}", result.stats.cutoffs);
    println!("Max ply:     {}", result.stats.max_ply);
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("L-Game: alpha-beta (Player 1) vs random (Player 2)\n");

    let sides = [
        Side::Computer(Box::new(AlphaBetaAgent::new(SearchConfig::default()))),
        Side::Computer(Box::new(RandomAgent::new(0, Rules::default()))),
    ];
    let mut session = GameSession::new(BoardState::default(), sides, SearchConfig::default());
    for line in session.advance() {
        println!("{line}");
    }
    println!("\n{}", session.status());
    Ok(())
}
