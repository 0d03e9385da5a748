//! Line-oriented console for playing a game.
//!
//! A session owns the current position and the undo history, and knows which
//! side is a human and which is a computer agent. That covers the three game
//! modes: human vs human, human vs computer and computer vs computer.
//!
//! ## Supported Commands
//!
//! - `x y O [fx fy tx ty]` - Play a move for the side to move
//! - `undo [n]` - Take back `n` moves (default 1)
//! - `hint` - Suggest a move for the side to move
//! - `moves` - List the legal moves
//! - `show` - Print the board
//! - `setup <10 fields>` - Start again from a new position
//! - `help` - List commands
//! - `quit` - Exit
//!
//! Responses start with `=` on success and `?` on failure, followed by a
//! blank line.
//!
//! ## Example
//!
//! ```ignore
//! use l_game::session::{GameSession, Side};
//! let mut session = GameSession::new(BoardState::default(), [Side::Human, Side::Human], config);
//! session.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::agent::Agent;
use crate::board::{BoardState, PlayerId};
use crate::constants::MAX_GAME_MOVES;
use crate::error::{GameError, Result};
use crate::history::History;
use crate::movegen::{Move, Rules, is_legal, is_terminal, legal_moves};
use crate::notation::{parse_move, parse_setup};
use crate::search::{SearchConfig, Searcher};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &["help", "hint", "moves", "quit", "setup", "show", "undo"];

/// Who plays one side.
pub enum Side {
    Human,
    Computer(Box<dyn Agent>),
}

impl Side {
    fn label(&self) -> &str {
        match self {
            Side::Human => "human",
            Side::Computer(agent) => agent.name(),
        }
    }
}

/// How the game stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(PlayerId),
    /// Two computers reached the move limit
    Abandoned,
}

pub struct GameSession {
    state: BoardState,
    history: History,
    sides: [Side; 2],
    rules: Rules,
    hint_config: SearchConfig,
}

impl GameSession {
    /// Create a session. `hint_config` drives the `hint` command and supplies
    /// the rule set.
    pub fn new(state: BoardState, sides: [Side; 2], hint_config: SearchConfig) -> Self {
        Self {
            state,
            history: History::new(),
            sides,
            rules: hint_config.rules,
            hint_config,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether both sides are computer agents.
    pub fn computers_only(&self) -> bool {
        self.sides.iter().all(|side| matches!(side, Side::Computer(_)))
    }

    /// Computer-only games are abandoned after [`MAX_GAME_MOVES`] moves; games
    /// with a human go on until someone cannot move.
    pub fn outcome(&self) -> Outcome {
        let mover = self.state.turn();
        if is_terminal(&self.state, mover, self.rules) {
            Outcome::Won(mover.opponent())
        } else if self.computers_only() && self.history.len() >= MAX_GAME_MOVES {
            Outcome::Abandoned
        } else {
            Outcome::InProgress
        }
    }

    fn side_to_move(&self) -> &Side {
        &self.sides[self.state.turn().index()]
    }

    fn commit(&mut self, mv: Move) {
        let player = self.state.turn();
        self.history.push(self.state);
        self.state = self.state.apply_unchecked(&mv);
        info!(player = player.number(), mv = %mv, ply = self.history.len(), "move played");
    }

    /// Play a move for the side to move after checking it.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if self.outcome() != Outcome::InProgress {
            return Err(GameError::IllegalMove("the game is over".to_string()));
        }
        let player = self.state.turn();
        if !is_legal(&self.state, player, &mv, self.rules) {
            // Re-run the checked path to get the specific reason
            self.state.apply(&mv)?;
            return Err(GameError::IllegalMove(
                "these rules require moving a neutral piece".to_string(),
            ));
        }
        self.commit(mv);
        Ok(())
    }

    /// Let computer sides move until a human is to move or the game ends.
    ///
    /// Returns one line per move played.
    pub fn advance(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while self.outcome() == Outcome::InProgress {
            let player = self.state.turn();
            let state = self.state;
            let Side::Computer(agent) = &mut self.sides[player.index()] else {
                break;
            };
            let name = agent.name().to_string();
            let Some(mv) = agent.select_move(&state) else {
                break;
            };
            self.commit(mv);
            lines.push(format!("{player} ({name}) plays {mv}"));
        }
        lines
    }

    /// Describe the board and, if the game is over, the result.
    pub fn status(&self) -> String {
        let mut text = self.state.to_string();
        match self.outcome() {
            Outcome::InProgress => {
                text.push_str(&format!(" ({})", self.side_to_move().label()));
            }
            Outcome::Won(winner) => {
                text.push_str(&format!(
                    "\n{winner} wins: {} has no legal move",
                    winner.opponent()
                ));
            }
            Outcome::Abandoned => {
                text.push_str(&format!("\ngame abandoned after {MAX_GAME_MOVES} moves"));
            }
        }
        text
    }

    /// Run the command loop, reading from `input` and writing to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        let mut opening = self.advance();
        opening.push(self.status());
        writeln!(output, "= {}\n", opening.join("\n"))?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (success, message) = self.execute(line);
            let prefix = if success { '=' } else { '?' };
            writeln!(output, "{prefix} {message}\n")?;
            output.flush()?;

            if line.eq_ignore_ascii_case("quit") {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command line and return (success, response).
    fn execute(&mut self, line: &str) -> (bool, String) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts[0].to_lowercase();
        let args = &parts[1..];

        // A line starting with a number is a move
        if command.parse::<i8>().is_ok() {
            return self.execute_move(line);
        }

        match command.as_str() {
            "quit" => (true, String::new()),

            "help" => (
                true,
                format!(
                    "x y O [fx fy tx ty]  play a move (e.g. 1 2 E 4 3 1 1)\n{}",
                    KNOWN_COMMANDS.join("\n")
                ),
            ),

            "show" => (true, self.status()),

            "moves" => {
                let moves = legal_moves(&self.state, self.state.turn(), self.rules);
                let mut text = format!("{} legal moves", moves.len());
                for mv in &moves {
                    text.push('\n');
                    text.push_str(&mv.to_string());
                }
                (true, text)
            }

            "hint" => {
                let mut searcher = Searcher::new(self.hint_config.clone());
                let result = searcher.search(&self.state, self.state.turn());
                match result.best_move {
                    Some(mv) => (true, format!("{mv} (score {})", result.score)),
                    None => (false, format!("{} has no legal move", self.state.turn())),
                }
            }

            "undo" => {
                let n = match args.first() {
                    None => 1,
                    Some(arg) => match arg.parse::<usize>() {
                        Ok(n) => n,
                        Err(_) => {
                            return self.reject(GameError::Parse(format!("bad undo count {arg:?}")));
                        }
                    },
                };
                let before = self.history.len();
                match self.history.undo(n) {
                    Ok(state) => {
                        let undone = before - self.history.len();
                        self.state = state;
                        info!(moves = undone, "undo");
                        let mut lines = self.advance();
                        lines.push(self.status());
                        (true, lines.join("\n"))
                    }
                    Err(e) => self.reject(e),
                }
            }

            "setup" => match parse_setup(&args.join(" ")) {
                Ok(state) => {
                    self.state = state;
                    self.history.clear();
                    let mut lines = self.advance();
                    lines.push(self.status());
                    (true, lines.join("\n"))
                }
                Err(e) => self.reject(e),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn execute_move(&mut self, line: &str) -> (bool, String) {
        if let Side::Computer(_) = self.side_to_move() {
            return (
                false,
                format!("{} is played by the computer", self.state.turn()),
            );
        }
        let mv = match parse_move(line) {
            Ok(mv) => mv,
            Err(e) => return self.reject(e),
        };
        if let Err(e) = self.play(mv) {
            return self.reject(e);
        }
        let mut lines = self.advance();
        lines.push(self.status());
        (true, lines.join("\n"))
    }

    fn reject(&self, error: GameError) -> (bool, String) {
        warn!(%error, "command rejected");
        (false, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AlphaBetaAgent, RandomAgent};
    use crate::geometry::Orientation;

    fn humans() -> GameSession {
        GameSession::new(
            BoardState::default(),
            [Side::Human, Side::Human],
            SearchConfig::default().with_depth(Some(1)),
        )
    }

    #[test]
    fn test_play_and_undo() {
        let mut session = humans();
        let (success, _) = session.execute("4 1 S 4 4 1 4");
        assert!(success);
        assert_eq!(session.state().turn(), PlayerId::Player2);
        assert_eq!(session.history().len(), 1);

        let (success, _) = session.execute("undo");
        assert!(success);
        assert_eq!(*session.state(), BoardState::default());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut session = humans();
        let (success, response) = session.execute("3 1 W");
        assert!(!success);
        assert!(response.contains("illegal move"));
        assert_eq!(*session.state(), BoardState::default());
    }

    #[test]
    fn test_mandatory_neutral_enforced() {
        let mut session = GameSession::new(
            BoardState::default(),
            [Side::Human, Side::Human],
            SearchConfig::default().with_rules(Rules::mandatory()),
        );
        assert!(session.play(Move::new((4, 1), Orientation::South)).is_err());
        assert!(session
            .play(Move::new((4, 1), Orientation::South).with_neutral((4, 4), (1, 4)))
            .is_ok());
    }

    #[test]
    fn test_bad_input() {
        let mut session = humans();
        assert!(!session.execute("1 2").0);
        assert!(!session.execute("1 2 Q").0);
        assert!(!session.execute("undo").0);
        assert!(!session.execute("undo x").0);
        assert!(!session.execute("frobnicate").0);
    }

    #[test]
    fn test_computer_replies() {
        let mut session = GameSession::new(
            BoardState::default(),
            [
                Side::Human,
                Side::Computer(Box::new(AlphaBetaAgent::new(
                    SearchConfig::default().with_depth(Some(1)),
                ))),
            ],
            SearchConfig::default().with_depth(Some(1)),
        );
        let (success, response) = session.execute("4 1 S 4 4 1 4");
        assert!(success);
        assert!(response.contains("Player 2 (alpha-beta) plays"));
        assert_eq!(session.state().turn(), PlayerId::Player1);
        assert_eq!(session.history().len(), 2);

        // Undoing one move hands the turn back to the computer, which replies again
        let (success, _) = session.execute("undo");
        assert!(success);
        assert_eq!(session.state().turn(), PlayerId::Player1);
        assert_eq!(session.history().len(), 2);

        let (success, _) = session.execute("undo 2");
        assert!(success);
        assert_eq!(*session.state(), BoardState::default());
    }

    #[test]
    fn test_human_cannot_move_for_computer() {
        let mut session = GameSession::new(
            BoardState::default(),
            [
                Side::Computer(Box::new(RandomAgent::new(3, Rules::default()))),
                Side::Human,
            ],
            SearchConfig::default(),
        );
        let (success, response) = session.execute("4 1 S");
        assert!(!success);
        assert!(response.contains("computer"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_computers_play_to_the_end() {
        let mut session = GameSession::new(
            BoardState::default(),
            [
                Side::Computer(Box::new(RandomAgent::new(1, Rules::default()))),
                Side::Computer(Box::new(RandomAgent::new(2, Rules::default()))),
            ],
            SearchConfig::default(),
        );
        let lines = session.advance();
        assert!(!lines.is_empty());
        assert_ne!(session.outcome(), Outcome::InProgress);
        assert!(session.history().len() <= MAX_GAME_MOVES);
    }

    #[test]
    fn test_human_game_has_no_move_limit() {
        let mut session = humans();
        for _ in 0..MAX_GAME_MOVES + 10 {
            let state = *session.state();
            let mover = state.turn();
            // Any move that leaves the opponent a reply
            let mv = legal_moves(&state, mover, Rules::default())
                .into_iter()
                .find(|m| !is_terminal(&state.apply_unchecked(m), mover.opponent(), Rules::default()))
                .unwrap();
            session.play(mv).unwrap();
        }
        assert_eq!(session.history().len(), MAX_GAME_MOVES + 10);
        assert_eq!(session.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_run_loop() {
        let mut session = humans();
        let input = "# comment\n\nshow\n4 1 S\nhint\nquit\nshow\n";
        let mut output = Vec::new();
        session.run(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("= "));
        assert!(text.contains("Player 2 to move"));
        assert!(!text.contains("? "));
        // Nothing is processed after quit
        assert_eq!(text.matches("\n\n").count(), 5);
    }

    #[test]
    fn test_setup_command() {
        let mut session = humans();
        let (success, response) = session.execute("setup 1 1 S 1 3 2 4 2 2 S");
        assert!(success);
        assert!(response.contains("Player 2 wins"));
        assert_eq!(session.outcome(), Outcome::Won(PlayerId::Player2));
        assert!(!session.execute("setup 1 1 S").0);
    }
}
