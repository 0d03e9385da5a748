//! L-Game: an engine for Edward de Bono's two-player game on a 4x4 board.
//!
//! Each player owns an L-shaped piece, and two neutral one-cell pieces share
//! the board. A turn moves your L to a new position and then optionally moves
//! one neutral piece. A player who cannot move their L loses.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, evaluation weights and search limits
//! - [`geometry`] - Cells, orientations and L placements
//! - [`board`] - Board state, validation and move application
//! - [`movegen`] - Legal move generation and neutral-piece rules
//! - [`eval`] - Static evaluation (mobility and positional bonuses)
//! - [`search`] - Depth-limited alpha-beta with a transposition cache
//! - [`notation`] - Text notation for moves and setups
//! - [`history`] - Undo stack
//! - [`agent`] - Computer players
//! - [`session`] - Line-oriented console for human and computer games
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use l_game::board::BoardState;
//! use l_game::movegen::{legal_moves, Rules};
//! use l_game::search::best_move;
//!
//! let state = BoardState::default();
//! assert_eq!(legal_moves(&state, state.turn(), Rules::default()).len(), 65);
//!
//! let mv = best_move(&state, state.turn(), Some(1)).unwrap();
//! let next = state.apply(&mv).unwrap();
//! println!("{next}");
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod error;
pub mod eval;
pub mod geometry;
pub mod history;
pub mod movegen;
pub mod notation;
pub mod search;
pub mod session;

pub use board::{BoardState, PlayerId};
pub use error::{GameError, Result};
pub use movegen::{Move, Rules};
