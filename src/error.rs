//! Error types for the L-Game engine.
//!
//! Only the outer layers (setup validation, move notation, checked move
//! application, undo) produce errors. The move generator and the search are
//! total over valid board states.

use thiserror::Error;

use crate::geometry::Cell;

/// Errors that can occur when building or changing a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Text that does not name an orientation
    #[error("invalid orientation: {0:?} (expected N, S, E or W)")]
    InvalidOrientation(String),

    /// A candidate move fails legality
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Pieces of an initial configuration overlap
    #[error("pieces overlap in the initial configuration")]
    OverlappingInitialState,

    /// A cell of an initial configuration lies off the board
    #[error("cell ({x}, {y}) is off the board")]
    OutOfBounds { x: i8, y: i8 },

    /// Malformed move or setup notation
    #[error("parse error: {0}")]
    Parse(String),

    /// Undo requested with an empty history
    #[error("no moves to undo")]
    NothingToUndo,
}

impl GameError {
    pub(crate) fn out_of_bounds((x, y): Cell) -> Self {
        GameError::OutOfBounds { x, y }
    }
}

/// Result type alias for game operations
pub type Result<T> = std::result::Result<T, GameError>;
