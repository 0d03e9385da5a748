//! Constants for board geometry, evaluation weights, and search parameters.
//!
//! This module contains all the fixed parameters of the L-Game rules and of the
//! engine. The grid size is part of the rules and is not configurable.

use crate::movegen::NeutralRule;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). The L-Game is only defined on a 4x4 grid.
pub const N: i8 = 4;

/// Number of orientations an L-piece can take from one anchor.
pub const ORIENTATION_COUNT: usize = 4;

/// `x` at or above which a North-facing piece is mirrored.
pub const NORTH_MIRROR_FROM: i8 = 3;

/// `x` at or below which a South-facing piece is mirrored.
pub const SOUTH_MIRROR_UPTO: i8 = 2;

/// `y` at or below which an East-facing piece is mirrored.
pub const EAST_MIRROR_UPTO: i8 = 2;

/// `y` at or above which a West-facing piece is mirrored.
pub const WEST_MIRROR_FROM: i8 = 3;

/// Lowest coordinate of the central 2x2 region.
pub const CENTER_MIN: i8 = 2;

/// Highest coordinate of the central 2x2 region.
pub const CENTER_MAX: i8 = 3;

// =============================================================================
// Rules
// =============================================================================

/// Neutral-piece rule used when none is specified.
///
/// The classic rules let a player skip the neutral relocation, which is also
/// what the move notation allows (the `fx fy tx ty` part may be omitted).
pub const DEFAULT_NEUTRAL_RULE: NeutralRule = NeutralRule::Optional;

/// Default initial setup in move notation: Player 1 L, two neutrals, Player 2 L.
pub const DEFAULT_SETUP: &str = "3 1 W 1 1 4 4 2 4 E";

/// Maximum number of moves in a computer-vs-computer game before it is abandoned.
pub const MAX_GAME_MOVES: usize = 200;

// =============================================================================
// Evaluation
// =============================================================================

/// Score type used by evaluation and search.
pub type Score = i32;

/// Bound of the search window. No evaluation ever reaches it.
pub const SCORE_INF: Score = 1_000_000;

/// Score of a position already won by the evaluating player.
pub const WIN_SCORE: Score = 100_000;

/// Score of a position already lost by the evaluating player.
pub const LOSS_SCORE: Score = -WIN_SCORE;

/// Weight of the mobility difference.
pub const MOBILITY_WEIGHT: Score = 10;

/// Bonus per L-piece cell inside the central 2x2 region.
pub const CENTER_CELL_BONUS: Score = 2;

/// Bonus per L-piece cell outside the central region.
pub const EDGE_CELL_BONUS: Score = 1;

/// Bonus per neutral piece inside the central region.
pub const NEUTRAL_CENTER_BONUS: Score = 1;

/// Bonus per neutral piece orthogonally adjacent to an opponent L cell.
pub const NEUTRAL_BLOCK_BONUS: Score = 2;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u32 = 2;

/// Absolute ply cutoff applied when the depth is unbounded.
pub const MAX_PLIES: u32 = 50;
